use crate::{Coupon, Error, QueryOptions, Result};
use serde::Serialize;
use strum::{AsRefStr, Display};

/// Type tag of a diagnostic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Coupons,
    Coupon,
}

/// One request as seen by the client, hit or miss
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry<'a> {
    pub uri: String,
    pub records: &'a [Coupon],
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub opts: &'a QueryOptions,
}

/// Sink for diagnostic entries. Errors are reported by the client and
/// otherwise ignored.
pub trait DiagnosticLog: Send + Sync {
    fn log(&self, entry: &LogEntry<'_>) -> Result<()>;
}

/// Writes entries to the `log` facade at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl DiagnosticLog for LogDiagnostics {
    fn log(&self, entry: &LogEntry<'_>) -> Result<()> {
        if !log::log_enabled!(log::Level::Debug) {
            return Ok(());
        }
        let records =
            serde_json::to_string(entry.records).map_err(|e| Error::Diagnostics(e.to_string()))?;
        log::debug!(
            "[{}] {} ({} records) {:?}: {}",
            entry.kind,
            entry.uri,
            entry.records.len(),
            entry.opts,
            records
        );
        Ok(())
    }
}
