mod accumulator;
pub mod cache;
mod client;
mod config;
mod coupon;
mod dedup;
pub mod diagnostics;
mod error;
mod options;
pub mod transport;


pub use accumulator::PageAccumulator;
pub use cache::{CacheStats, SingleFetchCache, SingleFetchStats};
pub use client::{ClientState, CouponClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use coupon::{Coupon, CouponId, RecordSet};
pub use dedup::dedupe_by_title;
pub use diagnostics::{DiagnosticLog, LogDiagnostics, LogEntry, RecordKind};
pub use error::{Error, Result};
pub use options::{
    ExpiryResolver, Fingerprint, QueryOptions, DEFAULT_PAGE, DEFAULT_PER_PAGE, DEFAULT_RADIUS,
};
pub use transport::{CouponTransport, Request, Resource, SurfTransport};
