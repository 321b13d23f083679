use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Page requested when the caller does not name one.
pub const DEFAULT_PAGE: u32 = 1;
/// Search radius in miles the API assumes when none is sent.
pub const DEFAULT_RADIUS: u32 = 10;
/// Page size the API assumes when none is sent.
pub const DEFAULT_PER_PAGE: u32 = 10;

const FIELD_SEPARATOR: &[u8] = &[0x1f];

/// Query parameters for a coupon search.
///
/// Absent fields are not sent, the remote API applies its own defaults.
/// `uniq` is a client-side flag and never reaches the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub query: Option<String>,
    pub location: Option<String>,
    /// Miles.
    pub radius: Option<u32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category_slugs: Vec<String>,
    pub online: Option<bool>,
    /// Shorthand for "expires within this many days", see [`ExpiryResolver`].
    pub expired_in: Option<u32>,
    pub end_at: Option<NaiveDate>,
    pub uniq: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn category_slugs<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_slugs = slugs.into_iter().map(Into::into).collect();
        self
    }

    pub fn online(mut self, online: bool) -> Self {
        self.online = Some(online);
        self
    }

    pub fn expired_in(mut self, days: u32) -> Self {
        self.expired_in = Some(days);
        self
    }

    pub fn end_at(mut self, date: NaiveDate) -> Self {
        self.end_at = Some(date);
        self
    }

    pub fn uniq(mut self, uniq: bool) -> Self {
        self.uniq = uniq;
        self
    }

    /// The requested page, falling back to [`DEFAULT_PAGE`].
    pub fn effective_page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    fn category_slugs_param(&self) -> Option<String> {
        if self.category_slugs.is_empty() {
            None
        } else {
            Some(self.category_slugs.join(","))
        }
    }

    /// Wire parameters in a stable order. `expired_in` is dropped once it
    /// has been resolved into `end_at`; `uniq` is never included.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![];
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        };

        push("query", self.query.clone());
        push("location", self.location.clone());
        push("radius", self.radius.map(|r| r.to_string()));
        push("page", self.page.map(|p| p.to_string()));
        push("per_page", self.per_page.map(|p| p.to_string()));
        push("category_slugs", self.category_slugs_param());
        push("online", self.online.map(|o| o.to_string()));
        match self.end_at {
            Some(end_at) => push("end_at", Some(end_at.format("%Y-%m-%d").to_string())),
            None => push("expired_in", self.expired_in.map(|d| d.to_string())),
        }

        pairs
    }

    /// Identity of the logical query for paging purposes.
    ///
    /// Covers `query, category_slugs, location, radius, online, expired_in,
    /// per_page` in that order; `page` and `uniq` do not take part.
    pub fn fingerprint(&self) -> Fingerprint {
        fn text<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        let fields = [
            text(&self.query),
            self.category_slugs_param().unwrap_or_default(),
            text(&self.location),
            text(&self.radius),
            text(&self.online),
            text(&self.expired_in),
            text(&self.per_page),
        ];

        let mut hasher = Sha256::new();
        for field in &fields {
            hasher.update(field.as_bytes());
            hasher.update(FIELD_SEPARATOR);
        }
        Fingerprint(hex::encode(hasher.finalize()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expands the `expired_in` shorthand into an explicit `end_at` bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryResolver {
    anchor: Option<NaiveDate>,
}

impl ExpiryResolver {
    /// Resolve relative to the current UTC date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative to a fixed date instead of today.
    pub fn anchored(anchor: NaiveDate) -> Self {
        Self {
            anchor: Some(anchor),
        }
    }

    fn today(&self) -> NaiveDate {
        self.anchor.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Fill in `end_at` from `expired_in`. An existing `end_at` wins, so
    /// running this twice changes nothing. No other field is touched.
    pub fn normalize(&self, mut options: QueryOptions) -> QueryOptions {
        if options.end_at.is_none() {
            if let Some(days) = options.expired_in {
                options.end_at = self.today().checked_add_days(Days::new(u64::from(days)));
            }
        }
        options
    }
}
