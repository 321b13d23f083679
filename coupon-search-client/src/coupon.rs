use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type CouponId = u64;

/// A coupon record as returned by the search API.
///
/// Only `id` and `title` are interpreted by the client; everything else is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Coupon {
    pub fn new(id: CouponId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Whether the record carries a usable (non-blank) title.
    pub fn has_title(&self) -> bool {
        self.title
            .as_deref()
            .is_some_and(|title| !title.trim().is_empty())
    }
}

/// Decoded payload of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSet {
    Coupons(Vec<Coupon>),
    Coupon(Coupon),
}

impl RecordSet {
    /// Flatten into a list, whatever shape the response had.
    pub fn into_coupons(self) -> Vec<Coupon> {
        match self {
            RecordSet::Coupons(coupons) => coupons,
            RecordSet::Coupon(coupon) => vec![coupon],
        }
    }

    /// The single record, or the first one of a list.
    pub fn into_coupon(self) -> Option<Coupon> {
        match self {
            RecordSet::Coupons(coupons) => coupons.into_iter().next(),
            RecordSet::Coupon(coupon) => Some(coupon),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CouponEnvelope {
    pub coupon: Coupon,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CouponsEnvelope {
    #[serde(default)]
    pub coupons: Vec<CouponEnvelope>,
}

impl From<CouponsEnvelope> for RecordSet {
    fn from(envelope: CouponsEnvelope) -> Self {
        RecordSet::Coupons(envelope.coupons.into_iter().map(|e| e.coupon).collect())
    }
}

impl From<CouponEnvelope> for RecordSet {
    fn from(envelope: CouponEnvelope) -> Self {
        RecordSet::Coupon(envelope.coupon)
    }
}
