use crate::coupon::{CouponEnvelope, CouponsEnvelope};
use crate::{ClientConfig, CouponId, Error, QueryOptions, RecordSet, Result};
use ::utils::surf_logging::SurfLogging;
use ::utils::uri;
use async_trait::async_trait;
use surf::{Client, StatusCode};
use url::Url;

/// API resource addressed by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Coupons,
    Coupon(CouponId),
    CouponImage(CouponId),
}

impl Resource {
    pub fn path(&self) -> String {
        match self {
            Resource::Coupons => "coupons".to_string(),
            Resource::Coupon(id) => format!("coupons/{}", id),
            Resource::CouponImage(id) => format!("coupons/{}/image", id),
        }
    }

    /// Whether the resource answers with coupon records. Images are only
    /// ever linked to, never fetched.
    pub fn has_records(&self) -> bool {
        !matches!(self, Resource::CouponImage(_))
    }
}

/// A resource plus the wire parameters for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    resource: Resource,
    params: Vec<(String, String)>,
}

impl Request {
    pub fn new(resource: Resource, options: &QueryOptions) -> Self {
        Self {
            resource,
            params: options.query_pairs(),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn uri(&self, base_url: &str) -> Result<Url> {
        Ok(uri::query_uri(base_url, &self.resource.path(), &self.params)?)
    }

    /// Human readable form of the request; never fails.
    pub fn diagnostic_uri(&self, base_url: &str) -> String {
        match self.uri(base_url) {
            Ok(url) => url.to_string(),
            Err(_) => uri::raw_request(&self.resource.path(), &self.params),
        }
    }
}

/// Performs a request against the search API and decodes the response.
///
/// `Ok(None)` means the API had nothing for the request, which callers treat
/// as an empty result rather than a failure.
#[async_trait]
pub trait CouponTransport: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Option<RecordSet>>;
}

/// HTTP transport backed by surf
#[derive(Clone)]
pub struct SurfTransport {
    http: Client,
    config: ClientConfig,
}

impl SurfTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new().with(SurfLogging),
            config,
        }
    }

    fn not_fetchable(resource: Resource) -> Error {
        Error::Transport(format!("{} does not return coupon records", resource.path()))
    }

    fn decode(resource: Resource, body: &str) -> Result<RecordSet> {
        let records: RecordSet = match resource {
            Resource::Coupons => serde_json::from_str::<CouponsEnvelope>(body)?.into(),
            Resource::Coupon(_) => serde_json::from_str::<CouponEnvelope>(body)?.into(),
            Resource::CouponImage(_) => return Err(Self::not_fetchable(resource)),
        };
        Ok(records)
    }
}

#[async_trait]
impl CouponTransport for SurfTransport {
    async fn fetch(&self, request: &Request) -> Result<Option<RecordSet>> {
        if !request.resource().has_records() {
            return Err(Self::not_fetchable(request.resource()));
        }
        let url = request.uri(self.config.base_url())?;

        let mut builder = self.http.get(url.as_str());
        if let Some(token) = self.config.auth_token() {
            builder = builder.header("Authorization", format!("api_key {}", token));
        }

        let mut response = builder.await?;
        let status = response.status();
        if status == StatusCode::NotFound {
            log::debug!("{} returned 404", url);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Transport(format!("{} returned {}", url, status)));
        }

        let body = response.body_string().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Self::decode(request.resource(), &body).map(Some)
    }
}
