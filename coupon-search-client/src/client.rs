use crate::accumulator::PageAccumulator;
use crate::cache::{CacheStats, SingleFetchCache};
use crate::dedup::dedupe_by_title;
use crate::diagnostics::{DiagnosticLog, LogDiagnostics, LogEntry, RecordKind};
use crate::transport::{CouponTransport, Request, Resource, SurfTransport};
use crate::{ClientConfig, Coupon, CouponId, ExpiryResolver, QueryOptions, RecordSet, Result};
use getset::Getters;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything the client remembers between calls.
///
/// Kept behind one lock so the paging state and the single fetch slots are
/// always read and written together.
#[derive(Debug, Default)]
pub struct ClientState {
    pub pages: PageAccumulator,
    pub single_fetch: SingleFetchCache,
}

impl ClientState {
    pub fn new(cache_enabled: bool) -> Self {
        Self {
            pages: PageAccumulator::new(),
            single_fetch: SingleFetchCache::new(cache_enabled),
        }
    }
}

#[derive(Clone, Getters)]
pub struct CouponClient {
    transport: Arc<dyn CouponTransport>,
    diagnostics: Arc<dyn DiagnosticLog>,
    #[get = "pub"]
    expiry: ExpiryResolver,
    #[get = "pub"]
    config: ClientConfig,
    state: Arc<Mutex<ClientState>>,
}

impl Default for CouponClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl CouponClient {
    /// Create a client talking HTTP to `config.base_url`
    pub fn new(config: ClientConfig) -> Self {
        let transport = SurfTransport::new(config.clone());
        Self::with_transport(config, transport)
    }

    /// Create a client on top of any transport
    pub fn with_transport(config: ClientConfig, transport: impl CouponTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            diagnostics: Arc::new(LogDiagnostics),
            expiry: ExpiryResolver::new(),
            state: Arc::new(Mutex::new(ClientState::new(*config.cache_enabled()))),
            config,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: impl DiagnosticLog + 'static) -> Self {
        self.diagnostics = Arc::new(diagnostics);
        self
    }

    pub fn with_expiry_resolver(mut self, expiry: ExpiryResolver) -> Self {
        self.expiry = expiry;
        self
    }

    /// Search coupons. Repeating the previous call with the same options is
    /// answered without a fetch. With `uniq` set, coupons sharing a title
    /// are collapsed.
    pub async fn coupons(&self, options: QueryOptions) -> Result<Vec<Coupon>> {
        let mut state = self.state.lock().await;
        self.coupons_locked(&mut state, options).await
    }

    /// Look up a single coupon. `None` if the API has no such coupon.
    pub async fn coupon_by_id(&self, id: CouponId, options: QueryOptions) -> Result<Option<Coupon>> {
        let mut state = self.state.lock().await;
        let options = self.expiry.normalize(options);
        let request = Request::new(Resource::Coupon(id), &options);

        let coupon = match state.single_fetch.lookup_coupon(id, &options) {
            Some(coupon) => Some(coupon),
            None => {
                let fetched = self
                    .transport
                    .fetch(&request)
                    .await?
                    .and_then(RecordSet::into_coupon);
                state.single_fetch.store_coupon(options.clone(), fetched.clone());
                fetched
            }
        };

        self.record(&request, coupon.as_slice(), RecordKind::Coupon, &options);
        Ok(coupon)
    }

    /// Accumulate coupons across pages of one logical query.
    ///
    /// Each page is fetched at most once while the query stays the same;
    /// changing anything but `page` or `uniq` starts over.
    pub async fn total_coupons(&self, options: QueryOptions) -> Result<Vec<Coupon>> {
        let mut state = self.state.lock().await;
        let options = self.expiry.normalize(options);

        state.pages.track(&options.fingerprint());

        let page = options.effective_page();
        if state.pages.is_cached(page) {
            log::debug!("Page {} already accumulated", page);
            return Ok(state.pages.coupons().to_vec());
        }

        let coupons = self.coupons_locked(&mut state, options).await?;
        state.pages.merge(page, coupons);
        Ok(state.pages.coupons().to_vec())
    }

    /// URL of a coupon's image, nothing is fetched
    pub fn impression(&self, id: CouponId, options: QueryOptions) -> Result<String> {
        let options = self.expiry.normalize(options);
        let request = Request::new(Resource::CouponImage(id), &options);
        Ok(request.uri(self.config.base_url())?.to_string())
    }

    /// Get cache statistics
    pub async fn cache_stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            single_fetch: state.single_fetch.stats(),
            cached_pages: state.pages.cached_pages().len(),
            accumulated_coupons: state.pages.coupons().len(),
        }
    }

    /// Pages accumulated for the current query
    pub async fn cached_pages(&self) -> Vec<String> {
        self.state.lock().await.pages.cached_pages()
    }

    /// Forget accumulated pages and both single fetch slots
    pub async fn clear_cache(&self) {
        let mut state = self.state.lock().await;
        state.pages.clear();
        state.single_fetch.clear();
        log::info!("Coupon cache cleared");
    }

    async fn coupons_locked(&self, state: &mut ClientState, options: QueryOptions) -> Result<Vec<Coupon>> {
        let options = self.expiry.normalize(options);
        let request = Request::new(Resource::Coupons, &options);

        let coupons = match state.single_fetch.lookup_coupons(&options) {
            Some(coupons) => coupons,
            None => {
                let uniq = options.uniq;
                let mut fetched = self
                    .transport
                    .fetch(&request)
                    .await?
                    .map(RecordSet::into_coupons)
                    .unwrap_or_default();
                if uniq {
                    fetched = dedupe_by_title(fetched);
                }
                state.single_fetch.store_coupons(options.clone(), fetched.clone());
                fetched
            }
        };

        self.record(&request, &coupons, RecordKind::Coupons, &options);
        Ok(coupons)
    }

    /// Report a request to the diagnostic sink. The logged options are the
    /// ones that went over the wire, so `uniq` is cleared.
    fn record(&self, request: &Request, records: &[Coupon], kind: RecordKind, options: &QueryOptions) {
        let sent = QueryOptions {
            uniq: false,
            ..options.clone()
        };
        let entry = LogEntry {
            uri: request.diagnostic_uri(self.config.base_url()),
            records,
            kind,
            opts: &sent,
        };
        if let Err(err) = self.diagnostics.log(&entry) {
            log::warn!("Failed to record {} diagnostics for {}: {}", kind, entry.uri, err);
        }
    }
}
