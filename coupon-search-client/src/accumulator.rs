use crate::{Coupon, CouponId, Fingerprint};
use std::collections::HashSet;

/// Coupons gathered page by page for one logical query.
///
/// The page set and the accumulated list belong to the fingerprint they were
/// collected under and are dropped together when it changes.
#[derive(Debug, Clone, Default)]
pub struct PageAccumulator {
    fingerprint: Option<Fingerprint>,
    pages: HashSet<String>,
    coupons: Vec<Coupon>,
    ids: HashSet<CouponId>,
}

impl PageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `fingerprint`, discarding everything collected under a
    /// different one. Returns whether a reset happened.
    pub fn track(&mut self, fingerprint: &Fingerprint) -> bool {
        if self.fingerprint.as_ref() == Some(fingerprint) {
            return false;
        }

        if self.fingerprint.is_some() {
            log::info!(
                "Query changed, dropping {} coupons from {} pages",
                self.coupons.len(),
                self.pages.len()
            );
        }
        self.fingerprint = Some(fingerprint.clone());
        self.pages.clear();
        self.coupons.clear();
        self.ids.clear();
        true
    }

    pub fn is_cached(&self, page: u32) -> bool {
        self.pages.contains(&page.to_string())
    }

    /// Append the coupons of `page`, skipping ids already held, and mark the
    /// page as fetched. An empty page leaves everything as it was.
    pub fn merge(&mut self, page: u32, coupons: Vec<Coupon>) {
        if coupons.is_empty() {
            log::debug!("Page {} returned no coupons, not marking it", page);
            return;
        }

        let before = self.coupons.len();
        for coupon in coupons {
            if self.ids.insert(coupon.id) {
                self.coupons.push(coupon);
            }
        }
        self.pages.insert(page.to_string());
        log::debug!(
            "Merged page {}: {} new coupons, {} total",
            page,
            self.coupons.len() - before,
            self.coupons.len()
        );
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Fetched page identifiers, sorted.
    pub fn cached_pages(&self) -> Vec<String> {
        let mut pages: Vec<String> = self.pages.iter().cloned().collect();
        pages.sort();
        pages
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    pub fn clear(&mut self) {
        self.fingerprint = None;
        self.pages.clear();
        self.coupons.clear();
        self.ids.clear();
    }
}
