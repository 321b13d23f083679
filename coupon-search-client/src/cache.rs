use crate::{Coupon, CouponId, QueryOptions};
use serde::{Deserialize, Serialize};

/// Last coupon list together with the options that produced it
#[derive(Clone, Debug)]
struct CouponsSlot {
    options: QueryOptions,
    coupons: Vec<Coupon>,
}

/// Last single coupon lookup
#[derive(Clone, Debug)]
struct CouponSlot {
    options: QueryOptions,
    coupon: Option<Coupon>,
}

/// One-slot memo per request kind.
///
/// A fetch is skipped only when the request is identical to the one made
/// immediately before it; anything else overwrites the slot.
#[derive(Clone, Debug)]
pub struct SingleFetchCache {
    enabled: bool,
    coupons: Option<CouponsSlot>,
    coupon: Option<CouponSlot>,
    list_hits: u64,
    list_misses: u64,
    item_hits: u64,
    item_misses: u64,
}

impl Default for SingleFetchCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SingleFetchCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            coupons: None,
            coupon: None,
            list_hits: 0,
            list_misses: 0,
            item_hits: 0,
            item_misses: 0,
        }
    }

    /// Cached list for `options` if the previous list request used exactly
    /// the same options.
    pub fn lookup_coupons(&mut self, options: &QueryOptions) -> Option<Vec<Coupon>> {
        let hit = self
            .coupons
            .as_ref()
            .filter(|slot| self.enabled && slot.options == *options)
            .map(|slot| slot.coupons.clone());

        match hit {
            Some(coupons) => {
                self.list_hits += 1;
                log::debug!("Single fetch cache hit for coupons: {:?}", options);
                Some(coupons)
            }
            None => {
                self.list_misses += 1;
                log::debug!("Single fetch cache miss for coupons: {:?}", options);
                None
            }
        }
    }

    pub fn store_coupons(&mut self, options: QueryOptions, coupons: Vec<Coupon>) {
        self.coupons = Some(CouponsSlot { options, coupons });
    }

    /// Cached coupon `id` if the previous lookup returned that coupon under
    /// the same options.
    pub fn lookup_coupon(&mut self, id: CouponId, options: &QueryOptions) -> Option<Coupon> {
        let hit = self
            .coupon
            .as_ref()
            .filter(|slot| self.enabled && slot.options == *options)
            .and_then(|slot| slot.coupon.as_ref())
            .filter(|coupon| coupon.id == id)
            .cloned();

        match hit {
            Some(coupon) => {
                self.item_hits += 1;
                log::debug!("Single fetch cache hit for coupon {}", id);
                Some(coupon)
            }
            None => {
                self.item_misses += 1;
                log::debug!("Single fetch cache miss for coupon {}", id);
                None
            }
        }
    }

    pub fn store_coupon(&mut self, options: QueryOptions, coupon: Option<Coupon>) {
        self.coupon = Some(CouponSlot { options, coupon });
    }

    /// Drop both slots. Counters are kept.
    pub fn clear(&mut self) {
        self.coupons = None;
        self.coupon = None;
    }

    pub fn stats(&self) -> SingleFetchStats {
        SingleFetchStats {
            list_hits: self.list_hits,
            list_misses: self.list_misses,
            item_hits: self.item_hits,
            item_misses: self.item_misses,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleFetchStats {
    pub list_hits: u64,
    pub list_misses: u64,
    pub item_hits: u64,
    pub item_misses: u64,
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub single_fetch: SingleFetchStats,
    pub cached_pages: usize,
    pub accumulated_coupons: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_misses() {
        let mut cache = SingleFetchCache::default();
        assert!(cache.lookup_coupons(&QueryOptions::new()).is_none());
        assert!(cache.lookup_coupon(1, &QueryOptions::new()).is_none());
        assert_eq!(cache.stats().list_misses, 1);
        assert_eq!(cache.stats().item_misses, 1);
    }

    #[test]
    fn test_coupons_hit_only_on_identical_options() {
        let mut cache = SingleFetchCache::default();
        let options = QueryOptions::new().query("pizza").page(1);
        cache.store_coupons(options.clone(), vec![Coupon::new(1, "A")]);

        assert_eq!(cache.lookup_coupons(&options), Some(vec![Coupon::new(1, "A")]));
        assert!(cache.lookup_coupons(&options.clone().page(2)).is_none());
        assert!(cache.lookup_coupons(&options.clone().uniq(true)).is_none());
        assert_eq!(cache.stats().list_hits, 1);
        assert_eq!(cache.stats().list_misses, 2);
    }

    #[test]
    fn test_empty_list_is_a_result() {
        let mut cache = SingleFetchCache::default();
        let options = QueryOptions::new().query("nothing");
        cache.store_coupons(options.clone(), vec![]);
        assert_eq!(cache.lookup_coupons(&options), Some(vec![]));
    }

    #[test]
    fn test_coupon_requires_matching_id() {
        let mut cache = SingleFetchCache::default();
        let options = QueryOptions::new();
        cache.store_coupon(options.clone(), Some(Coupon::new(42, "A")));

        assert!(cache.lookup_coupon(42, &options).is_some());
        assert!(cache.lookup_coupon(43, &options).is_none());
        assert!(cache.lookup_coupon(42, &options.clone().location("Boston")).is_none());
    }

    #[test]
    fn test_absent_coupon_never_hits() {
        let mut cache = SingleFetchCache::default();
        cache.store_coupon(QueryOptions::new(), None);
        assert!(cache.lookup_coupon(42, &QueryOptions::new()).is_none());
    }

    #[test]
    fn test_disabled_cache_always_misses() {
        let mut cache = SingleFetchCache::new(false);
        let options = QueryOptions::new();
        cache.store_coupons(options.clone(), vec![Coupon::new(1, "A")]);
        cache.store_coupon(options.clone(), Some(Coupon::new(1, "A")));

        assert!(cache.lookup_coupons(&options).is_none());
        assert!(cache.lookup_coupon(1, &options).is_none());
    }

    #[test]
    fn test_clear() {
        let mut cache = SingleFetchCache::default();
        let options = QueryOptions::new();
        cache.store_coupons(options.clone(), vec![]);
        cache.clear();
        assert!(cache.lookup_coupons(&options).is_none());
    }
}
