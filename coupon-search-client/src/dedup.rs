//! Collapses coupons that the API returns several times under different ids.
//!
//! Two records with the same title are treated as the same offer. The last
//! record seen for a title survives, and titles keep the order in which they
//! first appeared.

use crate::Coupon;
use std::collections::HashMap;

pub fn dedupe_by_title(coupons: Vec<Coupon>) -> Vec<Coupon> {
    let mut kept: Vec<Coupon> = vec![];
    let mut index: HashMap<String, usize> = HashMap::new();

    for coupon in coupons {
        if !coupon.has_title() {
            continue;
        }
        let title = coupon.title.clone().unwrap_or_default();
        match index.get(&title) {
            Some(&slot) => kept[slot] = coupon,
            None => {
                index.insert(title, kept.len());
                kept.push(coupon);
            }
        }
    }

    kept
}
