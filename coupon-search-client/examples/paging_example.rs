use coupon_search_client::{ClientConfig, CouponClient, QueryOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let token = std::env::var("SQOOT_API_KEY").ok();
    let client = CouponClient::new(ClientConfig::new(coupon_search_client::DEFAULT_BASE_URL, token));
    let options = QueryOptions::new().query("pizza").location("Boston").per_page(20);

    println!("=== Paging ===");
    for page in 1..=3 {
        let start = std::time::Instant::now();
        let total = client.total_coupons(options.clone().page(page)).await?;
        println!("Page {} -> {} coupons in total ({:?})", page, total.len(), start.elapsed());
    }

    // Already accumulated, no request goes out
    let start = std::time::Instant::now();
    let total = client.total_coupons(options.clone().page(2)).await?;
    println!("Page 2 again -> {} coupons ({:?})", total.len(), start.elapsed());

    println!("\n=== Unique titles ===");
    let unique = client.coupons(options.clone().uniq(true)).await?;
    for coupon in &unique {
        println!("{:>8}  {}", coupon.id, coupon.title.as_deref().unwrap_or("-"));
    }

    println!("\nCache stats: {:?}", client.cache_stats().await);
    client.clear_cache().await;
    println!("Cache stats after clear: {:?}", client.cache_stats().await);

    Ok(())
}
