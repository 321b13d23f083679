use std::time::Instant;

use surf::middleware::{Middleware, Next};
use surf::{Client, Request, Response, Result};

/// Logs every outgoing request together with its status and latency.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfLogging;

#[surf::utils::async_trait]
impl Middleware for SurfLogging {
    async fn handle(&self, req: Request, client: Client, next: Next<'_>) -> Result<Response> {
        let method = req.method();
        let url = req.url().clone();
        log::debug!("-> {} {}", method, url);

        let started = Instant::now();
        let res = next.run(req, client).await;
        let elapsed = started.elapsed();

        match &res {
            Ok(response) => log::debug!(
                "<- {} {} {} ({:?})",
                method,
                url,
                response.status(),
                elapsed
            ),
            Err(err) => log::warn!("<- {} {} failed after {:?}: {}", method, url, elapsed, err),
        }

        res
    }
}
