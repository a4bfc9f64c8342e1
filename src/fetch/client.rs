use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes HTTP requests; the seam that lets fetches be stubbed in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
