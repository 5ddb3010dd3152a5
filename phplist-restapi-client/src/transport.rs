use crate::error::Error;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Seam between the client and the HTTP layer.
///
/// The production implementation is [`ReqwestTransport`]; tests substitute
/// their own to script responses without a network.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Posts a form-encoded body to `url` and returns the raw response body.
    async fn post_form(&self, url: &Url, params: &[(String, String)]) -> Result<String, Error>;
}

/// Default transport: a reqwest client with a fixed 10 second timeout and a
/// cookie jar, so a session cookie set by `login` persists across calls.
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .cookie_store(true)
            .build()
            .expect("default reqwest client is buildable");
        Self { http }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(&self, url: &Url, params: &[(String, String)]) -> Result<String, Error> {
        let resp = self.http.post(url.clone()).form(params).send().await?;
        Ok(resp.text().await?)
    }
}
