use crate::io_struct::{ChatMessage, UpstreamRequest};
use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use futures::StreamExt;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderValue};

pub const GITHUB_COPILOT_URL: &str = "https://api.githubcopilot.com/chat/completions";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub upstream_url: String,
    /// Seconds; `None` leaves the upstream call unbounded.
    pub timeout: Option<u64>,
    pub log_level: log::LevelFilter,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            upstream_url: GITHUB_COPILOT_URL.to_string(),
            timeout: None,
            log_level: log::LevelFilter::Info,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelayState {
    pub client: reqwest::Client,
    pub upstream_url: Url,
}

impl RelayState {
    pub fn new(relay_config: &RelayConfig) -> anyhow::Result<Self> {
        let upstream_url = Url::parse(&relay_config.upstream_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = relay_config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(timeout));
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            upstream_url,
        })
    }

    /// Forwards `messages` upstream and streams the reply back chunk by chunk
    /// under the upstream status, rejections included.
    ///
    /// `token` is copied into `Authorization` byte for byte; when absent no
    /// `Authorization` header is sent.
    pub async fn relay(
        &self,
        token: Option<&[u8]>,
        messages: Vec<ChatMessage>,
    ) -> Result<HttpResponse, actix_web::Error> {
        let body = UpstreamRequest::streaming(messages);
        let mut request = self.client.post(self.upstream_url.clone()).json(&body);
        if let Some(token) = token {
            // Bytes come from an already parsed inbound header, so this never fails.
            let mut value = HeaderValue::from_bytes(token)
                .map_err(actix_web::error::ErrorInternalServerError)?;
            value.set_sensitive(true);
            request = request.header(AUTHORIZATION, value);
        }

        log::debug!(
            "Forwarding {} messages to {}",
            body.messages.len(),
            self.upstream_url
        );
        let resp = request.send().await.map_err(|e| {
            log::error!("Upstream request failed: {}", e);
            actix_web::error::ErrorBadGateway(e)
        })?;

        let status = actix_web::http::StatusCode::from_u16(resp.status().as_u16()).map_err(|e| {
            actix_web::error::ErrorBadGateway(format!("Invalid status code: {}", e))
        })?;
        if !status.is_success() {
            log::warn!("Upstream responded with {}, relaying its body", status);
        }

        // The reqwest response lives inside this stream, so the upstream
        // connection is released whenever actix drops the body.
        let resp_stream = resp
            .bytes_stream()
            .map(|r| r.map_err(actix_web::error::ErrorBadGateway));
        Ok(HttpResponse::build(status)
            .content_type(ContentType::json())
            .streaming(resp_stream))
    }
}
