use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;
use std::sync::Mutex;
use std::time::Duration;

/// Configuration for mock upstream behavior
#[derive(Clone)]
pub struct MockUpstreamConfig {
    pub status: StatusCode,
    pub chunks: Vec<String>,
    pub chunk_delay_ms: u64,
    /// Abort the connection after this many chunks
    pub fail_after: Option<usize>,
}

pub const REJECTION_BODY: &str = "{\"error\":\"unauthorized\"}";

impl Default for MockUpstreamConfig {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            chunks: vec![
                "data: {\"choices\":[{\"delta\":{\"content\":\"# Summary\"}}]}\n\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\"\\nYou MUST\"}}]}\n\n",
                "data: [DONE]\n\n",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            chunk_delay_ms: 10,
            fail_after: None,
        }
    }
}

/// A request as seen by the mock upstream
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

struct MockState {
    config: MockUpstreamConfig,
    captured: Mutex<Vec<CapturedRequest>>,
}

/// In-process chat completions server that records every call it receives
pub struct MockUpstream {
    state: web::Data<MockState>,
    handle: ServerHandle,
    pub url: String,
}

impl MockUpstream {
    pub async fn start(config: MockUpstreamConfig) -> std::io::Result<Self> {
        let state = web::Data::new(MockState {
            config,
            captured: Mutex::new(Vec::new()),
        });

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/chat/completions", web::post().to(chat_completions))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))?;

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Ok(Self {
            state,
            handle,
            url: format!("http://{}/chat/completions", addr),
        })
    }

    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.state.captured.lock().unwrap().clone()
    }

    pub fn expected_body(&self) -> Bytes {
        Bytes::from(self.state.config.chunks.concat())
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn chat_completions(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state.captured.lock().unwrap().push(CapturedRequest {
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    });

    let config = state.config.clone();
    if !config.status.is_success() {
        return HttpResponse::build(config.status).body(REJECTION_BODY);
    }

    let delay = Duration::from_millis(config.chunk_delay_ms);
    let fail_after = config.fail_after.unwrap_or(usize::MAX);
    let chunks = stream::iter(config.chunks.into_iter().enumerate()).then(
        move |(i, chunk)| async move {
            tokio::time::sleep(delay).await;
            if i >= fail_after {
                return Err(actix_web::error::ErrorInternalServerError("upstream went away"));
            }
            Ok(Bytes::from(chunk))
        },
    );
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .streaming(chunks)
}
