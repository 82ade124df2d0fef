use crate::io_struct::{GREETING, PromptRequest};
use crate::relay_state::{RelayConfig, RelayState};
use actix_web::{Error, HttpRequest, HttpResponse, HttpServer, error, get, post, web};
use std::io::Write;

pub const GITHUB_TOKEN_HEADER: &str = "x-github-token";

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> Error {
    log::warn!("Rejected prompt request: {}", err);
    match &err {
        error::JsonPayloadError::OverflowKnownLength { length, limit } => {
            error::ErrorPayloadTooLarge(format!(
                "Payload too large: {} bytes exceeds limit of {} bytes",
                length, limit
            ))
        }
        error::JsonPayloadError::Overflow { limit } => {
            error::ErrorPayloadTooLarge(format!("Payload exceeds limit of {} bytes", limit))
        }
        _ => error::ErrorBadRequest(format!("Invalid JSON payload: {}", err)),
    }
}

#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(GREETING)
}

#[post("/")]
pub async fn prompt(
    req: HttpRequest,
    prompt_req: web::Json<PromptRequest>,
    app_state: web::Data<RelayState>,
) -> Result<HttpResponse, Error> {
    let token = req
        .headers()
        .get(GITHUB_TOKEN_HEADER)
        .map(|value| value.as_bytes());
    if token.is_none() {
        log::debug!("No {} header, forwarding without authorization", GITHUB_TOKEN_HEADER);
    }
    let messages = prompt_req.into_inner().with_system_prompt();
    app_state.relay(token, messages).await
}

/// Routes and extractor config shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(root)
        .service(prompt);
}

fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .init();
}

pub async fn startup(relay_config: RelayConfig) -> anyhow::Result<()> {
    init_logging(relay_config.log_level);

    let relay_state = RelayState::new(&relay_config)?;
    log::info!(
        "Starting server at {}:{}, relaying to {}",
        relay_config.host,
        relay_config.port,
        relay_state.upstream_url
    );
    let app_state = web::Data::new(relay_state);

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind((relay_config.host, relay_config.port))?
    .run()
    .await?;

    Ok(())
}
