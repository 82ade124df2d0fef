use clap::Parser;
use promptgen_relay_rs::relay_state::{GITHUB_COPILOT_URL, RelayConfig};
use promptgen_relay_rs::server;

#[derive(Parser, Debug)]
#[command(name = "promptgen-relay")]
#[command(about = "PromptGen - prepends prompt-writing guidelines and relays chats to GitHub Copilot")]
struct CliArgs {
    /// Host address to bind the relay server
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the relay server
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Chat completions endpoint requests are relayed to
    #[arg(long, default_value = GITHUB_COPILOT_URL)]
    upstream_url: String,

    /// Upstream request timeout in seconds (unbounded when omitted)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

impl From<CliArgs> for RelayConfig {
    fn from(args: CliArgs) -> Self {
        RelayConfig {
            host: args.host,
            port: args.port,
            upstream_url: args.upstream_url,
            timeout: args.timeout,
            log_level: args.log_level,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let relay_config = RelayConfig::from(CliArgs::parse());
    actix_web::rt::System::new().block_on(server::startup(relay_config))
}
