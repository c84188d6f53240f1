use std::time::Duration;

use clap::Parser;
use server::{ReadLimits, Server, config};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "http10-server", about = "Reads one HTTP/1.0 request per connection")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "HTTP10_BIND", default_value = "127.0.0.1:8080")]
    bind: String,

    /// Scratch buffer size per connection, in bytes
    #[arg(long, env = "HTTP10_BUFFER_SIZE", default_value_t = config::DEFAULT_BUFFER_CAPACITY)]
    buffer_size: usize,

    /// Largest accepted request (headers plus body), in bytes
    #[arg(long, env = "HTTP10_MAX_REQUEST_SIZE", default_value_t = config::DEFAULT_MAX_REQUEST_SIZE)]
    max_request_size: usize,

    /// Per-read deadline in milliseconds; unset blocks indefinitely
    #[arg(long, env = "HTTP10_READ_TIMEOUT_MS")]
    read_timeout_ms: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, env = "HTTP10_LOG_JSON")]
    log_json: bool,
}

fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    shared::init_logging(args.log_json);

    let limits = ReadLimits::new()
        .with_buffer_capacity(args.buffer_size)
        .with_max_request_size(args.max_request_size)
        .with_read_timeout(
            args.read_timeout_ms
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis),
        );

    let server = Server::bind(args.bind.as_str(), limits).expect("Failed to bind listener");

    let served = server.serve(|peer, result| match result {
        Ok(request) => info!(
            method = request.method(),
            target = request.target(),
            version = request.version(),
            headers = request.headers().len(),
            body_len = request.body().len(),
            "Request from {}",
            peer
        ),
        Err(e) => info!(
            kind = ?e.kind(),
            "Dropped request from {}: {}",
            peer,
            e.kind().description()
        ),
    });

    if let Err(e) = served {
        error!("Accept loop stopped: {}", e);
        std::process::exit(1);
    }
}
