use std::net::SocketAddr;

use clap::Parser;

/// Command-line arguments for the weather HTTP service.
#[derive(Debug, Parser)]
#[command(name = "weather-api", version, about = "Weather lookup HTTP service")]
pub struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,
}
