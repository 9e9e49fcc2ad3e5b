use crate::error::Result;
pub use clap::Parser;

/// Origins allowed to make cross-origin requests when none are configured.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:8080",
    "http://localhost:1234",
    "http://movies.com",
    "http://midu.dev",
];

#[derive(Debug, Clone, clap::Parser)]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 1234,
        env = "MVS_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,

    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "MVS_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long = "allowed-origin",
        env = "MVS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_ALLOWED_ORIGINS.iter().map(|origin| origin.to_string()),
        help = "Origin allowed for cross-origin requests, may be repeated"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "MVS_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }
}
