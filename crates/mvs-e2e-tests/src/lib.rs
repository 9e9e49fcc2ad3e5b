use std::time::Duration;

use anyhow::{Result, anyhow};
use mvs_app::state::AppState;
use mvs_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use url::Url;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, std::time::Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

/// Builds a server config on a random free port; extra CLI args are passed
/// through to clap.
pub fn test_config(extra_args: &[&str]) -> Result<(ServerConfig, Url)> {
    let port = random_port()?;
    let port = port.to_string();
    let mut args = vec!["mvs-e2e-tests", "--port", &port];
    args.extend_from_slice(extra_args);
    let config = ServerConfig::try_parse_from(&args)?;
    let base_url = Url::parse(&format!("http://localhost:{}", port))?;
    Ok((config, base_url))
}

/// Stops the spawned server on drop.
pub struct ServerGuard {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

/// Launches the server with the bundled dataset.
pub async fn launch_env(args: ServerConfig) -> Result<(reqwest::Client, ServerGuard)> {
    let state = mvs_server::build_state()?;
    launch_env_with_state(args, state).await
}

/// Launches the server with caller-provided state, so tests can run against
/// an isolated store.
pub async fn launch_env_with_state(
    args: ServerConfig,
    state: AppState,
) -> Result<(reqwest::Client, ServerGuard)> {
    let port = args.port;
    let (shutdown_sender, shutdown_receiver) = oneshot::channel();
    let handle = tokio::spawn(async move {
        if let Err(e) = mvs_server::run_graceful_with_state(args, state, async {
            let _ = shutdown_receiver.await;
        })
        .await
        {
            tracing::error!("Server failed: {e}");
        }
    });

    let client = reqwest::Client::new();
    let health_url = format!("http://localhost:{}/health", port);
    let mut retries = 50;
    loop {
        match client.get(&health_url).send().await {
            Ok(response) if response.status().is_success() => break,
            _ if retries == 0 => return Err(anyhow!("Server did not come up")),
            _ => {
                retries -= 1;
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        }
    }

    Ok((
        client,
        ServerGuard {
            shutdown: Some(shutdown_sender),
            handle,
        },
    ))
}

pub fn extend_url(url: &Url, segment: impl ToString) -> Url {
    let mut url = url.clone();
    url.path_segments_mut()
        .expect("Base URL cannot hold a path")
        .push(&segment.to_string());
    url
}
