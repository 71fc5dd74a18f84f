//! gpumon - GPU monitoring dashboard backend
//!
//! Serves live per-GPU and per-process metrics aggregated from Prometheus.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use gpumon_dashboard::{DashboardConfig, DashboardServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gpumon")]
#[command(about = "GPU monitoring dashboard backend")]
#[command(version)]
struct Cli {
    /// Address to serve the API on
    #[arg(long, env = "GPUMON_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Prometheus base URL
    #[arg(long, env = "PROMETHEUS_URL", default_value = "http://localhost:9090")]
    prometheus_url: String,

    /// Bound on one metrics or processes request, in seconds
    #[arg(long, env = "GPUMON_QUERY_TIMEOUT_SECS", default_value_t = 30)]
    query_timeout_secs: u64,

    /// Bound on the health probe, in seconds
    #[arg(long, env = "GPUMON_HEALTH_TIMEOUT_SECS", default_value_t = 5)]
    health_timeout_secs: u64,

    /// Allowed CORS origins, comma separated (default: any)
    #[arg(long, env = "GPUMON_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// Emit logs as JSON
    #[arg(long, env = "GPUMON_LOG_JSON")]
    log_json: bool,
}

impl Cli {
    fn into_config(self) -> DashboardConfig {
        let mut config = DashboardConfig::new(self.bind)
            .with_prometheus_url(self.prometheus_url)
            .with_query_timeout(Duration::from_secs(self.query_timeout_secs))
            .with_health_timeout(Duration::from_secs(self.health_timeout_secs));

        for origin in self.cors_origins {
            let origin = origin.trim();
            if !origin.is_empty() {
                config = config.with_cors_origin(origin);
            }
        }
        config
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.into_config();
    info!(
        bind = %config.bind_addr,
        prometheus = %config.prometheus_url,
        query_timeout = ?config.query_timeout,
        "starting gpumon"
    );

    let addr = config.bind_addr;
    let server = DashboardServer::new(config)?;
    server.serve_with_shutdown(addr, shutdown_signal()).await?;

    Ok(())
}
