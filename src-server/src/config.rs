use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use affiliate_roi_core::projections::ProjectionAssumptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Pause before each projection so clients can show a loading state
    pub simulated_delay: Duration,
    pub assumptions_path: Option<PathBuf>,
    pub log_format: LogFormat,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("AFFILIATE_ROI_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("AFFILIATE_ROI_PORT")
            .map(|p| p.parse().context("AFFILIATE_ROI_PORT must be a port number"))
            .transpose()?
            .unwrap_or(8088);
        let listen_addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

        let delay_ms: u64 = lookup("AFFILIATE_ROI_SIMULATED_DELAY_MS")
            .map(|d| {
                d.parse()
                    .context("AFFILIATE_ROI_SIMULATED_DELAY_MS must be whole milliseconds")
            })
            .transpose()?
            .unwrap_or(0);

        let timeout_secs: u64 = lookup("AFFILIATE_ROI_REQUEST_TIMEOUT_SECS")
            .map(|t| {
                t.parse()
                    .context("AFFILIATE_ROI_REQUEST_TIMEOUT_SECS must be whole seconds")
            })
            .transpose()?
            .unwrap_or(30);

        let log_format = match lookup("AFFILIATE_ROI_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("text") | None => LogFormat::Text,
            Some(other) => anyhow::bail!("Unknown AFFILIATE_ROI_LOG_FORMAT '{}'", other),
        };

        let simulated_delay = Duration::from_millis(delay_ms);
        let request_timeout = Duration::from_secs(timeout_secs);
        if simulated_delay >= request_timeout {
            anyhow::bail!(
                "AFFILIATE_ROI_SIMULATED_DELAY_MS ({:?}) must be shorter than the request timeout ({:?})",
                simulated_delay,
                request_timeout
            );
        }

        Ok(Self {
            listen_addr,
            simulated_delay,
            assumptions_path: lookup("AFFILIATE_ROI_ASSUMPTIONS").map(PathBuf::from),
            log_format,
            request_timeout,
        })
    }

    pub fn load_assumptions(&self) -> anyhow::Result<ProjectionAssumptions> {
        let Some(path) = &self.assumptions_path else {
            return Ok(ProjectionAssumptions::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read assumptions file {}", path.display()))?;
        ProjectionAssumptions::from_json(&json)
            .with_context(|| format!("Invalid assumptions file {}", path.display()))
    }
}
