//! Node configuration loading.
//!
//! Order: built-in defaults, then the JSON file named by `MF_CONFIG`, then
//! individual environment overrides. An override that does not parse is
//! logged and skipped.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use mf_02_message_gateway::GatewayConfig;
use tracing::{info, warn};

pub const CONFIG_PATH_VAR: &str = "MF_CONFIG";

/// Load configuration from the process environment
pub fn load_config() -> Result<GatewayConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable source
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<GatewayConfig> {
    let config = match lookup(CONFIG_PATH_VAR) {
        Some(path) => read_config_file(Path::new(&path))?,
        None => GatewayConfig::default(),
    };
    Ok(apply_overrides(config, lookup))
}

fn read_config_file(path: &Path) -> Result<GatewayConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    info!(path = %path.display(), "Loaded configuration file");
    Ok(config)
}

/// Apply `MF_*` environment overrides on top of `config`
pub fn apply_overrides(
    mut config: GatewayConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> GatewayConfig {
    if let Some(host) = lookup("MF_HTTP_HOST") {
        match host.parse() {
            Ok(h) => config.http.host = h,
            Err(_) => warn!(value = %host, "MF_HTTP_HOST is not an IP address, ignoring"),
        }
    }
    if let Some(port) = lookup("MF_HTTP_PORT") {
        match port.parse() {
            Ok(p) => config.http.port = p,
            Err(_) => warn!(value = %port, "MF_HTTP_PORT is not a valid port, ignoring"),
        }
    }
    if let Some(size) = lookup("MF_MAX_REQUEST_SIZE") {
        match size.parse() {
            Ok(s) => config.limits.max_request_size = s,
            Err(_) => warn!(value = %size, "MF_MAX_REQUEST_SIZE is not a byte count, ignoring"),
        }
    }
    if let Some(secs) = lookup("MF_REQUEST_TIMEOUT_SECS") {
        match secs.parse() {
            Ok(s) => config.timeouts.request = Duration::from_secs(s),
            Err(_) => warn!(value = %secs, "MF_REQUEST_TIMEOUT_SECS is not a number, ignoring"),
        }
    }
    if let Some(limit) = lookup("MF_DEFAULT_LIMIT") {
        match limit.parse() {
            Ok(l) => config.feed.default_limit = l,
            Err(_) => warn!(value = %limit, "MF_DEFAULT_LIMIT is not a number, ignoring"),
        }
    }
    if let Some(dir) = lookup("MF_STAGING_DIR") {
        config.uploads.staging_dir = Some(PathBuf::from(dir));
    }

    config
}
