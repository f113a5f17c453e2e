//! Configuration for the sidecar.
//!
//! The deployment this sidecar targets is fixed: listen on port 80, proxy to
//! the legacy service on port 3333. These are constants of the environment,
//! not tunables, so there is no config file. The struct exists so tests can
//! run the proxy against ephemeral ports.

use serde::{Deserialize, Serialize};

/// Runtime configuration for the sidecar process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SidecarConfig {
    /// Address the proxy listens on (e.g., "0.0.0.0:80").
    pub listen_address: String,

    /// Port the legacy service listens on inside its container.
    pub backend_port: u16,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:80".to_string(),
            backend_port: 3333,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment_constants() {
        let config = SidecarConfig::default();
        assert_eq!(config.listen_address, "0.0.0.0:80");
        assert_eq!(config.backend_port, 3333);
    }
}
