//! Server settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
// Placeholder demo credential mirroring the reference deployment. A real
// deployment replaces this with issued credentials via INVOICING_DEMO_TOKEN.
const DEFAULT_DEMO_TOKEN: &str = "demo-token-compA";
const DEFAULT_DEMO_COMPANY: &str = "compA";

/// Configuration values controlling the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INVOICING")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Seed the canonical demo data at startup.
    #[ortho_config(default = true, cli_default_as_absent)]
    pub seed: bool,
    /// Bearer-token value resolving to the demo company.
    pub demo_token: Option<String>,
    /// Company identity the demo token resolves to.
    pub demo_company: Option<String>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured demo token, falling back to the default.
    pub fn demo_token(&self) -> &str {
        self.demo_token.as_deref().unwrap_or(DEFAULT_DEMO_TOKEN)
    }

    /// Return the configured demo company id, falling back to the default.
    pub fn demo_company(&self) -> &str {
        self.demo_company.as_deref().unwrap_or(DEFAULT_DEMO_COMPANY)
    }
}
