use clap::Parser;
use scout_core::{CredentialReport, OrchestratorConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "scout")]
#[command(about = "Scout competitive-intelligence brief service")]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "SCOUT_HTTP_ADDR", default_value = "0.0.0.0:8787")]
    pub http_addr: SocketAddr,

    /// Data directory
    #[arg(long, env = "SCOUT_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Serve deterministic demo documents even if a credential exists
    #[arg(long, env = "SCOUT_DEMO_MODE", default_value = "false")]
    pub demo_mode: bool,

    /// Wall-clock budget for brief generation (seconds)
    #[arg(long, env = "SCOUT_GENERATE_TIMEOUT", default_value = "50")]
    pub generate_timeout: u64,

    /// Wall-clock budget for analyze/research calls (seconds)
    #[arg(long, env = "SCOUT_DERIVE_TIMEOUT", default_value = "35")]
    pub derive_timeout: u64,

    /// Simulated latency before demo documents are returned (milliseconds)
    #[arg(long, env = "SCOUT_MOCK_DELAY_MS", default_value = "1500")]
    pub mock_delay_ms: u64,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("briefs.redb")
    }

    pub fn orchestrator_config(&self, credential: CredentialReport) -> OrchestratorConfig {
        let mut config = OrchestratorConfig::new(credential);
        config.generation_disabled = self.demo_mode;
        config.generate_timeout = Duration::from_secs(self.generate_timeout);
        config.derive_timeout = Duration::from_secs(self.derive_timeout);
        config.mock_delay = Duration::from_millis(self.mock_delay_ms);
        config
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8787".parse().unwrap(),
            data_dir: PathBuf::from("./data"),
            demo_mode: false,
            generate_timeout: 50,
            derive_timeout: 35,
            mock_delay_ms: 1500,
        }
    }
}
