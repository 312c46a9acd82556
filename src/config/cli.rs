use crate::config::toml_config::PortfolioConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "researcher-portfolio")]
#[command(about = "Builds the data bundle of an academic portfolio page")]
pub struct CliArgs {
    /// Path to TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the researcher identifier from config
    #[arg(long)]
    pub scholar_id: Option<String>,

    /// Override the scholar index endpoint from config
    #[arg(long)]
    pub scholar_endpoint: Option<String>,

    /// Override the output directory from config
    #[arg(long)]
    pub output_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Show what would be built without contacting the index or writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// 應用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut PortfolioConfig) {
        if let Some(id) = &self.scholar_id {
            tracing::info!("🔧 Scholar id overridden to: {}", id);
            config.scholar.id = id.clone();
        }
        if let Some(endpoint) = &self.scholar_endpoint {
            tracing::info!("🔧 Scholar endpoint overridden to: {}", endpoint);
            config.scholar.endpoint = endpoint.clone();
        }
        if let Some(path) = &self.output_path {
            tracing::info!("🔧 Output path overridden to: {}", path);
            config.output.output_path = path.clone();
        }
    }
}
