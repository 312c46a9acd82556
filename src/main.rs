use anyhow::Context;
use clap::Parser;
use researcher_portfolio::config::cli::CliArgs;
use researcher_portfolio::utils::{logger, validation::Validate};
use researcher_portfolio::{
    BuildEngine, HttpScholarSource, LocalStorage, PortfolioConfig, PortfolioPipeline,
    ProfileDataProvider, ProviderSettings,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting researcher-portfolio build");

    // 載入 TOML 配置
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match PortfolioConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => {
            tracing::info!("📁 No config file given, using built-in profile");
            PortfolioConfig::default()
        }
    };

    args.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no lookup and no files written");
        return Ok(());
    }

    let source = HttpScholarSource::new(config.scholar_endpoint(), config.lookup_timeout())
        .context("failed to build the scholar index HTTP client")?;
    let provider = Arc::new(ProfileDataProvider::new(
        source,
        ProviderSettings::from_config(&config),
    ));
    let storage = LocalStorage::new(config.output_path());
    let pipeline = PortfolioPipeline::new(storage, config, provider);
    let engine = BuildEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Portfolio bundle built successfully!");
            println!("✅ Portfolio bundle built successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Portfolio build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.cli_report());

            // 根據錯誤嚴重程度決定退出碼
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &PortfolioConfig, args: &CliArgs) {
    println!("📋 Configuration Summary:");
    println!("  Site: {}", config.site.title);
    println!("  Researcher: {} ({})", config.profile.name, config.scholar_id());
    println!("  Scholar index: {}", config.scholar_endpoint());
    println!("  Lookup timeout: {}s", config.lookup_timeout().as_secs());
    println!(
        "  Cache TTL: {}s live / {}s fallback",
        config.cache_ttl().as_secs(),
        config.fallback_ttl().as_secs()
    );
    println!("  Output: {}/{}", config.output_path(), config.bundle_name());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

