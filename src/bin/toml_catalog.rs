use clap::Parser;
use outlet_catalog::config::toml_config::TomlConfig;
use outlet_catalog::domain::model::ImageMode;
use outlet_catalog::domain::ports::ConfigProvider;
use outlet_catalog::utils::{logger, validation::Validate};
use outlet_catalog::{CatalogEngine, CatalogPipeline, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-catalog")]
#[command(about = "Catalog generator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "catalog-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based catalog generator");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(".");
    let pipeline = CatalogPipeline::new(storage, config);

    // 創建引擎並運行
    let engine = CatalogEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Catalog generated successfully!");
            println!("✅ Catalog generated successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Catalog generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                outlet_catalog::utils::error::ErrorSeverity::Low => 0,
                outlet_catalog::utils::error::ErrorSeverity::Medium => 2,
                outlet_catalog::utils::error::ErrorSeverity::High => 1,
                outlet_catalog::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!("  Listing: {}", config.listing_path());
    println!("  Pricing: {}", config.pricing_path());
    println!("  Image dir: {}", config.image_dir());

    match config.image_mode() {
        ImageMode::Remote => {
            println!("  Image mode: remote");
            if let Some(base_url) = config.image_base_url() {
                println!("  Base URL: {}", base_url);
            }
            println!("  Placeholder: {}", config.placeholder_image());
        }
        ImageMode::Local => println!("  Image mode: local (no placeholder)"),
    }

    println!("  Extensions: {}", config.image_extensions().join(", "));
    println!("  Output: {}", config.output_path());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
