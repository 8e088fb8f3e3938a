use clap::Parser;
use repair_desk::core::reporting::ReportExporter;
use repair_desk::domain::model::{Appointment, ClientAccount};
use repair_desk::utils::monitor::SystemMonitor;
use repair_desk::utils::{logger, validation::Validate};
use repair_desk::{DeskConfig, LocalStorage};

#[derive(Parser)]
#[command(name = "export-report")]
#[command(about = "Build the appointments/earnings ZIP report from a desk snapshot")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "desk.toml")]
    config: String,

    /// Desk snapshot JSON ({"appointments": [...], "clients": [...]})
    #[arg(short, long, default_value = "desk_snapshot.json")]
    snapshot: String,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, serde::Deserialize)]
struct DeskSnapshot {
    appointments: Vec<Appointment>,
    #[serde(default)]
    clients: Vec<ClientAccount>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting report export");

    let config = match DeskConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let monitor = SystemMonitor::new(monitor_enabled);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 讀取快照
    let raw = std::fs::read_to_string(&args.snapshot)?;
    let snapshot: DeskSnapshot = serde_json::from_str(&raw)?;
    tracing::info!(
        "📂 Snapshot loaded: {} appointments, {} clients",
        snapshot.appointments.len(),
        snapshot.clients.len()
    );
    monitor.log_stats("Snapshot loaded");

    let storage = LocalStorage::new(config.output_path().to_string());
    let exporter =
        ReportExporter::new(storage, config.bundle_name()).with_formats(config.output_formats());

    match exporter
        .export(&snapshot.appointments, &snapshot.clients, config.utc_offset())
        .await
    {
        Ok(bundle) => {
            monitor.log_stats("Report exported");
            tracing::info!("✅ Report exported successfully!");
            println!("✅ Report exported successfully!");
            println!("📁 Output saved to: {}/{}", config.output_path(), bundle);
        }
        Err(e) => {
            tracing::error!(
                "❌ Report export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
