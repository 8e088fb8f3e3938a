use clap::Parser;
use repair_desk::adapters::memory::{
    DevPasswordHasher, InMemoryAdmins, InMemoryAppointments, InMemoryClients, InMemoryMessages,
    SystemClock,
};
use repair_desk::adapters::webhook::WebhookNotifier;
use repair_desk::core::accounts::ClientRegistration;
use repair_desk::core::intake::BLOCKED_NOTICE;
use repair_desk::core::{catalog, tracking};
use repair_desk::utils::{logger, validation::Validate};
use repair_desk::{DeskConfig, DeskEngine, IntakeRequest, IntakeValidator};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "repair-desk")]
#[command(about = "Campus device-repair appointment desk")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "desk.toml")]
    config: String,

    /// Booking request JSON (client + appointment sections)
    #[arg(short, long, default_value = "booking_request.json")]
    request: String,

    /// Validate the intake request without booking it
    #[arg(long)]
    validate_only: bool,

    /// Dry run - show config and catalog summary without processing
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// 預約請求檔：client 註冊資料 + appointment 表單
#[derive(Debug, Deserialize)]
struct BookingRequestFile {
    client: ClientRegistration,
    appointment: IntakeRequest,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting repair-desk");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match DeskConfig::from_file(&args.config) {
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

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No booking will occur");
        display_summary(&config, &args);
        return Ok(());
    }

    // 讀取預約請求
    let raw = match std::fs::read_to_string(&args.request) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("❌ Failed to read request file '{}': {}", args.request, e);
            std::process::exit(1);
        }
    };
    let request: BookingRequestFile = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("❌ Invalid booking request JSON: {}", e);
            std::process::exit(1);
        }
    };

    let validator = IntakeValidator::new(config.calendar(), config.utc_offset());

    if args.validate_only {
        return run_validate_only(&validator, &request.appointment);
    }

    // 組裝記憶體後端的預約台
    let mut engine = DeskEngine::new(
        Arc::new(InMemoryAppointments::new()),
        Arc::new(InMemoryClients::new()),
        Arc::new(InMemoryAdmins::new()),
        Arc::new(InMemoryMessages::new()),
        Arc::new(SystemClock),
        Arc::new(DevPasswordHasher),
        validator,
        config.policies_version(),
    );
    if let Some(endpoint) = config.webhook_endpoint() {
        tracing::info!("🔔 Webhook notifications -> {}", endpoint);
        engine = engine.with_notifier(Arc::new(WebhookNotifier::new(
            endpoint,
            config.webhook_timeout_seconds(),
        )));
    }

    let result = async {
        let client = engine.register_client(&request.client).await?;
        engine.book_appointment(client.id, &request.appointment).await
    }
    .await;

    match result {
        Ok(appointment) => {
            tracing::info!("✅ Appointment booked successfully!");
            println!("✅ Appointment submitted!");
            println!("📋 Tracking ID: {}", appointment.tracking_id);
            println!(
                "   Shared as:   {}",
                tracking::masked_tracking(&appointment.tracking_id)
            );
            println!(
                "   Service:     {} ({})",
                catalog::service_label(&appointment.service_type),
                appointment.device_type.label()
            );
            println!("   Quote:       ₱{}", appointment.quoted_price);
            println!("Expect confirmation via SMS.");
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Booking failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                repair_desk::utils::error::ErrorSeverity::Low => 0,
                repair_desk::utils::error::ErrorSeverity::Medium => 2,
                repair_desk::utils::error::ErrorSeverity::High => 1,
                repair_desk::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn run_validate_only(validator: &IntakeValidator, request: &IntakeRequest) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    match validator.validate(request, now) {
        Ok(validated) => {
            println!("✅ Intake request is valid");
            println!(
                "   Service: {} ({})",
                catalog::service_label(&validated.service_type),
                validated.device_type.label()
            );
            println!("   Brand:   {}", catalog::brand_label(&validated.device_brand));
            println!("   Quote:   ₱{}", validated.quoted_price);
        }
        Err(errors) => {
            println!("❌ Intake request rejected:");
            for error in &errors {
                println!("   - {}: {}", error.field, error.message);
            }
            // 時段被拒時提示下一個可預約時間
            if errors.iter().any(|e| e.field == "preferred_at") {
                if let Some(next) = validator.calendar().next_opening(now, validator.offset()) {
                    let local = next.with_timezone(&validator.offset());
                    println!(
                        "💡 Next open slot: {}",
                        local.format("%A %Y-%m-%d %H:%M")
                    );
                }
            }
            std::process::exit(2);
        }
    }
    Ok(())
}

fn display_summary(config: &DeskConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Desk: {} v{}", config.desk.name, config.desk.version);
    println!("  Timezone offset: {}", config.utc_offset());
    println!("  Policies version: {}", config.policies_version());
    println!(
        "  Webhook: {}",
        config.webhook_endpoint().unwrap_or("disabled")
    );
    println!("  Availability: {}", config.calendar().note());
    println!("  Notice: {}", BLOCKED_NOTICE);
    println!();

    println!("🛠️ Service Catalog:");
    for device in repair_desk::core::DeviceKind::ALL {
        println!("  {}:", device.label());
        for service in catalog::services_for(device) {
            println!("    {} - ₱{}", service.label, service.price);
        }
    }

    if args.verbose {
        println!();
        println!("🏷️ Brand menus:");
        for device in repair_desk::core::DeviceKind::ALL {
            let brands: Vec<&str> = catalog::brands_for(device)
                .iter()
                .map(|b| b.label)
                .collect();
            println!("  {}: {}", device.label(), brands.join(", "));
        }

        // 前端下拉選單資料（booking form 用）
        let maps = serde_json::json!({
            "services": catalog::service_map(),
            "brands": catalog::brand_map(),
            "models": catalog::model_map(),
            "pricing": catalog::pricing_map(),
        });
        println!();
        println!("📦 Frontend maps (JSON):");
        println!(
            "{}",
            serde_json::to_string_pretty(&maps).unwrap_or_default()
        );
    }
}
