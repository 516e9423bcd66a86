use anyhow::Context;
use booking_desk::utils::error::ErrorCategory;
use booking_desk::utils::{logger, validation::Validate};
use booking_desk::{
    BookingDesk, BookingRequest, CliArgs, DeskConfig, LogNotificationGateway, NotificationGateway,
    StatusFilter,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 載入 TOML 配置
    let config = match DeskConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("🚀 Starting booking desk '{}'", config.desk.name);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let filter: StatusFilter = args.filter.parse().context("invalid --filter value")?;

    let raw = std::fs::read_to_string(&args.requests)
        .with_context(|| format!("reading booking requests from {}", args.requests))?;
    let requests: Vec<BookingRequest> =
        serde_json::from_str(&raw).context("booking requests must be a JSON array")?;
    tracing::info!("📂 Loaded {} booking request(s)", requests.len());

    // 決定通知閘道
    let gateway: Arc<dyn NotificationGateway> = match config.http_gateway() {
        Some(gateway) if !args.dry_run => Arc::new(gateway),
        _ => {
            tracing::info!("🔍 DRY RUN MODE - notifications are logged, not sent");
            Arc::new(LogNotificationGateway)
        }
    };

    let desk = BookingDesk::from_config(&config, gateway);

    let mut failures = 0usize;
    let mut worst = None;
    for (index, request) in requests.iter().enumerate() {
        match desk.create_appointment(request).await {
            Ok(appointment) => {
                println!(
                    "✅ [{}] {} booked {} to {} at {} ({})",
                    index + 1,
                    appointment.customer_name,
                    appointment.start_date,
                    appointment.end_date,
                    appointment.time.format("%H:%M"),
                    appointment.id
                );
            }
            Err(e) => {
                failures += 1;
                tracing::error!(
                    "❌ Request {} failed: {} (Category: {:?})",
                    index + 1,
                    e,
                    e.category()
                );
                eprintln!("❌ [{}] {}", index + 1, e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                if e.category() == ErrorCategory::System || worst.is_none() {
                    worst = Some(e.category());
                }
            }
        }
    }

    println!();
    println!("📋 Appointments ({:?}):", filter);
    for appointment in desk.list_appointments(filter).await {
        println!(
            "  {}  {:<20} {:<12} {} → {} {}  [{}]",
            appointment.id,
            appointment.customer_name,
            appointment.service,
            appointment.start_date,
            appointment.end_date,
            appointment.time.format("%H:%M"),
            appointment.status
        );
    }

    let booked = desk.shutdown().len();
    tracing::info!(
        "📊 {} booked, {} rejected out of {} request(s)",
        booked,
        failures,
        requests.len()
    );

    // 根據錯誤類別決定退出碼
    if let Some(category) = worst {
        let exit_code = match category {
            ErrorCategory::System => 3,
            _ => 2,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
