use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use survey_calc::utils::error::ErrorSeverity;
use survey_calc::utils::{logger, validation::Validate};
use survey_calc::{
    CliConfig, ConfigProvider, DemoLookup, Notifier, NspdClient, ParcelLookup, ParcelRecord,
    SessionController, SurveyError,
};

/// CLI rendition of the notification channel: prints toasts to the console
/// and remembers the exit code of the worst event seen.
struct ConsoleNotifier {
    json: bool,
    exit_code: AtomicI32,
}

impl ConsoleNotifier {
    fn new(json: bool) -> Self {
        Self {
            json,
            exit_code: AtomicI32::new(0),
        }
    }

    fn exit_code(&self) -> i32 {
        self.exit_code.load(Ordering::SeqCst)
    }

    fn print_record(&self, record: &ParcelRecord) {
        if self.json {
            match serde_json::to_string_pretty(record) {
                Ok(body) => println!("{}", body),
                Err(e) => {
                    tracing::error!("Failed to serialize record: {}", e);
                    self.exit_code.store(3, Ordering::SeqCst);
                }
            }
            return;
        }

        println!("✅ Parcel data received");
        println!("📍 Cadastral number: {}", record.cadastral_number);
        println!("🏠 Address: {}", record.address);
        println!("📐 Area: {} m²", record.area);
        println!("🗂️ Category: {}", record.category);
        println!("📌 Survey points: {}", record.estimate.points_count);
        println!("💳 Cost per point: {} ₽", record.estimate.cost_per_point);
        println!("💰 Total cost: {} ₽", record.estimate.total_cost);
        for (index, vertex) in record.boundary.iter().enumerate() {
            println!("   Point {}: {:.6}, {:.6}", index + 1, vertex.lat, vertex.lon);
        }
        println!("ℹ️ The estimate is preliminary; the final price is set after an on-site survey.");
    }
}

impl Notifier for ConsoleNotifier {
    fn validation_error(&self, input: &str) {
        eprintln!("❌ '{}' is not a valid cadastral number", input);
        eprintln!("💡 Enter it as XX:XX:XXXXXXX:XXXX, e.g. 77:09:0005004:1234");
        self.exit_code.store(1, Ordering::SeqCst);
    }

    fn lookup_succeeded(&self, record: &ParcelRecord) {
        tracing::info!(
            "Lookup completed for {}: {} survey points, {} ₽ total",
            record.cadastral_number,
            record.estimate.points_count,
            record.estimate.total_cost
        );
        self.print_record(record);
    }

    fn lookup_failed(&self, error: &SurveyError) {
        tracing::error!(
            "Lookup failed: {} (Category: {:?}, Severity: {:?})",
            error,
            error.category(),
            error.severity()
        );
        eprintln!("❌ {}", error.user_friendly_message());
        eprintln!("💡 {}", error.recovery_suggestion());

        let exit_code = match error.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        self.exit_code.store(exit_code, Ordering::SeqCst);
    }
}

async fn run_session<L>(lookup: Arc<L>, notifier: Arc<ConsoleNotifier>, input: &str)
where
    L: ParcelLookup + 'static,
{
    let controller = SessionController::new(lookup, notifier);
    controller.set_input(input).await;
    controller.submit().await;
    controller.wait_idle().await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting survey-calc CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    let notifier = Arc::new(ConsoleNotifier::new(config.json));

    if config.demo_mode() {
        tracing::info!("🧪 Demo mode: fabricated registry data");
        let lookup = Arc::new(DemoLookup::new());
        run_session(lookup, Arc::clone(&notifier), &config.cadastral_number).await;
    } else {
        let timeout = Duration::from_secs(config.timeout_secs());
        let lookup = match NspdClient::new(config.endpoint(), timeout) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::error!("❌ Failed to build NSPD client: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(3);
            }
        };
        run_session(lookup, Arc::clone(&notifier), &config.cadastral_number).await;
    }

    let exit_code = notifier.exit_code();
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
