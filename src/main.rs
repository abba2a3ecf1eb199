use clap::Parser;
use quantum_tutor::utils::error::{ErrorSeverity, TutorError};
use quantum_tutor::utils::{logger, validation::Validate};
use quantum_tutor::{AppConfig, AppState, CliConfig, GroqClient, QuantumTutorAgent};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // .env is optional; real environment variables take precedence
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting quantum-tutor v{}", env!("CARGO_PKG_VERSION"));
    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ quantum-tutor failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> Result<(), TutorError> {
    let config = AppConfig::load(cli)?;
    config.validate()?;
    tracing::info!(
        listen_addr = %config.listen_addr(),
        model = %config.llm.model,
        base_url = %config.llm.base_url,
        "✅ Configuration loaded and validated"
    );

    let client = GroqClient::new(config.groq_settings()?)?;
    let agent = QuantumTutorAgent::new(Arc::new(client), config.tutor_options());
    tracing::info!("✅ QuantumTutor initialized successfully!");

    quantum_tutor::serve(&config.listen_addr(), AppState::new(agent)).await
}
