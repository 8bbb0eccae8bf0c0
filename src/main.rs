use std::sync::Arc;

use clap::Parser;
use qimen_pan::app::report;
use qimen_pan::utils::error::ErrorSeverity;
use qimen_pan::utils::{logger, validation::Validate};
use qimen_pan::{
    ChatCompletionClient, CliConfig, CompletionBackend, DisabledBackend, DivinationEngine,
    DivinationSession, Interpreter, OutputFormat, RngSource, TomlConfig,
};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// 依配置選擇解讀後端；缺少金鑰時退回本地解讀
fn select_backend(args: &CliConfig, config: &TomlConfig) -> Arc<dyn CompletionBackend> {
    if args.offline {
        tracing::info!("📴 Offline mode, using local interpretation");
        return Arc::new(DisabledBackend::new("offline mode requested"));
    }

    let built = config
        .llm_config()
        .and_then(|llm| ChatCompletionClient::new(&llm));
    match built {
        Ok(client) => {
            tracing::info!("Using completion endpoint {}", client.endpoint());
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!("❌ {}", e);
            tracing::warn!("💡 Suggestion: {}", e.recovery_suggestion());
            Arc::new(DisabledBackend::new(e.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 載入 TOML 配置
    let mut config = match &args.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    // 初始化日誌
    match args.format {
        OutputFormat::Text => logger::init_cli_logger(args.verbose, config.log_level()),
        OutputFormat::Json => logger::init_json_logger(args.verbose, config.log_level()),
    }
    tracing::info!("Starting qimen");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    args.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(e.severity()));
    }

    let interpreter = Interpreter::with_settings(
        select_backend(&args, &config),
        config.completion_settings(),
    );
    let random = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let mut engine = DivinationEngine::new(interpreter, random);

    let mut session = DivinationSession::now();
    session.set_time(args.resolve_time(*session.time()));
    session.set_question(args.question.clone());

    match session.submit(&mut engine).await {
        Ok(outcome) => {
            let rendered = match args.format {
                OutputFormat::Text => report::render_text(outcome),
                OutputFormat::Json => report::render_json(outcome)?,
            };
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "❌ Divination failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let code = exit_code(e.severity());
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
