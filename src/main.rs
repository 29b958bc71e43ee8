use clap::Parser;
use std::sync::Arc;
use titanic_survival::core::ConfigProvider;
use titanic_survival::utils::{logger, validation::Validate};
use titanic_survival::{load_classifier, serve, AppConfig, AppError, AppState, CliConfig, LocalStorage};

fn fail(e: &AppError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

// 單執行緒執行：每次推論都在同一執行緒上同步完成
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    let config = match AppConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            fail(&e);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(config.verbose());
    } else {
        logger::init_cli_logger(config.verbose());
    }

    tracing::info!("🚀 Starting titanic-survival");
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    // 模型只在啟動時載入一次，失敗即終止
    let storage = LocalStorage::current_dir();
    let classifier = match load_classifier(&storage, config.model_path()).await {
        Ok(classifier) => classifier,
        Err(e) => fail(&e),
    };

    let state = match AppState::new(Arc::new(classifier)) {
        Ok(state) => state,
        Err(e) => fail(&e),
    };

    let listener = match tokio::net::TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => fail(&AppError::ConfigError {
            message: format!("cannot bind {}: {}", config.bind_address(), e),
        }),
    };

    tracing::info!("🛳️ Listening on http://{}", config.bind_address());

    if let Err(e) = serve(listener, state).await {
        fail(&e);
    }
}
