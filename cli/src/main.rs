//! CLI entrypoint for Lisa
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;

use anyhow::{Context, Result, bail};
use clap::Parser;
use commands::Cli;
use lisa_application::{
    ConversationLogger, ExecuteWithToolsInput, ExecuteWithToolsUseCase, ExecutionParams,
    NoConversationLogger, RunError,
};
use lisa_domain::{CapabilityRegistry, Message};
use lisa_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, ProviderKind, build_provider,
    register_builtin_tools,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let Some(prompt) = cli.prompt.clone() else {
        bail!("A prompt is required. Run `lisa --help` for usage.");
    };

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);

    let issues = config.validate();
    for issue in &issues {
        warn!("Config: {}", issue);
    }
    if !issues.is_empty() {
        bail!(
            "invalid configuration: {}",
            issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        );
    }

    // === Dependency Injection ===
    let kind: ProviderKind = config.provider.default.parse()?;
    let provider = build_provider(kind, &config)?;
    info!(provider = %provider.kind, model = %provider.model, "Starting Lisa");

    let mut registry = CapabilityRegistry::new();
    register_builtin_tools(&mut registry);
    registry.grant_scopes(config.orchestration.scopes.iter().map(String::as_str));

    let logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }

    let use_case = ExecuteWithToolsUseCase::new(provider.adapter, provider.transport)
        .with_conversation_logger(logger)
        .with_cancellation(cancellation);

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &config.orchestration.system_prompt {
        messages.push(Message::system(system.clone()));
    }
    messages.push(Message::user(prompt));

    let params = ExecutionParams::new(provider.model)
        .with_max_iterations(config.orchestration.max_iterations)
        .with_temperature(config.provider.temperature)
        .with_max_tokens(provider.max_tokens);

    match use_case
        .execute(&registry, ExecuteWithToolsInput::new(messages, params))
        .await
    {
        Ok(response) => {
            for record in response.failed_calls() {
                warn!(tool = %record.name, "Tool call failed: {}", record.result.model_content());
            }
            println!("{}", response.final_text.unwrap_or_default());
            Ok(())
        }
        Err(RunError::Cancelled) => bail!("cancelled"),
        Err(e) => Err(e).context("run failed"),
    }
}

/// Apply command-line flags on top of the loaded configuration.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(provider) = &cli.provider {
        config.provider.default = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.provider.model = Some(model.clone());
    }
    if let Some(max) = cli.max_iterations {
        config.orchestration.max_iterations = max;
    }
    if let Some(system) = &cli.system {
        config.orchestration.system_prompt = Some(system.clone());
    }
    config.orchestration.scopes.extend(cli.grants.iter().cloned());
}

/// Initialize logging based on verbosity level.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}
