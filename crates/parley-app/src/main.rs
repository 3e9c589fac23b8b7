//! Parley application binary - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Build the HTTP capability adapters
//! 3. Open the chat history database (best effort)
//! 4. Assemble the answer pipeline for the configured mode
//! 5. Start the axum REST API server

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;

use parley_api::{start_server, AppState};
use parley_chat::{model_augmented, ArithmeticEvaluator, ChatOrchestrator, CompletionSettings, Routes};
use parley_core::{ParleyConfig, PipelineConfig, PipelineMode, StorageConfig};
use parley_providers::Providers;
use parley_storage::{ChatRepository, Database};

use crate::cli::CliArgs;

/// Expand a leading `~/` to the user's home directory.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

/// Open the history database. Failure disables recording instead of
/// stopping the server.
fn open_history(data_dir: &Path, storage: &StorageConfig) -> Option<ChatRepository> {
    if !storage.enabled {
        tracing::info!("Chat history disabled in config");
        return None;
    }

    let db_path = data_dir.join(&storage.db_file);
    match Database::new(&db_path) {
        Ok(db) => Some(ChatRepository::new(Arc::new(db))),
        Err(e) => {
            tracing::warn!(
                path = %db_path.display(),
                error = %e,
                "Failed to open history database, answers will not be recorded"
            );
            None
        }
    }
}

fn build_orchestrator(pipeline: &PipelineConfig, providers: &Providers) -> ChatOrchestrator {
    match pipeline.mode {
        PipelineMode::RuleRouted => ChatOrchestrator::rule_routed(Routes::standard(
            providers.weather.clone(),
            providers.encyclopedia.clone(),
            providers.search.clone(),
            Arc::new(ArithmeticEvaluator),
            &pipeline.default_location,
        )),
        PipelineMode::ModelAugmented => {
            let chain = model_augmented(
                providers.search.clone(),
                providers.llm.clone(),
                CompletionSettings::from(pipeline),
            );
            ChatOrchestrator::model_augmented(Arc::new(chain))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.config_path();
    let mut config = ParleyConfig::load_or_default(&config_file);
    args.apply_to(&mut config);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Parley v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Capabilities.
    let providers = Providers::from_config(&config.providers)?;

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    let history = open_history(&data_dir, &config.storage);

    // Pipeline.
    let mut orchestrator = build_orchestrator(&config.pipeline, &providers);
    if let Some(ref repo) = history {
        orchestrator = orchestrator.with_recorder(Arc::new(repo.clone()));
    }
    tracing::info!(mode = orchestrator.mode().as_str(), "Answer pipeline ready");

    // API server.
    let port = config.general.port;
    let state = AppState::new(config, orchestrator, history);

    if let Err(e) = start_server(port, state).await {
        tracing::error!(port, error = %e, "Server stopped");
        tracing::error!("Try: PARLEY_PORT={} cargo run -p parley-app", port.saturating_add(1));
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_absolute() {
        assert_eq!(resolve_data_dir("/srv/parley"), PathBuf::from("/srv/parley"));
    }

    #[test]
    fn test_resolve_data_dir_expands_home() {
        let resolved = resolve_data_dir("~/.parley/data");
        assert!(resolved.ends_with(".parley/data"));
        assert!(!resolved.starts_with("~"));
    }

    #[test]
    fn test_open_history_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig {
            enabled: false,
            ..StorageConfig::default()
        };
        assert!(open_history(dir.path(), &storage).is_none());
    }

    #[test]
    fn test_open_history_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_history(dir.path(), &StorageConfig::default()).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(dir.path().join("parley.db").exists());
    }

    #[test]
    fn test_open_history_failure_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        // Parent of the db path is a regular file, so it cannot be created.
        assert!(open_history(&blocker, &StorageConfig::default()).is_none());
    }

    #[test]
    fn test_build_orchestrator_modes() {
        let providers = Providers::from_config(&ParleyConfig::default().providers).unwrap();

        let rule = build_orchestrator(&PipelineConfig::default(), &providers);
        assert_eq!(rule.mode(), PipelineMode::RuleRouted);

        let model_config = PipelineConfig {
            mode: PipelineMode::ModelAugmented,
            ..PipelineConfig::default()
        };
        let model = build_orchestrator(&model_config, &providers);
        assert_eq!(model.mode(), PipelineMode::ModelAugmented);
    }
}
