//! Command-line flags for the `parley` binary.
//!
//! Each flag may also come from a `PARLEY_*` environment variable; an
//! explicit flag wins over the variable, and both win over the config file.

use clap::Parser;
use std::path::PathBuf;

use parley_core::ParleyConfig;

/// Parley - a conversational query-answering service.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct CliArgs {
    /// Config file [default: ~/.parley/config.toml]
    #[arg(short = 'c', long = "config", env = "PARLEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port for the HTTP API, overriding `general.port`.
    #[arg(short = 'p', long = "port", env = "PARLEY_PORT")]
    pub port: Option<u16>,

    /// Directory holding the history database, overriding `general.data_dir`.
    #[arg(short = 'd', long = "data-dir", env = "PARLEY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log filter such as `debug` or `parley_chat=trace`. RUST_LOG still wins.
    #[arg(short = 'l', long = "log-level", env = "PARLEY_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl CliArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(home_config_path)
    }

    /// Fold command-line overrides into a loaded config.
    pub fn apply_to(&self, config: &mut ParleyConfig) {
        if let Some(port) = self.port {
            config.general.port = port;
        }
        if let Some(ref dir) = self.data_dir {
            config.general.data_dir = dir.to_string_lossy().into_owned();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
    }
}

fn home_config_path() -> PathBuf {
    let home_var = if cfg!(target_os = "windows") {
        "USERPROFILE"
    } else {
        "HOME"
    };
    match std::env::var_os(home_var) {
        Some(home) => PathBuf::from(home).join(".parley").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = CliArgs::parse_from([
            "parley",
            "--config",
            "/tmp/p.toml",
            "-p",
            "9000",
            "--data-dir",
            "/var/lib/parley",
            "-l",
            "debug",
        ]);
        assert_eq!(args.config_path(), PathBuf::from("/tmp/p.toml"));

        let mut config = ParleyConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config.general.port, 9000);
        assert_eq!(config.general.data_dir, "/var/lib/parley");
        assert_eq!(config.general.log_level, "debug");
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let args = CliArgs {
            config: None,
            port: None,
            data_dir: None,
            log_level: None,
        };
        let mut config = ParleyConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config.general.port, 3030);
        assert_eq!(config.general.log_level, "info");
        assert!(args.config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(CliArgs::try_parse_from(["parley", "--port", "not-a-port"]).is_err());
    }
}
