//! Service configuration
//!
//! Each setting resolves as: command line (or its `APR_*` environment
//! variable) > TOML config file > compiled default.

use std::path::{Path, PathBuf};

use apr_common::api::Locale;
use apr_common::config::{
    default_config_path, CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig,
    CONFIG_FILE_ENV,
};
use apr_common::{Error, Result};
use clap::Parser;

/// Command-line arguments for apr-svc
#[derive(Parser, Debug, Default)]
#[command(name = "apr-svc")]
#[command(about = "Annual program report task and setting service")]
#[command(version)]
pub struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = CONFIG_FILE_ENV)]
    pub config: Option<PathBuf>,

    /// Root folder holding the database (also APR_ROOT_FOLDER)
    #[arg(short, long)]
    pub root_folder: Option<PathBuf>,

    /// Database file, overriding <root_folder>/apr.db
    #[arg(long, env = "APR_DATABASE")]
    pub database: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "APR_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "APR_PORT")]
    pub port: Option<u16>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "APR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Fallback message locale (en or ar)
    #[arg(long, env = "APR_LOCALE")]
    pub locale: Option<String>,
}

impl Args {
    /// Config file to read: `--config`/`APR_CONFIG`, else the platform default
    pub fn config_file(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_config_path)
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub root_folder: PathBuf,
    pub database_path: PathBuf,
    pub bind_host: String,
    pub port: u16,
    pub log_level: String,
    pub default_locale: Locale,
}

impl Config {
    pub fn resolve(args: &Args, toml: Option<&TomlConfig>) -> Result<Self> {
        let defaults = CompiledDefaults::for_current_platform();

        let root_folder = RootFolderResolver::new()
            .with_cli_arg(args.root_folder.as_deref())
            .with_toml(toml)
            .resolve();

        let database_path = args
            .database
            .clone()
            .or_else(|| toml.and_then(|t| t.database_path.clone()))
            .unwrap_or_else(|| RootFolderInitializer::new(root_folder.clone()).database_path());

        let bind_host = args
            .host
            .clone()
            .or_else(|| toml.and_then(|t| t.bind_host.clone()))
            .unwrap_or(defaults.bind_host);

        let port = args
            .port
            .or_else(|| toml.and_then(|t| t.port))
            .unwrap_or(defaults.port);

        let log_level = args
            .log_level
            .clone()
            .or_else(|| toml.and_then(|t| t.logging.level.clone()))
            .unwrap_or(defaults.log_level);

        let locale_tag = args
            .locale
            .clone()
            .or_else(|| toml.and_then(|t| t.default_locale.clone()))
            .unwrap_or(defaults.default_locale);
        let default_locale = Locale::from_tag(&locale_tag)
            .ok_or_else(|| Error::Config(format!("Unsupported locale '{}'", locale_tag)))?;

        Ok(Self {
            root_folder,
            database_path,
            bind_host,
            port,
            log_level,
            default_locale,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

/// Load the TOML file if there is one
pub fn load_toml(path: Option<&Path>) -> Result<Option<TomlConfig>> {
    match path {
        Some(path) => TomlConfig::load(path),
        None => Ok(None),
    }
}
