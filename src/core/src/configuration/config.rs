use super::types::FileConfig;
use crate::error_handling::types::ConfigError;
use clap::Parser;
use log::LevelFilter;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMES_FILE: &str = "times.txt";

/// Command-line arguments.
///
/// Each setting can also come from an environment variable or from the TOML
/// file given with `--config`. Values set here (or through the environment)
/// win over the file, and the file wins over the defaults.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "spacetimer")]
#[command(version)]
#[command(about = "Stopwatch web app that keeps recorded times in a text file")]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(long, short, env = "SPACETIMER_CONFIG")]
    pub config: Option<PathBuf>,

    /// IP address the HTTP server binds to
    ///
    /// Defaults to 127.0.0.1
    #[arg(long, env = "SPACETIMER_BIND_ADDRESS")]
    pub bind_address: Option<IpAddr>,

    /// TCP port the HTTP server listens on
    ///
    /// Defaults to 5000
    #[arg(long, short, env = "SPACETIMER_PORT")]
    pub port: Option<u16>,

    /// File holding the recorded times, one per line
    ///
    /// Relative paths are resolved against the working directory. Defaults to
    /// `times.txt`
    #[arg(long, env = "SPACETIMER_TIMES_FILE")]
    pub times_file: Option<PathBuf>,

    /// Log verbosity: off, error, warn, info, debug or trace
    #[arg(long, env = "SPACETIMER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_address: IpAddr,
    pub port: u16,
    pub times_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            times_file: PathBuf::from(DEFAULT_TIMES_FILE),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Parses the process arguments and resolves them into a `Config`.
    ///
    /// # Errors
    /// Returns a `ConfigError` when the configuration file cannot be read or
    /// parsed, or when the log level is not recognised. Invalid command-line
    /// arguments make clap print its usage and exit.
    pub fn from_args() -> Result<Self, ConfigError> {
        Self::from_parsed_args(Args::parse())
    }

    /// Resolves already-parsed arguments, loading the file named by
    /// `args.config` if any.
    pub fn from_parsed_args(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Combines the sources: arguments first, then the file, then defaults.
    pub fn merge(args: Args, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = Config::default();
        let log_level = match args.log_level.or(file.log_level) {
            Some(level) => LevelFilter::from_str(level.trim())
                .map_err(|_| ConfigError::InvalidLogLevel(level))?,
            None => defaults.log_level,
        };

        Ok(Self {
            bind_address: args
                .bind_address
                .or(file.bind_address)
                .unwrap_or(defaults.bind_address),
            port: args.port.or(file.port).unwrap_or(defaults.port),
            times_file: args
                .times_file
                .or(file.times_file)
                .unwrap_or(defaults.times_file),
            log_level,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}
