use std::net::IpAddr;
use std::path::PathBuf;

use serde::Deserialize;

/// Settings accepted in the optional TOML configuration file.
///
/// Every key is optional; anything left out falls back to the command line,
/// the environment, or the built-in default.
///
/// ```toml
/// bind_address = "0.0.0.0"
/// port = 8080
/// times_file = "/var/lib/spacetimer/times.txt"
/// log_level = "debug"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind_address: Option<IpAddr>,
    pub port: Option<u16>,
    pub times_file: Option<PathBuf>,
    pub log_level: Option<String>,
}
