// Configuration module entry point
// Loads configuration from file, environment and built-in defaults

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, UpstreamConfig};

/// Default configuration file, resolved without extension
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `WIKIDESC_SERVER.PORT`
const ENV_PREFIX: &str = "WIKIDESC";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// The file is optional; missing keys fall back to the defaults below
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("upstream.api_url", "https://en.wikipedia.org/w/api.php")?
            .set_default(
                "upstream.user_agent",
                concat!("wikidesc/", env!("CARGO_PKG_VERSION")),
            )?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("definitely/not/a/config/file").unwrap();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.server.workers.is_none());
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.upstream.api_url, "https://en.wikipedia.org/w/api.php");
        assert!(cfg.upstream.user_agent.starts_with("wikidesc/"));
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wikidesc.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\nworkers = 2\n\n[logging]\nlevel = \"debug\"\naccess_log_format = \"json\"\n\n[upstream]\napi_url = \"http://127.0.0.1:1/w/api.php\""
        )
        .unwrap();

        let base = path.with_extension("");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.access_log_format, "json");
        assert_eq!(cfg.upstream.api_url, "http://127.0.0.1:1/w/api.php");
        // Untouched keys keep their defaults
        assert_eq!(cfg.performance.read_timeout, 30);
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
    }

    #[test]
    fn test_invalid_host() {
        let mut cfg = Config::load_from("definitely/not/a/config/file").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
