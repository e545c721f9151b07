// Configuration module entry point
// Loads layered configuration and builds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, PerformanceConfig, RoutesConfig};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `DIRLIST_LISTING__PUBLIC_ROOT`
const ENV_PREFIX: &str = "DIRLIST";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// The file is optional; defaults and environment fill in the rest
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Reject values that would only fail later, once requests are served
    pub fn validate(&self) -> Result<(), String> {
        let name = &self.http.server_name;
        hyper::header::HeaderValue::from_str(name)
            .map_err(|e| format!("http.server_name {name:?} is not a valid header value: {e}"))?;
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("performance.backlog", 128)?
        .set_default("http.server_name", "dirlist/0.1")?
        .set_default("http.enable_cors", false)?
        .set_default("http.max_body_size", 1_048_576)? // 1MB
        .set_default("routes.listing_path", "/api/files")?
        .set_default("listing.public_root", "public")?
        .set_default("listing.confine_to_root", true)
}

#[cfg(test)]
impl Config {
    /// Configuration with every default applied and no file or environment
    pub fn for_tests() -> Self {
        let settings = with_defaults(config::Config::builder())
            .and_then(|builder| builder.build())
            .expect("defaults must build");
        settings.try_deserialize().expect("defaults must deserialize")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::for_tests();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.routes.listing_path, "/api/files");
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert_eq!(cfg.listing.public_root, "public");
        assert!(cfg.listing.confine_to_root);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.server.workers.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[listing]\npublic_root = \"/srv/media\"\nconfine_to_root = false\n"
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let cfg = Config::load_from(path).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.listing.public_root, "/srv/media");
        assert!(!cfg.listing.confine_to_root);
    }

    #[test]
    fn test_missing_file_is_optional() {
        let cfg = Config::load_from("definitely-not-a-config-file").unwrap();
        assert_eq!(cfg.routes.listing_path, "/api/files");
    }

    #[test]
    fn test_validate_server_name() {
        let mut cfg = Config::for_tests();
        assert!(cfg.validate().is_ok());

        cfg.http.server_name = "dirlist\n0.1".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("http.server_name"), "{err}");
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::for_tests();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
