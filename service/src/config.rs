use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Default Zoom OAuth token endpoint used when `ZOOM_OAUTH_URL` is not set.
pub const DEFAULT_ZOOM_OAUTH_URL: &str = "https://zoom.us/oauth/token";

/// Default Zoom REST API base URL used when `ZOOM_API_BASE_URL` is not set.
pub const DEFAULT_ZOOM_API_BASE_URL: &str = "https://api.zoom.us/v2";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The Zoom account ID used for the server-to-server OAuth exchange.
    #[arg(long, env)]
    zoom_account_id: Option<String>,

    /// The Zoom OAuth client ID.
    #[arg(long, env)]
    zoom_client_id: Option<String>,

    /// The Zoom OAuth client secret.
    #[arg(long, env)]
    zoom_client_secret: Option<String>,

    /// The Zoom OAuth token endpoint.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_OAUTH_URL)]
    zoom_oauth_url: String,

    /// The base URL of the Zoom REST API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_API_BASE_URL)]
    zoom_api_base_url: String,

    /// Comma separated list of the Zoom webinar IDs to expose in the directory.
    #[arg(long, env)]
    webinar_ids: Option<String>,

    /// Directory containing the built browser bundle served as the fallback route.
    #[arg(long, env, default_value = "./dist")]
    pub static_dir: String,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Builds a config from environment variables only, ignoring process arguments.
    /// Used by tests, where the harness owns argv.
    pub fn from_env() -> Self {
        Config::parse_from(["webinar_registration"])
    }

    /// Blank credentials read as unset.
    pub fn zoom_account_id(&self) -> Option<String> {
        non_blank(&self.zoom_account_id)
    }

    pub fn zoom_client_id(&self) -> Option<String> {
        non_blank(&self.zoom_client_id)
    }

    pub fn zoom_client_secret(&self) -> Option<String> {
        non_blank(&self.zoom_client_secret)
    }

    pub fn zoom_oauth_url(&self) -> &str {
        &self.zoom_oauth_url
    }

    pub fn zoom_api_base_url(&self) -> &str {
        &self.zoom_api_base_url
    }

    pub fn set_webinar_ids(mut self, webinar_ids: &str) -> Self {
        self.webinar_ids = Some(webinar_ids.to_string());
        self
    }

    /// Returns the configured webinar IDs in their configured order, with blank
    /// entries dropped. The IDs are not validated here.
    pub fn webinar_ids(&self) -> Vec<String> {
        self.webinar_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_webinar_ids_splits_and_drops_blanks() {
        env::remove_var("WEBINAR_IDS");
        let config = Config::from_env().set_webinar_ids(" 81234567890, ,82345678901,");
        assert_eq!(
            config.webinar_ids(),
            vec!["81234567890".to_string(), "82345678901".to_string()]
        );
    }

    #[test]
    #[serial]
    fn test_webinar_ids_empty_when_unset() {
        env::remove_var("WEBINAR_IDS");
        let config = Config::from_env();
        assert!(config.webinar_ids().is_empty());
    }

    #[test]
    #[serial]
    fn test_webinar_ids_read_from_env() {
        env::set_var("WEBINAR_IDS", "1,2,3");
        let config = Config::from_env();
        env::remove_var("WEBINAR_IDS");
        assert_eq!(config.webinar_ids(), vec!["1", "2", "3"]);
    }

    #[test]
    #[serial]
    fn test_zoom_urls_default_to_production_endpoints() {
        env::remove_var("ZOOM_OAUTH_URL");
        env::remove_var("ZOOM_API_BASE_URL");
        let config = Config::from_env();
        assert_eq!(config.zoom_oauth_url(), DEFAULT_ZOOM_OAUTH_URL);
        assert_eq!(config.zoom_api_base_url(), DEFAULT_ZOOM_API_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_blank_zoom_credentials_read_as_unset() {
        let config = Config::parse_from([
            "webinar_registration",
            "--zoom-account-id",
            "acct",
            "--zoom-client-secret",
            "  ",
        ]);
        assert_eq!(config.zoom_account_id(), Some("acct".to_string()));
        assert_eq!(config.zoom_client_secret(), None);
    }

    #[test]
    fn test_rust_env_parses_case_insensitively() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));
    }
}
