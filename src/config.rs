use clap::Parser;
use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port to bind to
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Endpoint of the downstream classification service
    #[arg(
        long,
        env = "DOWNSTREAM_URL",
        default_value = "http://localhost:5001/classify"
    )]
    pub downstream_url: Url,

    /// Timeout in seconds for the downstream call; the HTTP client default applies when unset
    #[arg(long, env = "DOWNSTREAM_TIMEOUT_SECS")]
    pub downstream_timeout_secs: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

#[derive(Debug, Clone)]
pub struct DownstreamConfig {
    pub url: Url,
    pub timeout: Option<Duration>,
}

impl From<&Config> for DownstreamConfig {
    fn from(config: &Config) -> Self {
        Self {
            url: config.downstream_url.clone(),
            timeout: config.downstream_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Config {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downstream_defaults_to_local_classifier() {
        let config = Config::try_parse_from(["tweet-relay"]).unwrap();
        let downstream = DownstreamConfig::from(&config);

        assert_eq!(downstream.url.as_str(), "http://localhost:5001/classify");
        assert_eq!(downstream.timeout, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "tweet-relay",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--downstream-url",
            "http://classifier.internal:9000/v2/classify",
            "--downstream-timeout-secs",
            "15",
            "--log-json",
        ])
        .unwrap();

        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert!(config.log_json);

        let downstream = DownstreamConfig::from(&config);
        assert_eq!(
            downstream.url.as_str(),
            "http://classifier.internal:9000/v2/classify"
        );
        assert_eq!(downstream.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn rejects_unparsable_downstream_url() {
        let result = Config::try_parse_from(["tweet-relay", "--downstream-url", "not a url"]);
        assert!(result.is_err());
    }
}
