use std::{net::IpAddr, time::Duration};

use camino::Utf8Path as Path;
use color_eyre::eyre::{Context, Result};
use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
struct TomlBackend {
    base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
struct TomlServer {
    address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
struct TomlSearch {
    debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
struct TomlConfig {
    #[serde(rename = "Backend")]
    pub backend: Option<TomlBackend>,
    #[serde(rename = "Server")]
    pub server: Option<TomlServer>,
    #[serde(rename = "Search")]
    pub search: Option<TomlSearch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: Url,
    pub address: IpAddr,
    pub port: u16,
    pub search_debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default api base is a valid url"),
            address: "127.0.0.1".parse().expect("is a valid address"),
            port: DEFAULT_PORT,
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

pub async fn read_config(path: &Path) -> Result<Config> {
    let toml_str = tokio::fs::read_to_string(path)
        .await
        .context(format!("Error reading config file {}", path))?;
    parse_config(&toml_str)
}

pub fn parse_config(toml_str: &str) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(toml_str).context("Error parsing config file")?;
    let defaults = Config::default();
    let backend = toml_config.backend.unwrap_or_default();
    let server = toml_config.server.unwrap_or_default();
    let search = toml_config.search.unwrap_or_default();
    let api_base = backend
        .base_url
        .map(|s| parse_api_base(&s))
        .transpose()?
        .unwrap_or(defaults.api_base);
    let address = server
        .address
        .map(|a| a.parse().wrap_err("error parsing listening address"))
        .transpose()?
        .unwrap_or(defaults.address);
    Ok(Config {
        api_base,
        address,
        port: server.port.unwrap_or(defaults.port),
        search_debounce: search
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.search_debounce),
    })
}

/// Base urls are joined with relative paths, so they need a trailing slash
/// or the last path segment gets replaced.
pub fn parse_api_base(s: &str) -> Result<Url> {
    let mut url = Url::parse(s).wrap_err_with(|| format!("invalid backend url {}", s))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use camino::Utf8PathBuf as PathBuf;
    use claims::assert_err;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn full_config() {
        let config = parse_config(
            r#"
[Backend]
base_url = "https://gallery.example.com/api"

[Server]
address = "0.0.0.0"
port = 9000

[Search]
debounce_ms = 40
"#,
        )
        .unwrap();
        assert_eq!(config.api_base.as_str(), "https://gallery.example.com/api/");
        assert_eq!(config.address, "0.0.0.0".parse::<IpAddr>().unwrap());
        assert_eq!(config.port, 9000);
        assert_eq!(config.search_debounce, Duration::from_millis(40));
    }

    #[test]
    fn bad_values_are_errors() {
        assert_err!(parse_config("[Backend]\nbase_url = \"not a url\""));
        assert_err!(parse_config("[Server]\naddress = \"localhost:80\""));
    }

    #[tokio::test]
    async fn read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[Server]\nport = 3100").unwrap();
        let path = PathBuf::from_path_buf(file.path().to_path_buf()).unwrap();
        let config = read_config(&path).await.unwrap();
        assert_eq!(config.port, 3100);
        assert_eq!(config.api_base, Config::default().api_base);
    }
}
