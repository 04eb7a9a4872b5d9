//! Purpose: Resolve the endpoint configuration injected into the record store.
//! Exports: `EndpointConfig`, `ConfigFile`, `default_config_path`, `load_config_file`, `parse_duration`.
//! Role: Keep CLI flags, env, and the config file resolving from one place.
//! Invariants: Default config file is `~/.exchange-desk/config.json`; a missing default is not an error.
//! Invariants: Endpoints are http(s) URLs; query and fragment are stripped, the path is kept.

use crate::core::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndpointConfig {
    endpoint: Url,
    timeout: Duration,
}

impl EndpointConfig {
    pub fn new(endpoint: &str) -> Result<Self, Error> {
        Ok(Self {
            endpoint: normalize_endpoint(endpoint)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Flag/env value wins over the config file; the file's timeout applies unless overridden.
    pub fn resolve(
        endpoint_override: Option<&str>,
        timeout_override: Option<Duration>,
        file: &ConfigFile,
    ) -> Result<Self, Error> {
        let endpoint = endpoint_override
            .map(str::to_string)
            .or_else(|| file.endpoint.clone())
            .ok_or_else(|| {
                Error::new(ErrorKind::Usage)
                    .with_message("no endpoint configured")
                    .with_hint(
                        "Pass --endpoint <URL>, set EXCHANGE_DESK_ENDPOINT, or add \"endpoint\" to the config file.",
                    )
            })?;
        let timeout = timeout_override
            .or(file.timeout_ms.map(Duration::from_millis))
            .unwrap_or(DEFAULT_TIMEOUT);
        Ok(Self::new(&endpoint)?.with_timeout(timeout))
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
}

pub fn default_config_path() -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_default();
    PathBuf::from(home)
        .join(".exchange-desk")
        .join("config.json")
}

pub fn load_config_file(path: &Path, allow_missing: bool) -> Result<ConfigFile, Error> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let file = serde_json::from_str::<ConfigFile>(&contents).map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!("failed to parse config '{}'", path.display()))
                    .with_hint("Expected JSON like {\"endpoint\": \"https://...\", \"timeout_ms\": 30000}.")
                    .with_source(err)
            })?;
            if file.timeout_ms == Some(0) {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(format!("invalid timeout_ms in config '{}'", path.display()))
                    .with_hint("Set \"timeout_ms\" to a positive number of milliseconds."));
            }
            Ok(file)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(Error::new(
            ErrorKind::NotFound,
        )
        .with_message(format!("config file not found '{}'", path.display()))),
        Err(err) => Err(Error::new(ErrorKind::Io)
            .with_message(format!("failed to read config '{}'", path.display()))
            .with_source(err)),
    }
}

pub fn parse_duration(input: &str) -> Result<Duration, Error> {
    let invalid = || {
        Error::new(ErrorKind::Usage)
            .with_message("invalid duration")
            .with_hint("Use a number plus ms|s|m (e.g. 10s).")
    };
    let trimmed = input.trim();
    let split = trimmed.char_indices().find(|(_, ch)| !ch.is_ascii_digit());
    let (num_str, unit) = match split {
        Some((idx, _)) => trimmed.split_at(idx),
        None => return Err(invalid()),
    };
    if num_str.is_empty() {
        return Err(invalid());
    }
    let value: u64 = num_str.parse().map_err(|_| invalid())?;
    let millis = match unit {
        "ms" => value,
        "s" => value.saturating_mul(1_000),
        "m" => value.saturating_mul(60_000),
        _ => return Err(invalid()),
    };
    if millis == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_millis(millis))
}

fn normalize_endpoint(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw.trim()).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid endpoint url")
            .with_endpoint(raw)
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("endpoint url must use http or https scheme")
            .with_endpoint(raw));
    }
    if url.cannot_be_a_base() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("endpoint url cannot be a base")
            .with_endpoint(raw));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::{ConfigFile, DEFAULT_TIMEOUT, EndpointConfig, load_config_file, parse_duration};
    use crate::core::error::ErrorKind;
    use std::time::Duration;

    #[test]
    fn endpoint_keeps_path_and_strips_query() {
        let config =
            EndpointConfig::new("https://script.example.com/macros/s/abc/exec?action=x#frag")
                .expect("config");
        assert_eq!(
            config.endpoint().as_str(),
            "https://script.example.com/macros/s/abc/exec"
        );
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn endpoint_rejects_other_schemes() {
        let err = EndpointConfig::new("ftp://example.com/exec").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
        let err = EndpointConfig::new("not a url").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn resolve_prefers_override_then_file() {
        let file = ConfigFile {
            endpoint: Some("https://file.example.com/exec".to_string()),
            timeout_ms: Some(1500),
        };
        let from_file = EndpointConfig::resolve(None, None, &file).expect("file");
        assert_eq!(from_file.endpoint().host_str(), Some("file.example.com"));
        assert_eq!(from_file.timeout(), Duration::from_millis(1500));

        let overridden = EndpointConfig::resolve(
            Some("http://flag.example.com/exec"),
            Some(Duration::from_secs(2)),
            &file,
        )
        .expect("flag");
        assert_eq!(overridden.endpoint().host_str(), Some("flag.example.com"));
        assert_eq!(overridden.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn resolve_without_endpoint_is_usage_error() {
        let err = EndpointConfig::resolve(None, None, &ConfigFile::default()).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.hint().is_some());
    }

    #[test]
    fn config_file_missing_and_present() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.json");
        assert_eq!(load_config_file(&path, true)?, ConfigFile::default());
        assert_eq!(
            load_config_file(&path, false).expect_err("err").kind(),
            ErrorKind::NotFound
        );

        std::fs::write(&path, r#"{"endpoint":"https://e.example.com/exec","timeout_ms":900}"#)?;
        let file = load_config_file(&path, false)?;
        assert_eq!(file.timeout_ms, Some(900));

        std::fs::write(&path, r#"{"endpoint":"https://e.example.com/exec","timeout_ms":0}"#)?;
        let err = load_config_file(&path, false).expect_err("zero timeout");
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.hint().is_some_and(|hint| hint.contains("timeout_ms")));

        std::fs::write(&path, r#"{"endpoint":1}"#)?;
        assert_eq!(
            load_config_file(&path, true).expect_err("err").kind(),
            ErrorKind::Usage
        );
        Ok(())
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("250ms").expect("ms"), Duration::from_millis(250));
        assert_eq!(parse_duration("10s").expect("s"), Duration::from_secs(10));
        assert_eq!(parse_duration("2m").expect("m"), Duration::from_secs(120));
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("s").is_err());
    }
}
