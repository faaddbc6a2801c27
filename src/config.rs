use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const URL_PLACEHOLDER: &str = "{url}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file at {0}")]
    Missing(PathBuf),
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("missing [server] section")]
    MissingServer,
    #[error("server url `{0}` is not a valid http(s) url")]
    InvalidUrl(String),
    #[error("no queries configured; add at least one [[queries]] entry")]
    NoQueries,
    #[error("query alias `{0}` is configured more than once")]
    DuplicateAlias(String),
    #[error("no columns configured")]
    NoColumns,
    #[error("date format `{0}` is not a valid strftime pattern")]
    InvalidDateFormat(String),
    #[error("open_command must contain the `{{url}}` placeholder")]
    OpenCommandPlaceholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Key,
    Summary,
    Status,
    Assignee,
    Creator,
    Created,
    Updated,
    Watchers,
}

impl Column {
    pub fn label(self) -> &'static str {
        match self {
            Self::Key => "Key",
            Self::Summary => "Summary",
            Self::Status => "Status",
            Self::Assignee => "Assignee",
            Self::Creator => "Creator",
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Watchers => "Watchers",
        }
    }

    pub fn is_free_text(self) -> bool {
        self == Self::Summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryConfig {
    pub alias: String,
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
    #[serde(default = "default_columns")]
    pub columns: Vec<Column>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_open_command")]
    pub open_command: Vec<String>,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    pub theme: Option<String>,
    #[serde(default)]
    pub keys: HashMap<String, String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|error| match error {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let server = self.server.as_ref().ok_or(ConfigError::MissingServer)?;
        let parsed = url::Url::parse(server.url.trim())
            .map_err(|_| ConfigError::InvalidUrl(server.url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(server.url.clone()));
        }

        if self.queries.is_empty() {
            return Err(ConfigError::NoQueries);
        }
        for (index, query) in self.queries.iter().enumerate() {
            if self.queries[..index]
                .iter()
                .any(|earlier| earlier.alias == query.alias)
            {
                return Err(ConfigError::DuplicateAlias(query.alias.clone()));
            }
        }

        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        if !is_valid_date_format(&self.date_format) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        if !self
            .open_command
            .iter()
            .any(|arg| arg.contains(URL_PLACEHOLDER))
        {
            return Err(ConfigError::OpenCommandPlaceholder);
        }
        Ok(())
    }

    pub fn server_url(&self) -> &str {
        self.server
            .as_ref()
            .map(|server| server.url.trim().trim_end_matches('/'))
            .unwrap_or_default()
    }

    pub fn server_user(&self) -> Option<&str> {
        self.server
            .as_ref()
            .and_then(|server| server.user.as_deref())
            .filter(|user| !user.trim().is_empty())
    }

    pub fn query_index(&self, alias: &str) -> Option<usize> {
        self.queries.iter().position(|query| query.alias == alias)
    }
}

fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn default_columns() -> Vec<Column> {
    vec![
        Column::Key,
        Column::Status,
        Column::Assignee,
        Column::Updated,
        Column::Summary,
    ]
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_open_command() -> Vec<String> {
    let opener = if cfg!(target_os = "macos") {
        vec!["open"]
    } else if cfg!(target_os = "windows") {
        vec!["cmd", "/C", "start"]
    } else {
        vec!["xdg-open"]
    };
    opener
        .into_iter()
        .map(str::to_string)
        .chain(std::iter::once(URL_PLACEHOLDER.to_string()))
        .collect()
}

pub fn config_path() -> PathBuf {
    config_dir().join("jiradash").join("config.toml")
}

pub fn state_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_STATE_HOME") {
        return Path::new(&dir).join("jiradash");
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".local").join("state").join("jiradash");
    }

    env::temp_dir().join("jiradash")
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&dir).to_path_buf();
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".config");
    }

    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{Column, Config, ConfigError, DEFAULT_REFRESH_INTERVAL_SECS};

    const MINIMAL: &str = r#"
        [server]
        url = "https://example.atlassian.net/"

        [[queries]]
        alias = "mine"
        query = "assignee = currentUser()"

        [[queries]]
        alias = "team"
        query = "project = OPS"
    "#;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config = Config::parse(MINIMAL).expect("parse config");

        assert_eq!(config.server_url(), "https://example.atlassian.net");
        assert_eq!(config.server_user(), None);
        assert_eq!(config.queries.len(), 2);
        assert_eq!(config.queries[1].alias, "team");
        assert_eq!(config.refresh_interval_secs, DEFAULT_REFRESH_INTERVAL_SECS);
        assert_eq!(config.columns.last(), Some(&Column::Summary));
        assert!(config.open_command.iter().any(|arg| arg == "{url}"));
        assert_eq!(config.query_index("team"), Some(1));
    }

    #[test]
    fn parses_columns_and_key_overrides() {
        let input = format!(
            "columns = [\"key\", \"watchers\", \"summary\"]\n{}\n[keys]\nquit = \"ctrl+q\"\n",
            MINIMAL
        );
        let config = Config::parse(&input).expect("parse config");

        assert_eq!(
            config.columns,
            vec![Column::Key, Column::Watchers, Column::Summary]
        );
        assert_eq!(config.keys.get("quit").map(String::as_str), Some("ctrl+q"));
    }

    #[test]
    fn rejects_missing_server_section() {
        let input = r#"
            [[queries]]
            alias = "mine"
            query = "assignee = currentUser()"
        "#;
        let error = Config::parse(input).expect_err("missing server");
        assert!(matches!(error, ConfigError::MissingServer));
    }

    #[test]
    fn rejects_malformed_url() {
        let input = MINIMAL.replace("https://example.atlassian.net/", "not a url");
        let error = Config::parse(&input).expect_err("bad url");
        assert!(matches!(error, ConfigError::InvalidUrl(_)));

        let input = MINIMAL.replace("https://example.atlassian.net/", "ftp://example.net");
        let error = Config::parse(&input).expect_err("bad scheme");
        assert!(matches!(error, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn rejects_empty_query_list() {
        let input = r#"
            [server]
            url = "https://example.atlassian.net"
        "#;
        let error = Config::parse(input).expect_err("no queries");
        assert!(matches!(error, ConfigError::NoQueries));
    }

    #[test]
    fn rejects_duplicate_alias() {
        let input = MINIMAL.replace("alias = \"team\"", "alias = \"mine\"");
        let error = Config::parse(&input).expect_err("duplicate alias");
        assert!(matches!(error, ConfigError::DuplicateAlias(alias) if alias == "mine"));
    }

    #[test]
    fn rejects_invalid_date_format() {
        let input = format!("date_format = \"%Y-%Q\"\n{}", MINIMAL);
        let error = Config::parse(&input).expect_err("bad date format");
        assert!(matches!(error, ConfigError::InvalidDateFormat(_)));
    }

    #[test]
    fn rejects_open_command_without_placeholder() {
        let input = format!("open_command = [\"firefox\"]\n{}", MINIMAL);
        let error = Config::parse(&input).expect_err("no placeholder");
        assert!(matches!(error, ConfigError::OpenCommandPlaceholder));
    }

    #[test]
    fn load_from_reports_missing_file_and_reads_existing_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let error = Config::load_from(&path).expect_err("missing file");
        assert!(matches!(error, ConfigError::Missing(_)));

        let mut file = std::fs::File::create(&path).expect("create config");
        file.write_all(MINIMAL.as_bytes()).expect("write config");
        let config = Config::load_from(&path).expect("load config");
        assert_eq!(config.queries[0].alias, "mine");
    }
}
