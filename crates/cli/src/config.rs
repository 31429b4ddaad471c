use anyhow::{anyhow, Context, Result};
use hostel_catalog::{JsonFileStore, RecordStore, RestStore, RestStoreConfig};
use hostel_search::SearchOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "hostel-search.toml";

pub(crate) const STORE_FILE_ENV: &str = "HOSTEL_STORE_FILE";
pub(crate) const STORE_URL_ENV: &str = "HOSTEL_STORE_URL";
pub(crate) const STORE_KEY_ENV: &str = "HOSTEL_STORE_KEY";
pub(crate) const RUN_MODE_ENV: &str = "HOSTEL_ENV";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    store: RawStoreConfig,
    #[serde(default)]
    search: RawSearchConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStoreConfig {
    kind: Option<String>,
    path: Option<PathBuf>,
    url: Option<String>,
    api_key: Option<String>,
    table: Option<String>,
    rooms_table: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSearchConfig {
    default_limit: Option<usize>,
    fetch_timeout_ms: Option<u64>,
    suggestions: Option<Vec<String>>,
}

/// Values that outrank the config file: CLI flags first, then environment.
#[derive(Clone, Debug, Default)]
pub(crate) struct Overrides {
    pub config_path: Option<PathBuf>,
    pub store_file: Option<PathBuf>,
    pub store_url: Option<String>,
    pub dev: bool,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct EnvOverrides {
    pub store_file: Option<PathBuf>,
    pub store_url: Option<String>,
    pub store_key: Option<String>,
    pub run_mode: Option<String>,
}

impl EnvOverrides {
    pub(crate) fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            store_file: var(STORE_FILE_ENV).map(PathBuf::from),
            store_url: var(STORE_URL_ENV),
            store_key: var(STORE_KEY_ENV),
            run_mode: var(RUN_MODE_ENV),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum StoreConfig {
    File(PathBuf),
    Rest(RestStoreConfig),
}

#[derive(Clone, Debug)]
pub(crate) struct AppConfig {
    pub store: StoreConfig,
    pub search: SearchOptions,
    /// Include underlying error detail in failure replies
    pub expose_errors: bool,
}

impl AppConfig {
    pub(crate) fn load(overrides: &Overrides, env: &EnvOverrides) -> Result<Self> {
        let raw = match &overrides.config_path {
            Some(path) => read_config(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    read_config(default)?
                } else {
                    RawConfig::default()
                }
            }
        };
        Self::from_raw(raw, overrides, env)
    }

    fn from_raw(raw: RawConfig, overrides: &Overrides, env: &EnvOverrides) -> Result<Self> {
        let search = search_options(raw.search)?;
        let store = store_config(raw.store, overrides, env)?;
        let expose_errors = overrides.dev
            || env
                .run_mode
                .as_deref()
                .is_some_and(|mode| matches!(mode.to_ascii_lowercase().as_str(), "development" | "dev"));

        Ok(Self {
            store,
            search,
            expose_errors,
        })
    }

    pub(crate) fn build_store(&self) -> Result<Arc<dyn RecordStore>> {
        Ok(match &self.store {
            StoreConfig::File(path) => Arc::new(JsonFileStore::new(path)),
            StoreConfig::Rest(cfg) => {
                Arc::new(RestStore::new(cfg.clone()).context("Failed to configure REST store")?)
            }
        })
    }
}

fn read_config(path: &Path) -> Result<RawConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn search_options(raw: RawSearchConfig) -> Result<SearchOptions> {
    let mut options = SearchOptions::default();
    if let Some(limit) = raw.default_limit {
        options.default_limit = limit;
    }
    if let Some(ms) = raw.fetch_timeout_ms {
        options.fetch_timeout = Duration::from_millis(ms);
    }
    if let Some(suggestions) = raw.suggestions.filter(|s| !s.is_empty()) {
        options.suggestions = suggestions;
    }

    if options.default_limit == 0 {
        return Err(anyhow!("search.default_limit must be positive"));
    }
    if options.fetch_timeout.is_zero() {
        return Err(anyhow!("search.fetch_timeout_ms must be positive"));
    }
    Ok(options)
}

fn store_config(raw: RawStoreConfig, overrides: &Overrides, env: &EnvOverrides) -> Result<StoreConfig> {
    let rest = |url: String| {
        let mut cfg = RestStoreConfig::new(url);
        cfg.api_key = env.store_key.clone().or_else(|| raw.api_key.clone());
        if let Some(table) = &raw.table {
            cfg.table = table.clone();
        }
        if let Some(rooms_table) = &raw.rooms_table {
            cfg.rooms_table = rooms_table.clone();
        }
        if let Some(ms) = raw.timeout_ms {
            cfg.timeout = Duration::from_millis(ms);
        }
        StoreConfig::Rest(cfg)
    };

    if let Some(path) = &overrides.store_file {
        return Ok(StoreConfig::File(path.clone()));
    }
    if let Some(url) = &overrides.store_url {
        return Ok(rest(url.clone()));
    }
    match (&env.store_file, &env.store_url) {
        (Some(_), Some(_)) => {
            return Err(anyhow!("{STORE_FILE_ENV} and {STORE_URL_ENV} are mutually exclusive"))
        }
        (Some(path), None) => return Ok(StoreConfig::File(path.clone())),
        (None, Some(url)) => return Ok(rest(url.clone())),
        (None, None) => {}
    }

    match raw.kind.as_deref().map(str::trim) {
        Some("file") => raw
            .path
            .clone()
            .map(StoreConfig::File)
            .ok_or_else(|| anyhow!("store.kind = \"file\" requires store.path")),
        Some("rest") => raw
            .url
            .clone()
            .map(rest)
            .ok_or_else(|| anyhow!("store.kind = \"rest\" requires store.url")),
        Some(other) => Err(anyhow!("Unknown store.kind '{other}' (expected file|rest)")),
        None => Err(anyhow!(
            "No record store configured: pass --store-file or --store-url, set {STORE_FILE_ENV}/{STORE_URL_ENV}, or add [store] to {DEFAULT_CONFIG_FILE}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> RawConfig {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn file_config_selects_rest_store() {
        let raw = parse(
            r#"
            [store]
            kind = "rest"
            url = "https://db.example.org"
            api_key = "from-file"
            table = "hostel_listings"
            timeout_ms = 3000

            [search]
            default_limit = 5
            suggestions = ["ac rooms"]
            "#,
        );
        let cfg = AppConfig::from_raw(raw, &Overrides::default(), &EnvOverrides::default()).unwrap();

        let StoreConfig::Rest(rest) = &cfg.store else {
            panic!("expected rest store");
        };
        assert_eq!(rest.api_key.as_deref(), Some("from-file"));
        assert_eq!(rest.table, "hostel_listings");
        assert_eq!(rest.rooms_table, "rooms");
        assert_eq!(rest.timeout, Duration::from_secs(3));
        assert_eq!(cfg.search.default_limit, 5);
        assert_eq!(cfg.search.suggestions, vec!["ac rooms".to_string()]);
        assert!(!cfg.expose_errors);
    }

    #[test]
    fn flags_beat_env_and_env_beats_file() {
        let raw = parse("[store]\nkind = \"file\"\npath = \"from-file.json\"\n");
        let env = EnvOverrides {
            store_url: Some("https://env.example.org".to_string()),
            store_key: Some("env-key".to_string()),
            ..Default::default()
        };

        let cfg = AppConfig::from_raw(raw.clone(), &Overrides::default(), &env).unwrap();
        let StoreConfig::Rest(rest) = &cfg.store else {
            panic!("expected env url to win over file");
        };
        assert_eq!(rest.api_key.as_deref(), Some("env-key"));

        let flags = Overrides {
            store_file: Some(PathBuf::from("flag.json")),
            ..Default::default()
        };
        let cfg = AppConfig::from_raw(raw, &flags, &env).unwrap();
        assert!(matches!(cfg.store, StoreConfig::File(ref p) if p == Path::new("flag.json")));
    }

    #[test]
    fn dev_mode_from_flag_or_env() {
        let raw = parse("[store]\nkind = \"file\"\npath = \"x.json\"\n");
        let env = EnvOverrides {
            run_mode: Some("Development".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::from_raw(raw.clone(), &Overrides::default(), &env).unwrap().expose_errors);

        let flags = Overrides {
            dev: true,
            ..Default::default()
        };
        assert!(AppConfig::from_raw(raw, &flags, &EnvOverrides::default()).unwrap().expose_errors);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let none = EnvOverrides::default();
        let flags = Overrides::default();

        let err = AppConfig::from_raw(RawConfig::default(), &flags, &none).unwrap_err();
        assert!(err.to_string().contains("No record store configured"));

        let err = AppConfig::from_raw(parse("[store]\nkind = \"sql\"\n"), &flags, &none).unwrap_err();
        assert!(err.to_string().contains("Unknown store.kind"));

        let err = AppConfig::from_raw(parse("[store]\nkind = \"file\"\n"), &flags, &none).unwrap_err();
        assert!(err.to_string().contains("requires store.path"));

        let raw = parse("[store]\nkind = \"file\"\npath = \"x.json\"\n[search]\ndefault_limit = 0\n");
        let err = AppConfig::from_raw(raw, &flags, &none).unwrap_err();
        assert!(err.to_string().contains("default_limit must be positive"));

        assert!(toml::from_str::<RawConfig>("[store]\nbogus = 1\n").is_err());
    }
}
