use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Name of the optional per-project configuration file
pub const CONFIG_FILE_NAME: &str = ".chronos.yml";

/// Provider used when neither the CLI nor the config file names one
pub const DEFAULT_PROVIDER: &str = "openai";

const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";
const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for one LLM provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProviderConfig {
    #[validate(length(min = 1, message = "API key is not set"))]
    pub api_key: String,

    #[validate(length(min = 1, message = "model is not set"))]
    pub model: String,

    #[validate(url)]
    pub base_url: String,
}

/// On-disk shape of `.chronos.yml`; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_updates: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,

    #[serde(default)]
    pub providers: BTreeMap<String, ProviderFileEntry>,
}

/// Provider section of `.chronos.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderFileEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Process-wide settings, resolved once and handed to every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory every relative path is resolved against
    pub working_dir: PathBuf,

    /// Raise the log filter to debug
    pub debug: bool,

    /// Run the release check before the command
    pub check_updates: bool,

    /// Provider used by `commit-message` when `--provider` is absent
    pub default_provider: String,

    /// Known LLM providers by name
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl AppConfig {
    /// Built-in defaults for a working directory
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(
            DEFAULT_PROVIDER.to_string(),
            ProviderConfig {
                api_key: String::new(),
                model: OPENAI_DEFAULT_MODEL.to_string(),
                base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
            },
        );

        Self {
            working_dir: working_dir.into(),
            debug: false,
            check_updates: true,
            default_provider: DEFAULT_PROVIDER.to_string(),
            providers,
        }
    }

    /// Layer a config file and environment variables over the defaults
    ///
    /// `env` is a lookup function so callers can pass `std::env::var` or a
    /// fixed map in tests.
    pub fn resolve<F>(working_dir: impl Into<PathBuf>, file: Option<ConfigFile>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(working_dir);

        if let Some(file) = file {
            config.apply_file(file);
        }

        if let Some(value) = env("CHRONOS_DEBUG").or_else(|| env("DEBUG")) {
            config.debug = parse_flag(&value);
        }
        if let Some(value) = env("CHRONOS_NO_UPDATE_CHECK") {
            if parse_flag(&value) {
                config.check_updates = false;
            }
        }

        if let Some(openai) = config.providers.get_mut(DEFAULT_PROVIDER) {
            if let Some(key) = env("OPENAI_API_KEY") {
                openai.api_key = key;
            }
            if let Some(model) = env("OPENAI_MODEL") {
                openai.model = model;
            }
            if let Some(base_url) = env("OPENAI_API_BASE") {
                openai.base_url = base_url;
            }
        }

        config
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
        if let Some(check_updates) = file.check_updates {
            self.check_updates = check_updates;
        }
        if let Some(provider) = file.default_provider {
            self.default_provider = provider;
        }

        for (name, entry) in file.providers {
            let provider = self.providers.entry(name).or_insert_with(|| ProviderConfig {
                api_key: String::new(),
                model: String::new(),
                base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
            });
            if let Some(key) = entry.api_key {
                provider.api_key = key;
            }
            if let Some(model) = entry.model {
                provider.model = model;
            }
            if let Some(base_url) = entry.base_url {
                provider.base_url = base_url;
            }
        }
    }

    /// Resolve a possibly relative path against the working directory
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
