use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Rewrite service config
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Rewrite provider type
///
/// Every provider speaks the OpenAI chat-completions wire format.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RewriteProvider {
    // @provider: OpenRouter
    #[default]
    OpenRouter,
    // @provider: OpenAI
    OpenAI,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl RewriteProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenRouter => "OpenRouter",
            Self::OpenAI => "OpenAI",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenRouter => "openrouter".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }

    // @returns: Whether requests must carry a bearer token
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::LMStudio)
    }

    // @returns: Provider-specific env var holding the API key
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::OpenRouter => Some("OPENROUTER_API_KEY"),
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::LMStudio => None,
        }
    }
}

impl std::fmt::Display for RewriteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for RewriteProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openrouter" => Ok(Self::OpenRouter),
            "openai" => Ok(Self::OpenAI),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL, without the /chat/completions suffix
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: RewriteProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(&provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(&provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Rewrite service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RewriteConfig {
    /// Rewrite provider to use
    #[serde(default)]
    pub provider: RewriteProvider,

    /// Available rewrite providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Settings shared by all providers
    #[serde(default)]
    pub common: RewriteCommonConfig,
}

/// Settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RewriteCommonConfig {
    /// File holding the system prompt; the built-in prompt is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_file: Option<PathBuf>,

    /// Sampling temperature, left to the service default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Completion token cap, left to the service default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    // Long transcripts take minutes to rewrite
    300
}

fn default_endpoint(provider: &RewriteProvider) -> String {
    match provider {
        RewriteProvider::OpenRouter => "https://openrouter.ai/api/v1".to_string(),
        RewriteProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        // LM Studio default server (OpenAI compatible) runs on port 1234 under /v1
        RewriteProvider::LMStudio => "http://localhost:1234/v1".to_string(),
    }
}

fn default_model(provider: &RewriteProvider) -> String {
    match provider {
        RewriteProvider::OpenRouter => "deepseek/deepseek-chat-v3-0324:free".to_string(),
        RewriteProvider::OpenAI => "gpt-4o-mini".to_string(),
        // Placeholder; users should set to the loaded model name in LM Studio
        RewriteProvider::LMStudio => "local-model".to_string(),
    }
}

impl Config {
    /// Load the configuration from a JSON file, or fall back to defaults when
    /// the file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Write the default configuration as pretty JSON
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(&Config::default())
            .context("Failed to serialize default config to JSON")?;
        fs::write(path.as_ref(), config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Apply credentials and overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides using an arbitrary variable lookup
    ///
    /// `SCRIBEDOWN_API_KEY` wins over the provider-specific key variable.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("SCRIBEDOWN_API_KEY").or_else(|| {
            self.rewrite
                .provider
                .api_key_env_var()
                .and_then(|name| non_empty(name))
        });
        let model = non_empty("SCRIBEDOWN_MODEL");
        let endpoint = non_empty("SCRIBEDOWN_ENDPOINT");

        let provider_config = self.rewrite.active_provider_config_mut();
        if let Some(api_key) = api_key {
            provider_config.api_key = api_key;
        }
        if let Some(model) = model {
            provider_config.model = model;
        }
        if let Some(endpoint) = endpoint {
            provider_config.endpoint = endpoint;
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let provider = &self.rewrite.provider;

        if provider.requires_api_key() && self.rewrite.get_api_key().is_empty() {
            return Err(anyhow!(
                "An API key is required for the {} provider",
                provider.display_name()
            ));
        }

        if self.rewrite.get_model().trim().is_empty() {
            return Err(anyhow!("Model name cannot be empty"));
        }

        let endpoint = self.rewrite.get_endpoint();
        let url = Url::parse(&endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow!("Endpoint must use http or https: {}", endpoint));
        }

        if self.rewrite.get_timeout_secs() == 0 {
            return Err(anyhow!("Timeout must be greater than zero"));
        }

        if let Some(temperature) = self.rewrite.common.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(anyhow!("Temperature must be between 0.0 and 2.0, got {}", temperature));
            }
        }

        Ok(())
    }
}

impl RewriteConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &RewriteProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    // Inserts a default entry when the active provider has none
    fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        match self.get_active_provider_config() {
            Some(provider_config) if !provider_config.model.is_empty() => provider_config.model.clone(),
            _ => default_model(&self.provider),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        match self.get_active_provider_config() {
            Some(provider_config) if !provider_config.endpoint.is_empty() => provider_config.endpoint.clone(),
            _ => default_endpoint(&self.provider),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .unwrap_or_else(default_timeout_secs)
    }

    /// Set the model on the active provider
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.active_provider_config_mut().model = model.into();
    }

    /// Set the API key on the active provider
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.active_provider_config_mut().api_key = api_key.into();
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            provider: RewriteProvider::default(),
            available_providers: vec![
                ProviderConfig::new(RewriteProvider::OpenRouter),
                ProviderConfig::new(RewriteProvider::OpenAI),
                ProviderConfig::new(RewriteProvider::LMStudio),
            ],
            common: RewriteCommonConfig::default(),
        }
    }
}
