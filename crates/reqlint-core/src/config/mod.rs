//! Run configuration: `reqlint.yaml` plus credentials read once at startup.

use crate::errors::ReviewError;
use crate::rules::EvaluationRule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CONFIG_FILE: &str = "reqlint.yaml";
pub const DEFAULT_OUTPUT_FILE: &str = "evaluation_result.md";
pub const DEFAULT_MODEL: &str = "o4-mini";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-12-01-preview";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

pub const ENV_AZURE_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_AZURE_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_AZURE_VERSION: &str = "AZURE_OPENAI_VERSION";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_NETWORK_POLICY: &str = "REQLINT_NETWORK_POLICY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Azure,
    OpenAi,
    Fake,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::OpenAi => "openai",
            Self::Fake => "fake",
        }
    }
}

/// Whether model providers may reach the network. `deny` leaves only the
/// offline `fake` provider usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPolicy {
    #[default]
    Allow,
    Deny,
}

impl FromStr for NetworkPolicy {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            other => Err(ReviewError::config(
                None,
                format!("{ENV_NETWORK_POLICY}: unknown policy '{other}' (expected allow or deny)"),
            )),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "azure" => Ok(Self::Azure),
            "openai" => Ok(Self::OpenAi),
            "fake" => Ok(Self::Fake),
            other => Err(ReviewError::config(
                None,
                format!("unknown provider '{other}' (expected azure, openai or fake)"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    pub provider: ProviderKind,
    /// Model id (OpenAI) or deployment name (Azure).
    pub model: String,
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub max_tokens: u32,
    /// Chapters evaluated concurrently; 1 keeps the run strictly sequential.
    pub parallel: usize,
    pub rules: Vec<EvaluationRule>,
    pub output: PathBuf,
    pub network: NetworkPolicy,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_version: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            parallel: 1,
            rules: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            network: NetworkPolicy::Allow,
        }
    }
}

impl ReviewConfig {
    pub fn validate(&self, path: Option<&Path>) -> Result<(), ReviewError> {
        let at = || path.map(Path::to_path_buf);
        if self.parallel == 0 {
            return Err(ReviewError::config(at(), "parallel must be at least 1"));
        }
        if self.max_tokens == 0 {
            return Err(ReviewError::config(at(), "max_tokens must be at least 1"));
        }
        if self.model.trim().is_empty() {
            return Err(ReviewError::config(at(), "model must not be empty"));
        }
        Ok(())
    }
}

pub fn parse_config(raw: &str, path: Option<&Path>) -> Result<ReviewConfig, ReviewError> {
    let cfg: ReviewConfig = serde_yaml::from_str(raw)
        .map_err(|e| ReviewError::config(path.map(Path::to_path_buf), e.to_string()))?;
    cfg.validate(path)?;
    Ok(cfg)
}

/// Loads `path`, or `reqlint.yaml` from the working directory when no path
/// is given and that file exists, or defaults.
pub fn load_config(path: Option<&Path>) -> Result<ReviewConfig, ReviewError> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ReviewError::config(
                    Some(p.to_path_buf()),
                    "config file not found",
                ));
            }
            p.to_path_buf()
        }
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                return Ok(ReviewConfig::default());
            }
            fallback
        }
    };

    let raw = std::fs::read_to_string(&path)
        .map_err(|e| ReviewError::config(Some(path.clone()), e.to_string()))?;
    let cfg = parse_config(&raw, Some(&path))?;
    tracing::debug!(path = %path.display(), provider = %cfg.provider, "loaded config");
    Ok(cfg)
}

/// Everything a provider client needs, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub endpoint: Option<String>,
    pub api_version: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub network: NetworkPolicy,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("network", &self.network)
            .finish()
    }
}

impl ServiceConfig {
    pub fn from_env_and_config(cfg: &ReviewConfig) -> Result<Self, ReviewError> {
        Self::resolve(cfg, |var| {
            std::env::var(var).ok().filter(|v| !v.trim().is_empty())
        })
    }

    /// Resolves credentials through `lookup` (environment in production).
    /// File values win over the environment for endpoint and api version;
    /// `REQLINT_NETWORK_POLICY=deny` can only tighten the file's policy.
    pub fn resolve(
        cfg: &ReviewConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ReviewError> {
        let mut out = Self {
            provider: cfg.provider,
            model: cfg.model.clone(),
            endpoint: None,
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
            api_key: None,
            max_tokens: cfg.max_tokens,
            network: cfg.network,
        };
        if let Some(raw) = lookup(ENV_NETWORK_POLICY) {
            if raw.parse::<NetworkPolicy>()? == NetworkPolicy::Deny {
                out.network = NetworkPolicy::Deny;
            }
        }

        match cfg.provider {
            ProviderKind::Fake => {}
            ProviderKind::OpenAi => {
                out.api_key = Some(lookup(ENV_OPENAI_API_KEY).ok_or(
                    ReviewError::MissingCredential {
                        provider: "openai",
                        var: ENV_OPENAI_API_KEY,
                    },
                )?);
                out.endpoint = cfg.endpoint.clone();
            }
            ProviderKind::Azure => {
                out.api_key = Some(lookup(ENV_AZURE_API_KEY).ok_or(
                    ReviewError::MissingCredential {
                        provider: "azure",
                        var: ENV_AZURE_API_KEY,
                    },
                )?);
                out.endpoint = Some(
                    cfg.endpoint
                        .clone()
                        .or_else(|| lookup(ENV_AZURE_ENDPOINT))
                        .ok_or(ReviewError::MissingCredential {
                            provider: "azure",
                            var: ENV_AZURE_ENDPOINT,
                        })?,
                );
                if let Some(v) = cfg.api_version.clone().or_else(|| lookup(ENV_AZURE_VERSION)) {
                    out.api_version = v;
                }
            }
        }
        Ok(out)
    }
}
