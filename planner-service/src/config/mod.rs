use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;

/// Resolved against the working directory the binary is started from.
pub const DEFAULT_STATIC_DIR: &str = "static";

pub const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_CONTEXT_RESULT_LIMIT: u32 = 6;
const DEFAULT_CONTEXT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub common: core_config::Config,
    pub model: ModelConfig,
    pub context: ContextConfig,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

/// Settings for the chat-completions provider.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: Secret<String>,
    /// Base URL of the OpenAI-compatible API, without trailing slash.
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

/// Settings for the destination context lookup.
#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub enabled: bool,
    pub api_url: String,
    pub result_limit: u32,
    pub timeout_secs: u64,
}

impl PlannerConfig {
    /// Load from the process environment (and `.env`).
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so callers can supply settings
    /// without touching the process environment.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let get = |key: &str, default: Option<&str>| get_env(&lookup, key, default, is_prod);

        Ok(PlannerConfig {
            common,
            model: ModelConfig {
                api_key: Secret::new(get("GROQ_API_KEY", None)?),
                api_base: get("GROQ_API_BASE", Some(DEFAULT_API_BASE))?
                    .trim_end_matches('/')
                    .to_string(),
                model: get("LLM_MODEL", Some(DEFAULT_MODEL))?,
                temperature: get("LLM_TEMPERATURE", Some("0.3"))?
                    .parse()
                    .unwrap_or(DEFAULT_TEMPERATURE),
                max_tokens: get("LLM_MAX_TOKENS", Some("2048"))?
                    .parse()
                    .unwrap_or(DEFAULT_MAX_TOKENS),
                timeout_secs: get("LLM_TIMEOUT_SECS", Some("120"))?
                    .parse()
                    .unwrap_or(DEFAULT_MODEL_TIMEOUT_SECS),
            },
            context: ContextConfig {
                enabled: parse_bool(&get("CONTEXT_ENABLED", Some("true"))?),
                api_url: get("WIKIPEDIA_API_URL", Some(DEFAULT_WIKIPEDIA_API_URL))?,
                result_limit: get("WIKIPEDIA_RESULT_LIMIT", Some("6"))?
                    .parse()
                    .unwrap_or(DEFAULT_CONTEXT_RESULT_LIMIT),
                timeout_secs: get("CONTEXT_TIMEOUT_SECS", Some("10"))?
                    .parse()
                    .unwrap_or(DEFAULT_CONTEXT_TIMEOUT_SECS),
            },
            static_dir: PathBuf::from(get("STATIC_DIR", Some(DEFAULT_STATIC_DIR))?),
            log_level: get("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
        })
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
