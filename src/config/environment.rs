// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Loads collaborator credentials, timeouts, and generation mode once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! The whole configuration is read once at process start into an immutable
//! [`ServerConfig`] and handed to components explicitly. Absent credentials
//! are a valid state: they switch the affected pipeline into its handled
//! "unconfigured" behavior instead of failing startup. Values that are present
//! but unrecognized (an unknown generation mode, for instance) are rejected.

use anyhow::{anyhow, Result};
use mealwise_core::constants::{defaults, env_vars, ports};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which nutrition lookup service answers label queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NutritionProviderKind {
    /// Nutritionix natural-language nutrients endpoint
    #[default]
    Nutritionix,
    /// USDA `FoodData` Central search
    Usda,
}

impl FromStr for NutritionProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nutritionix" => Ok(Self::Nutritionix),
            "usda" => Ok(Self::Usda),
            other => Err(anyhow!(
                "Unknown {}: '{other}' (expected nutritionix or usda)",
                env_vars::NUTRITION_PROVIDER
            )),
        }
    }
}

/// Reasoning-effort hint forwarded to models that support it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    /// Minimal deliberation
    Low,
    /// Balanced
    Medium,
    /// Maximum deliberation
    High,
}

impl ReasoningEffort {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for ReasoningEffort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(anyhow!(
                "Unknown {}: '{other}' (expected low, medium or high)",
                env_vars::OPENAI_REASONING_EFFORT
            )),
        }
    }
}

/// How diet programs are produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Always call the language model
    #[default]
    Live,
    /// Never call the model; serve the canned program set
    Fallback,
    /// Call the model, serve the canned set if the call itself fails
    LiveWithFallback,
}

impl FromStr for GenerationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "fallback" | "static" | "mock" => Ok(Self::Fallback),
            "live_with_fallback" => Ok(Self::LiveWithFallback),
            other => Err(anyhow!(
                "Unknown {}: '{other}' (expected live, fallback or live_with_fallback)",
                env_vars::PROGRAM_GENERATION_MODE
            )),
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Fallback => write!(f, "fallback"),
            Self::LiveWithFallback => write!(f, "live_with_fallback"),
        }
    }
}

/// Nutritionix application credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionixCredentials {
    /// `x-app-id` header value
    pub app_id: String,
    /// `x-app-key` header value
    pub app_key: String,
}

/// Nutrition lookup configuration
#[derive(Debug, Clone)]
pub struct NutritionConfig {
    /// Selected provider
    pub provider: NutritionProviderKind,
    /// Nutritionix credentials, both halves required
    pub nutritionix: Option<NutritionixCredentials>,
    /// Nutritionix API base
    pub nutritionix_base_url: String,
    /// USDA API key
    pub usda_api_key: Option<String>,
    /// USDA API base
    pub usda_base_url: String,
    /// Per-lookup timeout
    pub timeout_secs: u64,
    /// Lookups in flight for one request
    pub max_concurrent: usize,
}

impl NutritionConfig {
    /// Whether the selected provider has its credentials
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        match self.provider {
            NutritionProviderKind::Nutritionix => self.nutritionix.is_some(),
            NutritionProviderKind::Usda => self.usda_api_key.is_some(),
        }
    }

    /// Per-lookup timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            provider: NutritionProviderKind::default(),
            nutritionix: None,
            nutritionix_base_url: defaults::NUTRITIONIX_BASE_URL.to_owned(),
            usda_api_key: None,
            usda_base_url: defaults::USDA_BASE_URL.to_owned(),
            timeout_secs: defaults::NUTRITION_TIMEOUT_SECS,
            max_concurrent: defaults::NUTRITION_MAX_CONCURRENT,
        }
    }
}

/// Label detection configuration
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Google Vision API key; the placeholder detector is used without it
    pub api_key: Option<String>,
    /// API base
    pub base_url: String,
    /// Detection timeout
    pub timeout_secs: u64,
    /// Labels kept per image
    pub max_labels: usize,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: defaults::VISION_BASE_URL.to_owned(),
            timeout_secs: defaults::VISION_TIMEOUT_SECS,
            max_labels: defaults::VISION_MAX_LABELS,
        }
    }
}

/// Language model configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key; generation is unavailable without it
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Alternate OpenAI-compatible endpoint
    pub base_url: Option<String>,
    /// Optional reasoning-effort hint
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Call timeout
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Whether credentials are present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Call timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::OPENAI_MODEL.to_owned(),
            base_url: None,
            reasoning_effort: None,
            timeout_secs: defaults::LLM_TIMEOUT_SECS,
        }
    }
}

/// Temporary upload storage
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory holding in-flight uploads
    pub directory: PathBuf,
    /// Maximum accepted image size
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(defaults::UPLOAD_DIR),
            max_bytes: defaults::MAX_UPLOAD_BYTES,
        }
    }
}

/// Process-wide configuration, immutable after startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Comma-separated CORS origins, `*` for any
    pub cors_origins: String,
    /// Upload storage
    pub uploads: UploadConfig,
    /// Nutrition lookups
    pub nutrition: NutritionConfig,
    /// Label detection
    pub vision: VisionConfig,
    /// Language model
    pub llm: LlmConfig,
    /// Diet program generation mode
    pub generation_mode: GenerationMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            cors_origins: "*".to_owned(),
            uploads: UploadConfig::default(),
            nutrition: NutritionConfig::default(),
            vision: VisionConfig::default(),
            llm: LlmConfig::default(),
            generation_mode: GenerationMode::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a present value cannot be recognized.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a present value cannot be recognized.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let nutritionix = match (
            get(env_vars::NUTRITIONIX_APP_ID),
            get(env_vars::NUTRITIONIX_APP_KEY),
        ) {
            (Some(app_id), Some(app_key)) => Some(NutritionixCredentials { app_id, app_key }),
            (Some(_), None) | (None, Some(_)) => {
                warn!("Only one of the Nutritionix app id/key is set; lookups stay disabled");
                None
            }
            (None, None) => None,
        };

        let nutrition = NutritionConfig {
            provider: get(env_vars::NUTRITION_PROVIDER)
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
            nutritionix,
            nutritionix_base_url: get(env_vars::NUTRITIONIX_BASE_URL)
                .unwrap_or_else(|| defaults::NUTRITIONIX_BASE_URL.to_owned()),
            usda_api_key: get(env_vars::USDA_API_KEY),
            usda_base_url: get(env_vars::USDA_BASE_URL)
                .unwrap_or_else(|| defaults::USDA_BASE_URL.to_owned()),
            timeout_secs: parse_or(
                env_vars::NUTRITION_TIMEOUT_SECS,
                get(env_vars::NUTRITION_TIMEOUT_SECS),
                defaults::NUTRITION_TIMEOUT_SECS,
            )
            .max(1),
            max_concurrent: parse_or(
                env_vars::NUTRITION_MAX_CONCURRENT,
                get(env_vars::NUTRITION_MAX_CONCURRENT),
                defaults::NUTRITION_MAX_CONCURRENT,
            )
            .max(1),
        };

        let vision = VisionConfig {
            api_key: get(env_vars::VISION_API_KEY),
            base_url: get(env_vars::VISION_BASE_URL)
                .unwrap_or_else(|| defaults::VISION_BASE_URL.to_owned()),
            timeout_secs: parse_or(
                env_vars::VISION_TIMEOUT_SECS,
                get(env_vars::VISION_TIMEOUT_SECS),
                defaults::VISION_TIMEOUT_SECS,
            )
            .max(1),
            max_labels: parse_or(
                env_vars::VISION_MAX_LABELS,
                get(env_vars::VISION_MAX_LABELS),
                defaults::VISION_MAX_LABELS,
            ),
        };

        let llm = LlmConfig {
            api_key: get(env_vars::OPENAI_API_KEY),
            model: get(env_vars::OPENAI_MODEL).unwrap_or_else(|| defaults::OPENAI_MODEL.to_owned()),
            base_url: get(env_vars::OPENAI_BASE_URL),
            reasoning_effort: get(env_vars::OPENAI_REASONING_EFFORT)
                .map(|v| v.parse())
                .transpose()?,
            timeout_secs: parse_or(
                env_vars::LLM_TIMEOUT_SECS,
                get(env_vars::LLM_TIMEOUT_SECS),
                defaults::LLM_TIMEOUT_SECS,
            )
            .max(1),
        };

        let uploads = UploadConfig {
            directory: get(env_vars::UPLOAD_DIR)
                .map_or_else(|| PathBuf::from(defaults::UPLOAD_DIR), PathBuf::from),
            max_bytes: parse_or(
                env_vars::MAX_UPLOAD_BYTES,
                get(env_vars::MAX_UPLOAD_BYTES),
                defaults::MAX_UPLOAD_BYTES,
            ),
        };

        Ok(Self {
            http_port: parse_or(
                env_vars::PORT,
                get(env_vars::PORT),
                ports::DEFAULT_HTTP_PORT,
            ),
            environment: Environment::from_str_or_default(
                &get(env_vars::ENVIRONMENT).unwrap_or_default(),
            ),
            cors_origins: get(env_vars::CORS_ORIGINS).unwrap_or_else(|| "*".to_owned()),
            uploads,
            nutrition,
            vision,
            llm,
            generation_mode: get(env_vars::PROGRAM_GENERATION_MODE)
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Mealwise Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Upload Dir: {} (max {} bytes)\n\
             - Nutrition Lookup: {:?} ({})\n\
             - Label Detection: {}\n\
             - Language Model: {} ({})\n\
             - Program Generation: {}",
            self.http_port,
            self.environment,
            self.uploads.directory.display(),
            self.uploads.max_bytes,
            self.nutrition.provider,
            enabled(self.nutrition.is_configured()),
            if self.vision.api_key.is_some() {
                "Google Vision"
            } else {
                "Placeholder"
            },
            self.llm.model,
            enabled(self.llm.is_configured()),
            self.generation_mode,
        )
    }
}

const fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy + fmt::Display,
{
    raw.map_or(default, |value| {
        value.parse().unwrap_or_else(|_| {
            warn!("Invalid value '{value}' for {key}, using default {default}");
            default
        })
    })
}
