// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Environment variable names, collaborator defaults, and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Service names used in structured logging
pub mod service_names {
    /// Main API server
    pub const MEALWISE_SERVER: &str = "mealwise-server";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
}

/// Environment variable names read by `ServerConfig::from_env`
pub mod env_vars {
    /// HTTP port
    pub const PORT: &str = "PORT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Allowed CORS origins
    pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
    /// Temporary upload directory
    pub const UPLOAD_DIR: &str = "UPLOAD_DIR";
    /// Maximum upload size in bytes
    pub const MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";

    /// Nutrition provider selector (`nutritionix` or `usda`)
    pub const NUTRITION_PROVIDER: &str = "NUTRITION_PROVIDER";
    /// Nutritionix application id
    pub const NUTRITIONIX_APP_ID: &str = "NUTRITIONIX_APP_ID";
    /// Nutritionix application key
    pub const NUTRITIONIX_APP_KEY: &str = "NUTRITIONIX_APP_KEY";
    /// Nutritionix base URL override
    pub const NUTRITIONIX_BASE_URL: &str = "NUTRITIONIX_BASE_URL";
    /// USDA `FoodData` Central API key
    pub const USDA_API_KEY: &str = "USDA_API_KEY";
    /// USDA base URL override
    pub const USDA_BASE_URL: &str = "USDA_BASE_URL";
    /// Per-lookup timeout in seconds
    pub const NUTRITION_TIMEOUT_SECS: &str = "NUTRITION_TIMEOUT_SECS";
    /// Maximum lookups in flight for one request
    pub const NUTRITION_MAX_CONCURRENT: &str = "NUTRITION_MAX_CONCURRENT";

    /// Google Vision API key
    pub const VISION_API_KEY: &str = "GOOGLE_VISION_API_KEY";
    /// Google Vision base URL override
    pub const VISION_BASE_URL: &str = "GOOGLE_VISION_BASE_URL";
    /// Label detection timeout in seconds
    pub const VISION_TIMEOUT_SECS: &str = "VISION_TIMEOUT_SECS";
    /// Maximum labels kept from one image
    pub const VISION_MAX_LABELS: &str = "VISION_MAX_LABELS";

    /// Language model API key
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Language model identifier
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    /// Alternate OpenAI-compatible endpoint
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    /// Optional reasoning-effort hint
    pub const OPENAI_REASONING_EFFORT: &str = "OPENAI_REASONING_EFFORT";
    /// Language model timeout in seconds
    pub const LLM_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";

    /// Program generation mode (`live`, `fallback`, `live_with_fallback`)
    pub const PROGRAM_GENERATION_MODE: &str = "PROGRAM_GENERATION_MODE";
}

/// Collaborator defaults
pub mod defaults {
    /// Nutritionix API base
    pub const NUTRITIONIX_BASE_URL: &str = "https://trackapi.nutritionix.com";
    /// USDA `FoodData` Central API base
    pub const USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Google Vision API base
    pub const VISION_BASE_URL: &str = "https://vision.googleapis.com/v1";
    /// OpenAI API base
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default language model
    pub const OPENAI_MODEL: &str = "gpt-4o-mini";

    /// Per-lookup timeout
    pub const NUTRITION_TIMEOUT_SECS: u64 = 10;
    /// Lookups in flight per request
    pub const NUTRITION_MAX_CONCURRENT: usize = 4;
    /// Label detection timeout
    pub const VISION_TIMEOUT_SECS: u64 = 20;
    /// Labels kept from one image
    pub const VISION_MAX_LABELS: usize = 10;
    /// Language model timeout
    pub const LLM_TIMEOUT_SECS: u64 = 60;

    /// Temporary upload directory
    pub const UPLOAD_DIR: &str = "/tmp/mealwise-uploads";
    /// Maximum upload size (10 MiB)
    pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
}

/// Shared wire strings
pub mod messages {
    /// Marker substituted for every absent profile field
    pub const UNSPECIFIED: &str = "unspecified";
    /// Per-item error annotation for a failed nutrition lookup
    pub const LOOKUP_FAILED: &str = "Nutrition lookup failed";
    /// Warning attached when no nutrition credentials are configured
    pub const NUTRITION_NOT_CONFIGURED: &str = "Nutrition lookup keys not configured";
}
