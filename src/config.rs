use std::env;

/// Static engine configuration. The engine itself is stateless; this only
/// carries incidental labeling and environment identification.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub app_name: String,
    pub environment: String,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "Clinic Admin".to_string()),
            environment: env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Clinic Admin".to_string(),
            environment: "development".to_string(),
        }
    }
}
