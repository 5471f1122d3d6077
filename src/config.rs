use std::env;
use std::path::PathBuf;

use crate::services::ai_client::AiSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    /// AI text-generation endpoint; `None` when no API key is configured,
    /// in which case report insights degrade to a placeholder string.
    pub ai: Option<AiSettings>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_path = env::var("FINTRACK_DATABASE_URL")
            .map(|v| {
                PathBuf::from(
                    v.strip_prefix("sqlite://")
                        .or_else(|| v.strip_prefix("sqlite:"))
                        .unwrap_or(&v),
                )
            })
            .unwrap_or_else(|_| PathBuf::from("data/fintrack.db"));

        let ai = match env::var("FINTRACK_AI_API_KEY") {
            Ok(key) if !key.is_empty() => Some(AiSettings {
                base_url: env::var("FINTRACK_AI_BASE_URL")
                    .unwrap_or_else(|_| AiSettings::DEFAULT_BASE_URL.into()),
                api_key: key,
                model: env::var("FINTRACK_AI_MODEL")
                    .unwrap_or_else(|_| AiSettings::DEFAULT_MODEL.into()),
            }),
            _ => None,
        };

        Self { database_path, ai }
    }
}
