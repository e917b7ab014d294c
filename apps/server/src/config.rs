use std::{net::SocketAddr, time::Duration};

use tripfolio_ai::ProviderKind;

pub struct AiConfig {
    pub provider: ProviderKind,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub ai: AiConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TRIPFOLIO_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid TRIPFOLIO_LISTEN_ADDR");
        let db_path =
            std::env::var("TRIPFOLIO_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let cors_allow = std::env::var("TRIPFOLIO_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("TRIPFOLIO_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = std::env::var("TRIPFOLIO_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("TRIPFOLIO_JWT_SECRET not set; using an insecure development secret");
            "tripfolio-dev-secret".to_string()
        });
        let token_ttl_secs: u64 = std::env::var("TRIPFOLIO_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .unwrap_or(86400);

        let provider = match std::env::var("TRIPFOLIO_AI_PROVIDER")
            .unwrap_or_else(|_| "OPENAI".to_string())
            .to_uppercase()
            .as_str()
        {
            "OPENROUTER" => ProviderKind::OpenRouter,
            "CUSTOM" => ProviderKind::Custom,
            _ => ProviderKind::OpenAi,
        };
        let ai = AiConfig {
            provider,
            base_url: std::env::var("TRIPFOLIO_AI_BASE_URL").ok(),
            api_key: std::env::var("TRIPFOLIO_AI_API_KEY").ok(),
            model: std::env::var("TRIPFOLIO_AI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        };

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            ai,
        }
    }
}
