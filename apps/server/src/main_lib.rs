use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::{Argon2PasswordHasher, AuthManager};
use crate::config::Config;
use tripfolio_ai::{
    GeneratorConfig, HttpChatClient, ItineraryGenerator, ProviderConfig,
};
use tripfolio_core::{
    budget::{BudgetService, BudgetServiceTrait},
    catalog::{CatalogService, CatalogServiceTrait},
    itinerary::{ItineraryService, ItineraryServiceTrait},
    sharing::{ShareService, ShareServiceTrait},
    trips::{TripService, TripServiceTrait},
    users::{UserService, UserServiceTrait},
};
use tripfolio_storage_sqlite::{
    budget::BudgetRepository,
    catalog::CatalogRepository,
    db::{self, write_actor},
    itinerary::ItineraryRepository,
    sharing::ShareRepository,
    trips::TripRepository,
    users::UserRepository,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub trip_service: Arc<dyn TripServiceTrait>,
    pub itinerary_service: Arc<dyn ItineraryServiceTrait>,
    pub catalog_service: Arc<dyn CatalogServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub share_service: Arc<dyn ShareServiceTrait>,
    pub generator: Arc<ItineraryGenerator>,
    pub auth: Arc<AuthManager>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format =
        std::env::var("TRIPFOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    // Repositories
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let catalog_repo = Arc::new(CatalogRepository::new(pool.clone()));
    let trip_repo = Arc::new(TripRepository::new(pool.clone(), writer.clone()));
    let itinerary_repo = Arc::new(ItineraryRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let share_repo = Arc::new(ShareRepository::new(pool.clone(), writer.clone()));

    // Services
    let hasher = Arc::new(Argon2PasswordHasher);
    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repo, hasher));
    let catalog_service: Arc<dyn CatalogServiceTrait> =
        Arc::new(CatalogService::new(catalog_repo.clone()));
    let trip_service: Arc<dyn TripServiceTrait> =
        Arc::new(TripService::new(trip_repo.clone()));
    let itinerary_service: Arc<dyn ItineraryServiceTrait> = Arc::new(ItineraryService::new(
        itinerary_repo,
        catalog_repo.clone(),
    ));
    let budget_service: Arc<dyn BudgetServiceTrait> =
        Arc::new(BudgetService::new(budget_repo, trip_repo.clone()));
    let share_service: Arc<dyn ShareServiceTrait> =
        Arc::new(ShareService::new(share_repo, trip_repo));

    // AI generator
    let chat_client = Arc::new(HttpChatClient::new(ProviderConfig {
        kind: config.ai.provider,
        base_url: config.ai.base_url.clone(),
        api_key: config.ai.api_key.clone(),
    }));
    let generator = Arc::new(ItineraryGenerator::new(
        chat_client,
        GeneratorConfig {
            model: config.ai.model.clone(),
            ..GeneratorConfig::default()
        },
    ));

    let auth = Arc::new(AuthManager::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl,
    ));

    Ok(Arc::new(AppState {
        user_service,
        trip_service,
        itinerary_service,
        catalog_service,
        budget_service,
        share_service,
        generator,
        auth,
        db_path,
    }))
}
