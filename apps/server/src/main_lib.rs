use std::sync::Arc;

use anyhow::Context;
use papertrade_core::{
    portfolio::{PortfolioService, PortfolioServiceTrait},
    quotes::{QuoteService, QuoteServiceTrait},
    trading::{TradingService, TradingServiceTrait},
    users::{UserService, UserServiceTrait},
};
use papertrade_market_data::{FmpProvider, MarketDataProvider};
use papertrade_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, LedgerRepository, UserRepository,
};
use rand::RngCore;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::{decode_secret_key, AuthManager},
    config::Config,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub trading_service: Arc<dyn TradingServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
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

fn jwt_secret(config: &Config) -> anyhow::Result<Vec<u8>> {
    match &config.secret_key {
        Some(raw) => decode_secret_key(raw).context("Invalid PT_SECRET_KEY"),
        None => {
            tracing::warn!(
                "PT_SECRET_KEY is not set; using a random key, sessions end when the server restarts"
            );
            let mut secret = vec![0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut secret);
            Ok(secret)
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = FmpProvider::new(config.fmp_api_key.clone(), config.quote_timeout)?;
    build_state_with_provider(config, Arc::new(provider)).await
}

/// Wires storage, services and auth around the given quote provider.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone())?;

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let ledger_repo = Arc::new(LedgerRepository::new(pool.clone(), writer.clone()));

    tracing::info!("Quote provider: {}", provider.id());
    let quote_service: Arc<dyn QuoteServiceTrait> = Arc::new(QuoteService::new(provider));
    let user_service = Arc::new(UserService::new(user_repo, config.starting_cash));
    let trading_service = Arc::new(TradingService::new(
        ledger_repo.clone(),
        quote_service.clone(),
    ));
    let portfolio_service = Arc::new(PortfolioService::new(ledger_repo, quote_service.clone()));

    let auth = Arc::new(AuthManager::new(&jwt_secret(config)?, config.token_ttl));

    Ok(Arc::new(AppState {
        user_service,
        quote_service,
        trading_service,
        portfolio_service,
        auth,
    }))
}
