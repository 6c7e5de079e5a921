//! taskboard - Organization / Project / Task REST API
//!
//! Usage:
//!   cargo run --release                  # config/dev.yaml
//!   cargo run --release -- --env prod    # config/prod.yaml
//!   cargo run --release -- --port 9090   # override gateway.port
//!
//! `JWT_SECRET` must be set (environment or `.env`).

use anyhow::Context;
use std::sync::Arc;

use taskboard::auth::{AccessService, CredentialStore, TokenCodec};
use taskboard::config::{AppConfig, SigningSecret};
use taskboard::db::Database;
use taskboard::gateway::{self, state::AppState};
use taskboard::store::{MemoryStore, PgStore, ResourceStore};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

struct Stores {
    credentials: Arc<dyn CredentialStore>,
    resources: Arc<dyn ResourceStore>,
    database: Option<Arc<Database>>,
}

/// Pick the storage backend: PostgreSQL when configured, otherwise in-memory.
async fn open_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    match &config.postgres_url {
        Some(url) => {
            let db = Database::connect(url)
                .await
                .context("failed to connect to PostgreSQL")?;
            db.init_schema()
                .await
                .context("failed to initialize PostgreSQL schema")?;
            let store = Arc::new(PgStore::new(db.pool().clone()));
            Ok(Stores {
                credentials: store.clone(),
                resources: store,
                database: Some(Arc::new(db)),
            })
        }
        None => {
            tracing::warn!("postgres_url not set; using the in-memory store (data is not persisted)");
            let store = Arc::new(MemoryStore::new());
            Ok(Stores {
                credentials: store.clone(),
                resources: store,
                database: None,
            })
        }
    }
}

async fn serve(mut config: AppConfig, secret: SigningSecret) -> anyhow::Result<()> {
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let stores = open_stores(&config).await?;
    let codec = TokenCodec::new(&secret, config.auth.token_ttl_secs);
    let access = Arc::new(AccessService::new(stores.credentials.clone(), codec));
    let mut state = AppState::new(access, stores.credentials, stores.resources);
    if let Some(db) = stores.database {
        state = state.with_database(db);
    }

    gateway::run_server(&config.gateway, state)
        .await
        .context("server error")
}

fn main() {
    let env = get_env();
    let app_config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {}", e);
            std::process::exit(1);
        }
    };
    let _log_guard = taskboard::logging::init_logging(&app_config);

    tracing::info!("Starting taskboard in {} mode", env);

    let secret = match SigningSecret::from_env() {
        Ok(secret) => secret,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("FATAL: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("FATAL: failed to start tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(serve(app_config, secret)) {
        tracing::error!("{:#}", e);
        eprintln!("FATAL: {:#}", e);
        std::process::exit(1);
    }
}
