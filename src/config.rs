// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{DataStore, PgStore, UnconfiguredStore},
    services::{FamilyService, InventoryService, UploadService},
};

/// Configuração lida do ambiente (e de um `.env`, se existir).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            None => 5,
        };

        let acquire_timeout_secs: u64 = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DB_ACQUIRE_TIMEOUT_SECS inválido: {raw}"))?,
            None => 3,
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            bind_addr,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub inventory_service: InventoryService,
    pub upload_service: UploadService,
    pub family_service: FamilyService,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn DataStore> = match &settings.database_url {
            Some(database_url) => {
                // Conexão preguiçosa: banco fora do ar vira erro por requisição.
                let db_pool = PgPoolOptions::new()
                    .max_connections(settings.max_connections)
                    .acquire_timeout(settings.acquire_timeout)
                    .connect_lazy(database_url)
                    .context("DATABASE_URL inválida")?;
                tracing::info!("✅ Pool do banco de dados configurado");
                Arc::new(PgStore::new(db_pool))
            }
            None => {
                tracing::warn!("⚠️ DATABASE_URL não definida: operações de banco vão falhar");
                Arc::new(UnconfiguredStore)
            }
        };

        Ok(Self::with_store(store))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(store: Arc<dyn DataStore>) -> Self {
        Self {
            inventory_service: InventoryService::new(store.clone()),
            upload_service: UploadService::new(store.clone()),
            family_service: FamilyService::new(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.database_url, None);
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(3));
        assert_eq!(settings.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn blank_database_url_counts_as_missing() {
        let settings = settings(&[("DATABASE_URL", "  ")]).unwrap();

        assert_eq!(settings.database_url, None);
    }

    #[test]
    fn bad_numbers_name_the_variable() {
        let err = settings(&[("DB_MAX_CONNECTIONS", "muchas")]).unwrap_err();

        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }
}
