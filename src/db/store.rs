// src/db/store.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::inventory::{InventoryItem, NewInventoryRecord, SpecialFamilyRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("la base de datos no está configurada")]
    NotConfigured,

    #[error("base de datos inaccesible: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => StoreError::Unavailable(e.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Operações por tabela sobre o banco hospedado
/// ('inventarios', 'familias_especiales', 'familias_skus').
///
/// Cada chamada é um request/response isolado: sem transação entre chamadas.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn select_items(&self, date: NaiveDate) -> Result<Vec<InventoryItem>, StoreError>;

    /// Remove todas as linhas de `date`; devolve quantas saíram.
    async fn delete_items(&self, date: NaiveDate) -> Result<u64, StoreError>;

    /// Insere um lote de linhas; devolve quantas foram criadas.
    async fn insert_items(&self, records: &[NewInventoryRecord]) -> Result<u64, StoreError>;

    async fn select_special_families(&self) -> Result<Vec<SpecialFamilyRecord>, StoreError>;

    async fn select_family_skus(&self, family_id: i64) -> Result<Vec<String>, StoreError>;

    /// `Ok(None)` quando o banco não devolve a linha criada.
    async fn insert_special_family(
        &self,
        name: &str,
    ) -> Result<Option<SpecialFamilyRecord>, StoreError>;

    async fn insert_family_skus(&self, family_id: i64, skus: &[String])
    -> Result<u64, StoreError>;
}

/// Store usado quando não há `DATABASE_URL`: toda chamada falha.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredStore;

#[async_trait]
impl DataStore for UnconfiguredStore {
    async fn select_items(&self, _date: NaiveDate) -> Result<Vec<InventoryItem>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn delete_items(&self, _date: NaiveDate) -> Result<u64, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn insert_items(&self, _records: &[NewInventoryRecord]) -> Result<u64, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn select_special_families(&self) -> Result<Vec<SpecialFamilyRecord>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn select_family_skus(&self, _family_id: i64) -> Result<Vec<String>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn insert_special_family(
        &self,
        _name: &str,
    ) -> Result<Option<SpecialFamilyRecord>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn insert_family_skus(
        &self,
        _family_id: i64,
        _skus: &[String],
    ) -> Result<u64, StoreError> {
        Err(StoreError::NotConfigured)
    }
}
