// src/db/pg_store.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    db::store::{DataStore, StoreError},
    models::inventory::{InventoryItem, NewInventoryRecord, SpecialFamilyRecord},
};

// Implementação do DataStore sobre Postgres (o banco hospedado).
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataStore for PgStore {
    // ---
    // Leitura
    // ---

    async fn select_items(&self, date: NaiveDate) -> Result<Vec<InventoryItem>, StoreError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id::int8 AS id,
                   COALESCE(sku, '') AS sku,
                   COALESCE(descripcion, '') AS descripcion,
                   COALESCE(familia, '') AS familia,
                   COALESCE(existencia, 0)::int8 AS existencia,
                   fecha
            FROM inventarios
            WHERE fecha = $1
            ORDER BY id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn select_special_families(&self) -> Result<Vec<SpecialFamilyRecord>, StoreError> {
        let families = sqlx::query_as::<_, SpecialFamilyRecord>(
            "SELECT id::int8 AS id, nombre_familia FROM familias_especiales ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(families)
    }

    async fn select_family_skus(&self, family_id: i64) -> Result<Vec<String>, StoreError> {
        let skus = sqlx::query_scalar::<_, String>(
            "SELECT sku FROM familias_skus WHERE familia_id = $1 AND sku IS NOT NULL",
        )
        .bind(family_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(skus)
    }

    // ---
    // Escrita
    // ---
    // Cada chamada é independente; quem orquestra decide a ordem.

    async fn delete_items(&self, date: NaiveDate) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM inventarios WHERE fecha = $1")
            .bind(date)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_items(&self, records: &[NewInventoryRecord]) -> Result<u64, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO inventarios (sku, descripcion, familia, existencia, fecha) ",
        );
        builder.push_values(records, |mut row, record| {
            row.push_bind(record.sku.clone())
                .push_bind(record.description.clone())
                .push_bind(record.family.clone())
                .push_bind(record.stock)
                .push_bind(record.date);
        });

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert_special_family(
        &self,
        name: &str,
    ) -> Result<Option<SpecialFamilyRecord>, StoreError> {
        let created = sqlx::query_as::<_, SpecialFamilyRecord>(
            r#"
            INSERT INTO familias_especiales (nombre_familia)
            VALUES ($1)
            RETURNING id::int8 AS id, nombre_familia
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(created)
    }

    async fn insert_family_skus(
        &self,
        family_id: i64,
        skus: &[String],
    ) -> Result<u64, StoreError> {
        if skus.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO familias_skus (familia_id, sku) ");
        builder.push_values(skus, |mut row, sku| {
            row.push_bind(family_id).push_bind(sku.clone());
        });

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
