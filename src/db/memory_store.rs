// src/db/memory_store.rs

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    db::store::{DataStore, StoreError},
    models::inventory::{InventoryItem, NewInventoryRecord, SpecialFamilyRecord},
};

/// Operação de escrita registrada pelo store em memória.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    DeleteItems(NaiveDate),
    InsertItems(usize),
    InsertFamily(String),
    InsertFamilySkus(i64, Vec<String>),
}

#[derive(Default)]
struct Tables {
    items: Vec<InventoryItem>,
    families: Vec<SpecialFamilyRecord>,
    family_skus: Vec<(i64, String)>,
    next_id: i64,
    writes: Vec<Write>,
    insert_calls: usize,
}

// Store de teste: tabelas em memória + registro de escritas.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_insert_call: Option<usize>,
    fail_reads: bool,
    family_insert_returns_nothing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faz a n-ésima chamada (1-based) de `insert_items` falhar.
    pub fn failing_insert_call(mut self, call: usize) -> Self {
        self.fail_insert_call = Some(call);
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn family_insert_returns_nothing(mut self) -> Self {
        self.family_insert_returns_nothing = true;
        self
    }

    pub fn seed_item(&self, sku: &str, description: &str, family: &str, stock: i64, date: NaiveDate) {
        let mut tables = self.tables.lock().unwrap();
        tables.next_id += 1;
        let id = tables.next_id;
        tables.items.push(InventoryItem {
            id,
            sku: sku.to_string(),
            description: description.to_string(),
            family: family.to_string(),
            stock,
            date,
        });
    }

    pub fn seed_family(&self, name: &str, skus: &[&str]) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        tables.next_id += 1;
        let id = tables.next_id;
        tables.families.push(SpecialFamilyRecord { id, name: name.to_string() });
        for sku in skus {
            tables.family_skus.push((id, sku.to_string()));
        }
        id
    }

    pub fn items(&self) -> Vec<InventoryItem> {
        self.tables.lock().unwrap().items.clone()
    }

    pub fn family_skus(&self, family_id: i64) -> Vec<String> {
        self.tables
            .lock()
            .unwrap()
            .family_skus
            .iter()
            .filter(|(id, _)| *id == family_id)
            .map(|(_, sku)| sku.clone())
            .collect()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.tables.lock().unwrap().writes.clone()
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn select_items(&self, date: NaiveDate) -> Result<Vec<InventoryItem>, StoreError> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.items.iter().filter(|i| i.date == date).cloned().collect())
    }

    async fn delete_items(&self, date: NaiveDate) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.writes.push(Write::DeleteItems(date));
        let before = tables.items.len();
        tables.items.retain(|i| i.date != date);
        Ok((before - tables.items.len()) as u64)
    }

    async fn insert_items(&self, records: &[NewInventoryRecord]) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.insert_calls += 1;
        if self.fail_insert_call == Some(tables.insert_calls) {
            return Err(StoreError::Query("payload too large".into()));
        }
        tables.writes.push(Write::InsertItems(records.len()));
        for record in records {
            tables.next_id += 1;
            let id = tables.next_id;
            tables.items.push(InventoryItem {
                id,
                sku: record.sku.clone(),
                description: record.description.clone(),
                family: record.family.clone(),
                stock: record.stock,
                date: record.date,
            });
        }
        Ok(records.len() as u64)
    }

    async fn select_special_families(&self) -> Result<Vec<SpecialFamilyRecord>, StoreError> {
        self.check_reads()?;
        Ok(self.tables.lock().unwrap().families.clone())
    }

    async fn select_family_skus(&self, family_id: i64) -> Result<Vec<String>, StoreError> {
        self.check_reads()?;
        Ok(self.family_skus(family_id))
    }

    async fn insert_special_family(
        &self,
        name: &str,
    ) -> Result<Option<SpecialFamilyRecord>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.writes.push(Write::InsertFamily(name.to_string()));
        if self.family_insert_returns_nothing {
            return Ok(None);
        }
        tables.next_id += 1;
        let record = SpecialFamilyRecord { id: tables.next_id, name: name.to_string() };
        tables.families.push(record.clone());
        Ok(Some(record))
    }

    async fn insert_family_skus(
        &self,
        family_id: i64,
        skus: &[String],
    ) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.writes.push(Write::InsertFamilySkus(family_id, skus.to_vec()));
        for sku in skus {
            tables.family_skus.push((family_id, sku.clone()));
        }
        Ok(skus.len() as u64)
    }
}
