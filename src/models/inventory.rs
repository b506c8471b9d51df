// src/models/inventory.rs

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Valor sentinela do seletor de família: "sem filtro".
pub const ALL_FAMILIES: &str = "Todas";

/// Mapa `nome da família especial -> SKUs membros`.
pub type SpecialFamilies = BTreeMap<String, BTreeSet<String>>;

// --- 1. Linha de estoque (tabela 'inventarios') ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i64,
    pub sku: String,
    #[sqlx(rename = "descripcion")]
    pub description: String,
    #[sqlx(rename = "familia")]
    pub family: String,
    #[sqlx(rename = "existencia")]
    pub stock: i64,
    #[sqlx(rename = "fecha")]
    pub date: NaiveDate,
}

// --- 2. Linha nova, ainda sem id (vinda da planilha) ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInventoryRecord {
    pub sku: String,
    pub description: String,
    pub family: String,
    pub stock: i64,
    pub date: NaiveDate,
}

// --- 3. Definição de família especial (tabela 'familias_especiales') ---
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SpecialFamilyRecord {
    pub id: i64,
    #[sqlx(rename = "nombre_familia")]
    pub name: String,
}

/// Família especial já resolvida, com os SKUs na ordem em que foram gravados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialFamilyDetail {
    pub id: i64,
    pub name: String,
    pub skus: Vec<String>,
}

// --- 4. Estado do filtro (nunca persistido) ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub selected_family: String,
    pub selected_date: NaiveDate,
}

impl FilterState {
    pub fn for_date(selected_date: NaiveDate) -> Self {
        Self {
            search_text: String::new(),
            selected_family: ALL_FAMILIES.to_string(),
            selected_date,
        }
    }
}

/// Snapshot completo de uma data: substituído inteiro a cada carga.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub items: Vec<InventoryItem>,
    pub special_families: SpecialFamilies,
    pub family_options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub count: usize,
    pub stock_sum: i64,
}

// --- 5. View model devolvido ao cliente ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub selected_date: NaiveDate,
    pub items: Vec<InventoryItem>,
    pub total_items: usize,
    pub total_stock: i64,
    pub family_options: Vec<String>,
    #[schema(value_type = Object)]
    pub special_families: SpecialFamilies,
}

// --- 6. Respostas dos fluxos de escrita ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub inserted_count: usize,
    pub date: NaiveDate,
    pub message: String,
    /// `None` quando a gravação deu certo mas a recarga falhou.
    pub view: Option<InventoryView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyResponse {
    pub id: i64,
    pub name: String,
    pub skus: Vec<String>,
    pub message: String,
    pub view: Option<InventoryView>,
}
