// src/services/inventory_service.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::DataStore,
    models::inventory::{Snapshot, SpecialFamilies, SpecialFamilyDetail},
    services::filter,
};

// Carrega o snapshot de uma data: itens + famílias especiais resolvidas.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn DataStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Falhas não têm retry; o chamador decide se descarta o snapshot anterior.
    pub async fn load_snapshot(&self, date: NaiveDate) -> Result<Snapshot, AppError> {
        let items = self
            .store
            .select_items(date)
            .await
            .map_err(AppError::from_read)?;

        let special_families: SpecialFamilies = self
            .list_special_families()
            .await?
            .into_iter()
            .map(|family| (family.name, family.skus.into_iter().collect::<BTreeSet<_>>()))
            .collect();

        let family_options = filter::family_options(&items, &special_families);

        tracing::info!(
            "📦 Snapshot {} carregado: {} itens, {} famílias especiais",
            date,
            items.len(),
            special_families.len()
        );

        Ok(Snapshot {
            date,
            items,
            special_families,
            family_options,
        })
    }

    /// Famílias especiais com seus SKUs, ordenadas por nome.
    ///
    /// Uma consulta por família, em sequência.
    pub async fn list_special_families(&self) -> Result<Vec<SpecialFamilyDetail>, AppError> {
        let records = self
            .store
            .select_special_families()
            .await
            .map_err(AppError::from_read)?;

        let mut families = Vec::with_capacity(records.len());
        for record in records {
            let skus = self
                .store
                .select_family_skus(record.id)
                .await
                .map_err(AppError::from_read)?;
            families.push(SpecialFamilyDetail {
                id: record.id,
                name: record.name,
                skus,
            });
        }

        // Nomes repetidos: vale a última definição (ordem de id).
        families.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(families)
    }
}
