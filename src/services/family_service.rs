// src/services/family_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::DataStore,
    models::inventory::SpecialFamilyDetail,
};

/// Separa a lista digitada por vírgulas, sem entradas vazias.
/// Duplicatas são mantidas como vieram.
pub fn parse_sku_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|sku| !sku.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone)]
pub struct FamilyService {
    store: Arc<dyn DataStore>,
}

impl FamilyService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Cria a família especial e, se houver SKUs, suas linhas de associação.
    ///
    /// Não verifica nomes repetidos.
    pub async fn create_special_family(
        &self,
        name: &str,
        raw_skus: &str,
    ) -> Result<SpecialFamilyDetail, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "El nombre de la familia es requerido.".to_string(),
            ));
        }

        let created = self
            .store
            .insert_special_family(name)
            .await
            .map_err(AppError::from_write)?
            .ok_or_else(|| AppError::Storage("No se pudo crear la familia.".to_string()))?;

        let skus = parse_sku_list(raw_skus);
        if !skus.is_empty() {
            self.store
                .insert_family_skus(created.id, &skus)
                .await
                .map_err(AppError::from_write)?;
        }

        tracing::info!(
            "✅ Família especial '{}' (id {}) criada com {} SKUs",
            created.name,
            created.id,
            skus.len()
        );

        Ok(SpecialFamilyDetail {
            id: created.id,
            name: created.name,
            skus,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::{MemoryStore, Write};

    #[test]
    fn sku_list_drops_blanks_and_keeps_duplicates() {
        assert_eq!(parse_sku_list("A1, A2 ,A2,"), vec!["A1", "A2", "A2"]);
        assert!(parse_sku_list(" , ,").is_empty());
        assert!(parse_sku_list("").is_empty());
    }

    #[tokio::test]
    async fn creates_family_with_member_rows() {
        let store = Arc::new(MemoryStore::new());
        let service = FamilyService::new(store.clone());

        let family = service.create_special_family("Ofertas", "A1, A2 ,A2,").await.unwrap();

        assert_eq!(family.name, "Ofertas");
        assert_eq!(store.family_skus(family.id), vec!["A1", "A2", "A2"]);
        assert_eq!(
            store.writes(),
            vec![
                Write::InsertFamily("Ofertas".into()),
                Write::InsertFamilySkus(family.id, vec!["A1".into(), "A2".into(), "A2".into()]),
            ]
        );
    }

    #[tokio::test]
    async fn empty_sku_list_creates_only_the_family() {
        let store = Arc::new(MemoryStore::new());
        let service = FamilyService::new(store.clone());

        service.create_special_family("Vacía", " , ").await.unwrap();

        assert_eq!(store.writes(), vec![Write::InsertFamily("Vacía".into())]);
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_any_write() {
        let store = Arc::new(MemoryStore::new());
        let service = FamilyService::new(store.clone());

        let result = service.create_special_family("   ", "A1").await;

        assert!(matches!(result, Err(AppError::Validation(_))), "{result:?}");
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_are_accepted() {
        let store = Arc::new(MemoryStore::new());
        let service = FamilyService::new(store.clone());

        let first = service.create_special_family("Ofertas", "A1").await.unwrap();
        let second = service.create_special_family("Ofertas", "B1").await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn missing_created_row_is_a_storage_error() {
        let store = Arc::new(MemoryStore::new().family_insert_returns_nothing());
        let service = FamilyService::new(store.clone());

        let result = service.create_special_family("Ofertas", "A1").await;

        assert!(matches!(result, Err(AppError::Storage(_))), "{result:?}");
        assert_eq!(store.writes(), vec![Write::InsertFamily("Ofertas".into())]);
    }

    #[tokio::test]
    async fn unconfigured_store_is_a_configuration_error() {
        let service = FamilyService::new(Arc::new(crate::db::UnconfiguredStore));

        let result = service.create_special_family("Ofertas", "A1").await;

        assert!(matches!(result, Err(AppError::Configuration)), "{result:?}");
    }
}
