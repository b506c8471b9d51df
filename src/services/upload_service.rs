// src/services/upload_service.rs

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::DataStore,
    import::{read_first_sheet, Sheet},
    models::inventory::NewInventoryRecord,
};

/// Linhas por INSERT, para respeitar o limite de payload do banco.
pub const INSERT_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOutcome {
    pub inserted_count: usize,
    pub date: NaiveDate,
}

impl UploadOutcome {
    pub fn message(&self) -> String {
        format!(
            "Se cargaron {} productos exitosamente para la fecha {}.",
            self.inserted_count, self.date
        )
    }
}

// Substitui o snapshot do dia pelo conteúdo de uma planilha.
#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn DataStore>,
}

impl UploadService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn process_upload(
        &self,
        file_bytes: &[u8],
        today: NaiveDate,
    ) -> Result<UploadOutcome, AppError> {
        tracing::info!("📥 Processando planilha de {} bytes para {}", file_bytes.len(), today);
        let sheet = read_first_sheet(file_bytes)?;
        self.process_sheet(&sheet, today).await
    }

    /// Valida a planilha inteira antes de qualquer escrita.
    pub async fn process_sheet(
        &self,
        sheet: &Sheet,
        today: NaiveDate,
    ) -> Result<UploadOutcome, AppError> {
        let records = sheet.to_records(today)?;
        self.replace_day(today, &records).await
    }

    // DELETE seguido de INSERTs em lotes. Não é atômico: se um lote falhar,
    // os lotes anteriores ficam gravados e o dia fica parcial.
    async fn replace_day(
        &self,
        today: NaiveDate,
        records: &[NewInventoryRecord],
    ) -> Result<UploadOutcome, AppError> {
        let removed = self
            .store
            .delete_items(today)
            .await
            .map_err(AppError::from_write)?;
        tracing::info!("🗑️ {} linhas anteriores de {} removidas", removed, today);

        let mut inserted = 0;
        for (batch_no, batch) in records.chunks(INSERT_BATCH_SIZE).enumerate() {
            self.store.insert_items(batch).await.map_err(|e| {
                tracing::error!(
                    "🔥 Lote {} falhou após {} linhas gravadas para {}: {}",
                    batch_no + 1,
                    inserted,
                    today,
                    e
                );
                AppError::from_write(e)
            })?;
            inserted += batch.len();
        }

        tracing::info!("✅ {} produtos carregados para {}", inserted, today);
        Ok(UploadOutcome {
            inserted_count: inserted,
            date: today,
        })
    }
}
