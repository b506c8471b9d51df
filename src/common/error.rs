// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

// Taxonomia de erros dos fluxos. Cada variante vira uma única mensagem legível
// na fronteira HTTP (IntoResponse); nada passa disso.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Credenciales de base de datos no configuradas.")]
    Configuration,

    #[error("Error al conectar con base de datos: {0}")]
    Connection(String),

    #[error("Error al consultar la base de datos: {0}")]
    Query(String),

    #[error("Columnas faltantes en Excel: {}", .0.join(", "))]
    Schema(Vec<String>),

    #[error("{0}")]
    Validation(String),

    #[error("Uno o más campos son inválidos.")]
    InvalidPayload(#[from] validator::ValidationErrors),

    #[error("Error al guardar en base de datos: {0}")]
    Storage(String),
}

impl AppError {
    /// Converte uma falha do store em um caminho de leitura.
    pub fn from_read(err: StoreError) -> Self {
        match err {
            StoreError::NotConfigured | StoreError::Unavailable(_) => {
                AppError::Connection(err.to_string())
            }
            StoreError::Query(_) => AppError::Query(err.to_string()),
        }
    }

    /// Converte uma falha do store em um caminho de escrita.
    pub fn from_write(err: StoreError) -> Self {
        match err {
            StoreError::NotConfigured => AppError::Configuration,
            other => AppError::Storage(other.to_string()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Configuration => "ConfigurationError",
            AppError::Connection(_) => "ConnectionError",
            AppError::Query(_) => "QueryError",
            AppError::Schema(_) => "SchemaError",
            AppError::Validation(_) | AppError::InvalidPayload(_) => "ValidationError",
            AppError::Storage(_) => "StorageError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Configuration | AppError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Query(_) => StatusCode::BAD_GATEWAY,
            AppError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) | AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::InvalidPayload(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": self.kind(),
                "message": self.to_string(),
                "details": details,
            }));
            return (status, body).into_response();
        }

        if status.is_server_error() {
            tracing::error!("{}: {:?}", self.kind(), self);
        } else {
            tracing::warn!("{}: {}", self.kind(), self);
        }

        let body = Json(json!({ "error": self.kind(), "message": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_missing_header() {
        let err = AppError::Schema(vec!["familia".into(), "existencia".into()]);

        assert_eq!(err.to_string(), "Columnas faltantes en Excel: familia, existencia");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unconfigured_store_maps_by_direction() {
        assert!(matches!(
            AppError::from_read(StoreError::NotConfigured),
            AppError::Connection(_)
        ));
        assert!(matches!(
            AppError::from_write(StoreError::NotConfigured),
            AppError::Configuration
        ));
    }

    #[test]
    fn query_failures_keep_the_cause() {
        let err = AppError::from_read(StoreError::Query("relation does not exist".into()));

        assert_eq!(err.kind(), "QueryError");
        assert!(err.to_string().contains("relation does not exist"));

        let err = AppError::from_write(StoreError::Query("payload too large".into()));
        assert_eq!(err.kind(), "StorageError");
        assert!(err.to_string().contains("payload too large"));
    }

    #[test]
    fn every_error_kind_has_a_fixed_status() {
        let cases = [
            (AppError::Configuration, StatusCode::SERVICE_UNAVAILABLE),
            (AppError::Connection("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::Query("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::Schema(vec!["sku".into()]), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{}", err.kind());
            assert_eq!(err.into_response().status(), status);
        }
    }
}
