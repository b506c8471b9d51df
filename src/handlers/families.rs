// src/handlers/families.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::inventory::{reload_view, today, ViewDateQuery},
    models::inventory::{CreateFamilyResponse, SpecialFamilyDetail},
};

fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("El nombre de la familia es requerido.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateFamily
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFamilyPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub nombre: String,

    /// SKUs separados por vírgula.
    #[serde(default)]
    pub skus: String,
}

// GET /api/families
#[utoipa::path(
    get,
    path = "/api/families",
    tag = "Familias",
    responses(
        (status = 200, description = "Famílias especiais com seus SKUs", body = [SpecialFamilyDetail]),
        (status = 503, description = "Banco inacessível ou não configurado")
    )
)]
pub async fn list_families(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let families = app_state.inventory_service.list_special_families().await?;

    Ok((StatusCode::OK, Json(families)))
}

// POST /api/families
#[utoipa::path(
    post,
    path = "/api/families",
    tag = "Familias",
    params(ViewDateQuery),
    request_body = CreateFamilyPayload,
    responses(
        (status = 201, description = "Família especial criada", body = CreateFamilyResponse),
        (status = 400, description = "Nome vazio"),
        (status = 500, description = "Falha ao gravar"),
        (status = 503, description = "Banco não configurado")
    )
)]
pub async fn create_family(
    State(app_state): State<AppState>,
    Query(query): Query<ViewDateQuery>,
    Json(payload): Json<CreateFamilyPayload>,
) -> Result<(StatusCode, Json<CreateFamilyResponse>), AppError> {
    payload.validate()?;

    let family = app_state
        .family_service
        .create_special_family(&payload.nombre, &payload.skus)
        .await?;

    let view = reload_view(&app_state, query.fecha.unwrap_or_else(today)).await;

    let response = CreateFamilyResponse {
        id: family.id,
        name: family.name,
        skus: family.skus,
        message: "Familia especial creada exitosamente.".to_string(),
        view,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
