// src/handlers/inventory.rs

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventory::{FilterState, InventoryView, UploadResponse, ALL_FAMILIES},
    services::filter,
};

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Recarrega o snapshot de `date` sem filtro, depois de uma escrita.
/// A escrita já aconteceu: uma falha aqui só é registrada.
pub(crate) async fn reload_view(app_state: &AppState, date: NaiveDate) -> Option<InventoryView> {
    match app_state.inventory_service.load_snapshot(date).await {
        Ok(snapshot) => Some(filter::build_view(&snapshot, &FilterState::for_date(date))),
        Err(e) => {
            tracing::warn!("Falha ao recarregar o snapshot {}: {}", date, e);
            None
        }
    }
}

// ---
// Query: filtros da consulta
// ---
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// Data do snapshot (padrão: hoje).
    pub fecha: Option<NaiveDate>,
    /// Texto buscado em SKU ou descrição.
    pub busqueda: Option<String>,
    /// Família nativa ou especial ("Todas" = sem filtro).
    pub familia: Option<String>,
}

impl InventoryQuery {
    fn into_filter(self) -> FilterState {
        FilterState {
            search_text: self.busqueda.unwrap_or_default(),
            selected_family: self.familia.unwrap_or_else(|| ALL_FAMILIES.to_string()),
            selected_date: self.fecha.unwrap_or_else(today),
        }
    }
}

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventario",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Itens filtrados do dia com totais", body = InventoryView),
        (status = 502, description = "Falha na consulta"),
        (status = 503, description = "Banco inacessível ou não configurado")
    )
)]
pub async fn get_inventory(
    State(app_state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter_state = query.into_filter();

    let snapshot = app_state
        .inventory_service
        .load_snapshot(filter_state.selected_date)
        .await?;

    Ok((StatusCode::OK, Json(filter::build_view(&snapshot, &filter_state))))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewDateQuery {
    /// Data selecionada na tela, recarregada após a escrita (padrão: hoje).
    pub fecha: Option<NaiveDate>,
}

// POST /api/inventory/upload
#[utoipa::path(
    post,
    path = "/api/inventory/upload",
    tag = "Inventario",
    params(ViewDateQuery),
    request_body(
        content = Vec<u8>,
        content_type = "application/octet-stream",
        description = "Planilha (.xlsx/.xls) com colunas sku, descripcion, familia, existencia"
    ),
    responses(
        (status = 201, description = "Snapshot de hoje substituído", body = UploadResponse),
        (status = 400, description = "Arquivo ilegível ou existência inválida"),
        (status = 422, description = "Colunas obrigatórias ausentes"),
        (status = 500, description = "Falha ao gravar"),
        (status = 503, description = "Banco não configurado")
    )
)]
pub async fn upload_inventory(
    State(app_state): State<AppState>,
    Query(query): Query<ViewDateQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("No se recibió ningún archivo.".to_string()));
    }

    let outcome = app_state
        .upload_service
        .process_upload(&body, today())
        .await?;

    let selected_date = query.fecha.unwrap_or(outcome.date);
    let view = reload_view(&app_state, selected_date).await;

    let response = UploadResponse {
        inserted_count: outcome.inserted_count,
        date: outcome.date,
        message: outcome.message(),
        view,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
