// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- INVENTARIO ---
        handlers::inventory::get_inventory,
        handlers::inventory::upload_inventory,

        // --- FAMILIAS ---
        handlers::families::list_families,
        handlers::families::create_family,
    ),
    components(
        schemas(
            // --- Inventario ---
            models::inventory::InventoryItem,
            models::inventory::InventoryView,
            models::inventory::UploadResponse,

            // --- Familias ---
            models::inventory::SpecialFamilyDetail,
            models::inventory::CreateFamilyResponse,
            handlers::families::CreateFamilyPayload,
        )
    ),
    tags(
        (name = "Inventario", description = "Consulta de existencias por fecha y carga diaria"),
        (name = "Familias", description = "Familias especiales de SKUs")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();

        for path in ["/api/inventory", "/api/inventory/upload", "/api/families"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
