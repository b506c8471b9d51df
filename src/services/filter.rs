// src/services/filter.rs

use std::collections::BTreeSet;

use crate::models::inventory::{
    FilterState, InventoryItem, InventoryView, Snapshot, SpecialFamilies, Totals, ALL_FAMILIES,
};

/// Itens visíveis para o filtro atual, na ordem original.
///
/// A busca é substring sem diferenciar maiúsculas em `sku` ou `description`;
/// busca vazia não filtra nada. Uma família selecionada que também é família
/// especial resolve pela lista de SKUs, nunca pela família nativa.
pub fn filter_items(
    items: &[InventoryItem],
    special_families: &SpecialFamilies,
    filter: &FilterState,
) -> Vec<InventoryItem> {
    let needle = filter.search_text.to_lowercase();
    let family = filter.selected_family.as_str();
    let family_active = !family.is_empty() && family != ALL_FAMILIES;
    let members = special_families.get(family);

    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.sku.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .filter(|item| {
            if !family_active {
                return true;
            }
            match members {
                Some(skus) => skus.contains(&item.sku),
                None => item.family == family,
            }
        })
        .cloned()
        .collect()
}

/// Soma saturada: `existencia` pode vir como bigint.
pub fn totals(items: &[InventoryItem]) -> Totals {
    Totals {
        count: items.len(),
        stock_sum: items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.stock)),
    }
}

/// `["Todas"] ++ especiais ordenadas ++ nativas (distintas, não vazias) ordenadas`.
pub fn family_options(items: &[InventoryItem], special_families: &SpecialFamilies) -> Vec<String> {
    let native: BTreeSet<&str> = items
        .iter()
        .map(|item| item.family.as_str())
        .filter(|family| !family.is_empty())
        .collect();

    std::iter::once(ALL_FAMILIES.to_string())
        .chain(special_families.keys().cloned())
        .chain(native.into_iter().map(str::to_string))
        .collect()
}

/// Deriva o view model a partir do snapshot carregado e do filtro.
pub fn build_view(snapshot: &Snapshot, filter: &FilterState) -> InventoryView {
    let items = filter_items(&snapshot.items, &snapshot.special_families, filter);
    let Totals { count, stock_sum } = totals(&items);

    InventoryView {
        selected_date: snapshot.date,
        items,
        total_items: count,
        total_stock: stock_sum,
        family_options: snapshot.family_options.clone(),
        special_families: snapshot.special_families.clone(),
    }
}
