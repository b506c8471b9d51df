// src/import/xlsx.rs

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;

use crate::{common::error::AppError, models::inventory::NewInventoryRecord};

/// Cabeçalhos obrigatórios, já em minúsculas.
pub const REQUIRED_HEADERS: [&str; 4] = ["sku", "descripcion", "familia", "existencia"];

static EMPTY_CELL: Data = Data::Empty;

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// Número da linha na planilha (1-based), para mensagens de erro.
    pub line: usize,
    pub cells: Vec<Data>,
}

/// Primeira aba da planilha: cabeçalhos normalizados + linhas não vazias.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Existência como inteiro. Floats são truncados em direção a zero.
pub fn cell_to_stock(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(v) => Some(*v),
        Data::Float(v) => float_to_stock(*v),
        Data::String(v) => {
            let trimmed = v.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_stock))
        }
        _ => None,
    }
}

fn float_to_stock(v: f64) -> Option<i64> {
    let truncated = v.trunc();
    if truncated.is_finite() && truncated.abs() < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(v) => v.trim().is_empty(),
        _ => false,
    })
}

/// Lê a primeira aba de uma planilha binária (xlsx, xls, xlsb, ods).
pub fn read_first_sheet(bytes: &[u8]) -> Result<Sheet, AppError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AppError::Validation(format!("No se pudo leer el archivo Excel: {e}")))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| {
            AppError::Validation(format!("No se pudo leer la primera hoja del Excel: {e}"))
        })?,
        None => return Err(missing_all_headers()),
    };

    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_to_string(cell).trim().to_lowercase())
            .collect(),
        None => return Err(missing_all_headers()),
    };

    let rows = rows
        .enumerate()
        .filter(|(_, cells)| !is_blank(cells))
        .map(|(idx, cells)| SheetRow {
            line: first_line + 1 + idx,
            cells: cells.to_vec(),
        })
        .collect();

    Ok(Sheet { headers, rows })
}

fn missing_all_headers() -> AppError {
    AppError::Schema(REQUIRED_HEADERS.iter().map(|h| h.to_string()).collect())
}

impl Sheet {
    /// Projeta cada linha nas quatro colunas obrigatórias e carimba `date`.
    ///
    /// Falha sem resultado parcial: ou todas as linhas convertem, ou nenhuma.
    pub fn to_records(&self, date: NaiveDate) -> Result<Vec<NewInventoryRecord>, AppError> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (idx, header) in self.headers.iter().enumerate() {
            positions.entry(header.as_str()).or_insert(idx);
        }

        let missing: Vec<String> = REQUIRED_HEADERS
            .iter()
            .filter(|h| !positions.contains_key(*h))
            .map(|h| h.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Schema(missing));
        }

        let [sku_idx, desc_idx, family_idx, stock_idx] =
            REQUIRED_HEADERS.map(|h| positions[h]);

        self.rows
            .iter()
            .map(|row| {
                let cell = |idx: usize| row.cells.get(idx).unwrap_or(&EMPTY_CELL);
                let stock_cell = cell(stock_idx);
                let stock = cell_to_stock(stock_cell).ok_or_else(|| {
                    AppError::Validation(format!(
                        "Existencia inválida en la fila {}: '{}'",
                        row.line,
                        cell_to_string(stock_cell)
                    ))
                })?;

                Ok(NewInventoryRecord {
                    sku: cell_to_string(cell(sku_idx)),
                    description: cell_to_string(cell(desc_idx)),
                    family: cell_to_string(cell(family_idx)),
                    stock,
                    date,
                })
            })
            .collect()
    }
}
