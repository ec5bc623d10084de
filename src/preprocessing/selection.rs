//! Отбор и переименование колонок

use serde::Serialize;

use super::loader::RawTable;
use crate::error::{PrepareError, Result};
use crate::types::{
    EXPOSURE, HOUSING, INTENSITY, POVERTY, REGION, SEVERITY, SEVERITY_CATEGORY, VULNERABILITY,
};

/// Исходное имя колонки -> каноническое, в порядке выходной таблицы
pub const COLUMN_MAPPING: [(&str, &str); 8] = [
    ("REGION", REGION),
    ("Hazard (Intensity)", INTENSITY),
    ("Exposure", EXPOSURE),
    ("Housing", HOUSING),
    ("Poverty", POVERTY),
    ("Vulnerability", VULNERABILITY),
    ("Severity", SEVERITY),
    ("Severity category", SEVERITY_CATEGORY),
];

/// Строка после отбора колонок; пропуски ещё не удалены
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedRow {
    pub region: Option<String>,
    pub intensity: Option<f64>,
    pub exposure: Option<f64>,
    pub housing: Option<f64>,
    pub poverty: Option<f64>,
    pub vulnerability: Option<f64>,
    pub severity: Option<f64>,
    pub severity_category: Option<String>,
}

/// Позиции нужных колонок в заголовке сырой таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    positions: [usize; 8],
}

impl ColumnSelection {
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let mut positions = [0usize; 8];
        let mut missing = Vec::new();

        for (slot, (raw, _)) in COLUMN_MAPPING.iter().enumerate() {
            match headers.iter().position(|h| h == raw) {
                Some(idx) => positions[slot] = idx,
                None => missing.push(raw.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(PrepareError::Schema { missing });
        }
        Ok(Self { positions })
    }

    pub fn select(&self, table: &RawTable) -> Result<Vec<SelectedRow>> {
        let mut selected = Vec::with_capacity(table.rows.len());

        for (row_idx, record) in table.rows.iter().enumerate() {
            let field = |slot: usize| record.get(self.positions[slot]).and_then(non_missing);
            let number = |slot: usize| -> Result<Option<f64>> {
                match field(slot) {
                    None => Ok(None),
                    Some(raw) => parse_number(raw.trim()).map_err(|_| {
                        PrepareError::Format(format!(
                            "row {}: column '{}' is not numeric: {:?}",
                            row_idx + 1,
                            COLUMN_MAPPING[slot].0,
                            raw
                        ))
                    }),
                }
            };

            selected.push(SelectedRow {
                region: field(0).map(str::to_string),
                intensity: number(1)?,
                exposure: number(2)?,
                housing: number(3)?,
                poverty: number(4)?,
                vulnerability: number(5)?,
                severity: number(6)?,
                severity_category: field(7).map(str::to_string),
            });
        }

        Ok(selected)
    }
}

/// Стандартный набор маркеров пропуска табличных ридеров
const NA_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Пробелы учитываются только при поиске маркера, само значение не меняется
fn non_missing(raw: &str) -> Option<&str> {
    if NA_MARKERS.contains(&raw.trim()) {
        None
    } else {
        Some(raw)
    }
}

fn parse_number(raw: &str) -> std::result::Result<Option<f64>, std::num::ParseFloatError> {
    let value: f64 = raw.parse()?;
    // "nan" в другом регистре тоже пропуск
    Ok(if value.is_nan() { None } else { Some(value) })
}
