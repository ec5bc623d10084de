//! Удаление неполных строк

use super::selection::SelectedRow;
use crate::types::CleanedRecord;

pub struct Cleaner;

impl Cleaner {
    /// Отбрасывает строки с любым пропуском; порядок оставшихся сохраняется,
    /// их позиция в результате и есть новый непрерывный индекс.
    pub fn drop_incomplete(rows: Vec<SelectedRow>) -> Vec<CleanedRecord> {
        let total = rows.len();
        let cleaned: Vec<CleanedRecord> = rows.into_iter().filter_map(Self::complete).collect();

        let dropped = total - cleaned.len();
        if dropped > 0 {
            tracing::warn!("Dropped {} of {} rows with missing values", dropped, total);
        }
        cleaned
    }

    fn complete(row: SelectedRow) -> Option<CleanedRecord> {
        Some(CleanedRecord {
            region: row.region?,
            intensity: row.intensity?,
            exposure: row.exposure?,
            housing: row.housing?,
            poverty: row.poverty?,
            vulnerability: row.vulnerability?,
            severity: row.severity?,
            severity_category: row.severity_category?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(region: Option<&str>, severity: Option<f64>) -> SelectedRow {
        SelectedRow {
            region: region.map(str::to_string),
            intensity: Some(1.0),
            exposure: Some(2.0),
            housing: Some(3.0),
            poverty: Some(4.0),
            vulnerability: Some(5.0),
            severity,
            severity_category: Some("Low".to_string()),
        }
    }

    #[test]
    fn keeps_only_complete_rows_in_order() {
        let rows = vec![
            row(Some("A"), Some(1.0)),
            row(None, Some(2.0)),
            row(Some("C"), None),
            row(Some("D"), Some(4.0)),
        ];
        let cleaned = Cleaner::drop_incomplete(rows);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].region, "A");
        assert_eq!(cleaned[1].region, "D");
        assert_eq!(cleaned[1].severity, 4.0);
    }

    #[test]
    fn values_are_not_altered() {
        let cleaned = Cleaner::drop_incomplete(vec![row(Some("A"), Some(9.25))]);
        assert_eq!(
            cleaned[0],
            CleanedRecord {
                region: "A".into(),
                intensity: 1.0,
                exposure: 2.0,
                housing: 3.0,
                poverty: 4.0,
                vulnerability: 5.0,
                severity: 9.25,
                severity_category: "Low".into(),
            }
        );
    }

    #[test]
    fn everything_missing_yields_empty() {
        assert!(Cleaner::drop_incomplete(vec![row(None, None)]).is_empty());
    }
}
