//! One-hot кодирование категориальных признаков

use std::collections::BTreeSet;

use ndarray::{s, Array2, Axis};

use crate::error::{PrepareError, Result};
use crate::types::{CleanedRecord, Table, Task, CANONICAL_COLUMNS, NUMERIC_COLUMNS};

/// One-hot энкодер с игнорированием неизвестных категорий
pub struct OneHotEncoder {
    input_features: Vec<String>,
    categories: Option<Vec<Vec<String>>>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new<S: Into<String>>(input_features: Vec<S>) -> Self {
        Self {
            input_features: input_features.into_iter().map(Into::into).collect(),
            categories: None,
            is_fitted: false,
        }
    }

    pub fn fit(&mut self, data: &Array2<String>) -> Result<()> {
        self.check_width(data)?;
        if data.nrows() == 0 {
            return Err(PrepareError::Encoding("Empty dataset".to_string()));
        }

        // Категории каждой колонки отсортированы, чтобы порядок выходов был стабилен
        let categories = data
            .axis_iter(Axis(1))
            .map(|column| {
                column
                    .iter()
                    .cloned()
                    .collect::<BTreeSet<String>>()
                    .into_iter()
                    .collect::<Vec<_>>()
            })
            .collect();

        self.categories = Some(categories);
        self.is_fitted = true;
        Ok(())
    }

    pub fn transform(&self, data: &Array2<String>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(PrepareError::Encoding("Encoder not fitted".to_string()));
        }
        self.check_width(data)?;

        let categories = self
            .categories
            .as_ref()
            .ok_or_else(|| PrepareError::Encoding("Categories not computed".to_string()))?;

        let width: usize = categories.iter().map(Vec::len).sum();
        let mut encoded = Array2::zeros((data.nrows(), width));

        for (i, row) in data.axis_iter(Axis(0)).enumerate() {
            let mut offset = 0;
            for (value, known) in row.iter().zip(categories) {
                // неизвестная категория - все индикаторы нулевые
                if let Ok(pos) = known.binary_search(value) {
                    encoded[[i, offset + pos]] = 1.0;
                }
                offset += known.len();
            }
        }

        Ok(encoded)
    }

    pub fn fit_transform(&mut self, data: &Array2<String>) -> Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn categories(&self) -> Option<&[Vec<String>]> {
        self.categories.as_deref()
    }

    /// Имена выходных колонок вида `<колонка>_<значение>`
    pub fn feature_names_out(&self) -> Result<Vec<String>> {
        let categories = self
            .categories
            .as_ref()
            .ok_or_else(|| PrepareError::Encoding("Encoder not fitted".to_string()))?;

        Ok(self
            .input_features
            .iter()
            .zip(categories)
            .flat_map(|(feature, values)| values.iter().map(move |v| format!("{}_{}", feature, v)))
            .collect())
    }

    fn check_width(&self, data: &Array2<String>) -> Result<()> {
        if data.ncols() != self.input_features.len() {
            return Err(PrepareError::Encoding(format!(
                "expected {} columns, got {}",
                self.input_features.len(),
                data.ncols()
            )));
        }
        Ok(())
    }
}

/// Закодированный датасет: числовые и индикаторные колонки плюс
/// категориальные колонки, не попавшие в кодирование
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFrame {
    pub numeric: Table,
    pub labels: Vec<(String, Vec<String>)>,
    pub indicators: Vec<(String, Vec<String>)>,
}

impl EncodedFrame {
    pub fn nrows(&self) -> usize {
        self.numeric.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.numeric.ncols() + self.labels.len()
    }

    /// Индикаторные колонки, порождённые категориальной колонкой `source`
    pub fn indicator_columns(&self, source: &str) -> Vec<&str> {
        self.indicators
            .iter()
            .filter(|(column, _)| column == source)
            .flat_map(|(_, names)| names.iter().map(String::as_str))
            .collect()
    }
}

pub struct FrameEncoder;

impl FrameEncoder {
    /// Заменяет категориальные колонки задачи их one-hot разложением.
    /// Энкодер обучается заново на каждом вызове.
    pub fn encode(records: &[CleanedRecord], task: Task) -> Result<EncodedFrame> {
        let categorical = task.categorical_columns();

        let cat_data = Array2::from_shape_fn((records.len(), categorical.len()), |(i, j)| {
            records[i].label(categorical[j]).unwrap_or_default().to_string()
        });
        let mut encoder = OneHotEncoder::new(categorical.to_vec());
        let encoded = encoder.fit_transform(&cat_data)?;
        let indicator_names = encoder.feature_names_out()?;

        let mut indicators: Vec<(String, Vec<String>)> = Vec::with_capacity(categorical.len());
        let mut names = indicator_names.iter().cloned();
        for (column, values) in categorical.iter().zip(encoder.categories().unwrap_or_default()) {
            tracing::debug!("{}: {} categories {:?}", column, values.len(), values);
            indicators.push((column.to_string(), names.by_ref().take(values.len()).collect()));
        }

        let numeric_columns: Vec<&str> = CANONICAL_COLUMNS
            .iter()
            .copied()
            .filter(|c| NUMERIC_COLUMNS.contains(c))
            .collect();
        let labels: Vec<(String, Vec<String>)> = CANONICAL_COLUMNS
            .iter()
            .copied()
            .filter(|c| !categorical.contains(c) && !NUMERIC_COLUMNS.contains(c))
            .map(|c| {
                let values = records
                    .iter()
                    .map(|r| r.label(c).unwrap_or_default().to_string())
                    .collect();
                (c.to_string(), values)
            })
            .collect();

        let n_numeric = numeric_columns.len();
        let mut values = Array2::zeros((records.len(), n_numeric + indicator_names.len()));
        for (i, record) in records.iter().enumerate() {
            for (j, column) in numeric_columns.iter().enumerate() {
                values[[i, j]] = record.numeric(column).unwrap_or(f64::NAN);
            }
        }
        values.slice_mut(s![.., n_numeric..]).assign(&encoded);

        let columns = numeric_columns
            .iter()
            .map(|c| c.to_string())
            .chain(indicator_names)
            .collect();
        let numeric = Table::new((0..records.len()).collect(), columns, values)?;

        Ok(EncodedFrame {
            numeric,
            labels,
            indicators,
        })
    }
}
