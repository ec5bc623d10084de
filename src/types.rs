//! Типы данных для подготовки датасета

use linfa::Dataset;
use ndarray::{Array1, Array2, Axis, Ix1};
use serde::{Deserialize, Serialize};

use crate::error::{PrepareError, Result};

pub const REGION: &str = "REGION";
pub const INTENSITY: &str = "INTENSITY";
pub const EXPOSURE: &str = "EXPOSURE";
pub const HOUSING: &str = "HOUSING";
pub const POVERTY: &str = "POVERTY";
pub const VULNERABILITY: &str = "VULNERABILITY";
pub const SEVERITY: &str = "SEVERITY";
pub const SEVERITY_CATEGORY: &str = "SEVERITY_CATEGORY";

/// Канонические имена колонок в порядке выходной таблицы
pub const CANONICAL_COLUMNS: [&str; 8] = [
    REGION,
    INTENSITY,
    EXPOSURE,
    HOUSING,
    POVERTY,
    VULNERABILITY,
    SEVERITY,
    SEVERITY_CATEGORY,
];

pub const NUMERIC_COLUMNS: [&str; 6] = [INTENSITY, EXPOSURE, HOUSING, POVERTY, VULNERABILITY, SEVERITY];

/// Запись после отбора колонок и удаления пропусков
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub region: String,
    pub intensity: f64,
    pub exposure: f64,
    pub housing: f64,
    pub poverty: f64,
    pub vulnerability: f64,
    pub severity: f64,
    pub severity_category: String,
}

impl CleanedRecord {
    /// Значение категориального поля по каноническому имени
    pub fn label(&self, column: &str) -> Option<&str> {
        match column {
            REGION => Some(&self.region),
            SEVERITY_CATEGORY => Some(&self.severity_category),
            _ => None,
        }
    }

    /// Значение числового поля по каноническому имени
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            INTENSITY => Some(self.intensity),
            EXPOSURE => Some(self.exposure),
            HOUSING => Some(self.housing),
            POVERTY => Some(self.poverty),
            VULNERABILITY => Some(self.vulnerability),
            SEVERITY => Some(self.severity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Цель - непрерывный индекс SEVERITY
    #[default]
    Regression,
    /// Цель - one-hot разложение SEVERITY_CATEGORY
    Classification,
}

impl Task {
    pub fn categorical_columns(self) -> &'static [&'static str] {
        match self {
            Task::Regression => &[REGION],
            Task::Classification => &[REGION, SEVERITY_CATEGORY],
        }
    }
}

impl From<bool> for Task {
    fn from(regression: bool) -> Self {
        if regression {
            Task::Regression
        } else {
            Task::Classification
        }
    }
}

/// Числовая таблица с именованными колонками.
///
/// `index` хранит номер строки в очищенном датасете, поэтому строки
/// train и test можно собрать обратно в исходном порядке.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub index: Vec<usize>,
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl Table {
    pub fn new(index: Vec<usize>, columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if values.nrows() != index.len() || values.ncols() != columns.len() {
            return Err(PrepareError::Format(format!(
                "table shape {:?} does not match {} rows x {} columns",
                values.dim(),
                index.len(),
                columns.len()
            )));
        }
        Ok(Self {
            index,
            columns,
            values,
        })
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Array1<f64>> {
        self.column_index(name)
            .map(|idx| self.values.column(idx).to_owned())
    }

    pub fn select_columns(&self, names: &[&str]) -> Result<Table> {
        let positions = self.positions_of(names)?;
        Ok(Table {
            index: self.index.clone(),
            columns: names.iter().map(|n| n.to_string()).collect(),
            values: self.values.select(Axis(1), &positions),
        })
    }

    pub fn drop_columns(&self, names: &[&str]) -> Result<Table> {
        self.positions_of(names)?;
        let kept: Vec<&str> = self
            .columns
            .iter()
            .map(String::as_str)
            .filter(|c| !names.contains(c))
            .collect();
        self.select_columns(&kept)
    }

    /// Строки по позициям (не по значениям `index`), в указанном порядке
    pub fn take_rows(&self, positions: &[usize]) -> Result<Table> {
        if let Some(&bad) = positions.iter().find(|&&p| p >= self.nrows()) {
            return Err(PrepareError::Split(format!(
                "row position {} out of bounds for {} rows",
                bad,
                self.nrows()
            )));
        }
        Ok(Table {
            index: positions.iter().map(|&p| self.index[p]).collect(),
            columns: self.columns.clone(),
            values: self.values.select(Axis(0), positions),
        })
    }

    fn positions_of(&self, names: &[&str]) -> Result<Vec<usize>> {
        let mut positions = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => positions.push(idx),
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(PrepareError::Schema { missing });
        }
        Ok(positions)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub x_train: Table,
    pub x_test: Table,
    pub y_train: Table,
    pub y_test: Table,
}

impl TrainTestSplit {
    pub fn into_parts(self) -> (Table, Table, Table, Table) {
        (self.x_train, self.x_test, self.y_train, self.y_test)
    }

    /// Обучающий и тестовый датасеты linfa для одноколоночной цели
    pub fn regression_datasets(&self) -> Result<(Dataset<f64, f64, Ix1>, Dataset<f64, f64, Ix1>)> {
        Ok((
            Self::to_dataset(&self.x_train, &self.y_train)?,
            Self::to_dataset(&self.x_test, &self.y_test)?,
        ))
    }

    fn to_dataset(x: &Table, y: &Table) -> Result<Dataset<f64, f64, Ix1>> {
        if y.ncols() != 1 {
            return Err(PrepareError::Split(format!(
                "expected a single target column, got {}",
                y.ncols()
            )));
        }
        let targets = y.values.column(0).to_owned();
        Ok(Dataset::new(x.values.clone(), targets).with_feature_names(x.columns.clone()))
    }
}
