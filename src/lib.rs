//! Подготовка датасета индекса тяжести землетрясения в Непале для обучения моделей

pub mod config;
pub mod error;
pub mod pipeline;
pub mod preprocessing;
pub mod types;

pub use config::PreparerConfig;
pub use error::{PrepareError, Result};
pub use pipeline::DatasetPreparer;
pub use types::*;

/// Готовит разбиение из файла по умолчанию:
/// `regression = true` - регрессия по SEVERITY, иначе классификация по категории.
pub fn get_train_test(regression: bool) -> Result<TrainTestSplit> {
    DatasetPreparer::default().get_train_test(Task::from(regression))
}
