//! Подготовка датасета индекса тяжести землетрясения

use crate::config::PreparerConfig;
use crate::error::{PrepareError, Result};
use crate::preprocessing::{
    Cleaner, ColumnSelection, CsvLoader, EncodedFrame, FrameEncoder, RawTable, ShuffleSplit,
};
use crate::types::{CleanedRecord, Table, Task, TrainTestSplit, SEVERITY, SEVERITY_CATEGORY};

/// Загрузка -> отбор колонок -> очистка -> кодирование -> разбиение.
///
/// Состояния между вызовами нет: каждый вызов заново читает файл
/// и обучает свой энкодер.
#[derive(Debug, Clone, Default)]
pub struct DatasetPreparer {
    config: PreparerConfig,
}

impl DatasetPreparer {
    pub fn new(config: PreparerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PreparerConfig {
        &self.config
    }

    pub fn get_train_test(&self, task: Task) -> Result<TrainTestSplit> {
        tracing::info!("Preparing {:?} split from {}", task, self.config.data_path.display());

        let raw = self.load()?;
        let records = self.select_and_clean(&raw)?;
        drop(raw);

        let frame = self.encode(&records, task)?;
        let split = self.split(&frame, task)?;

        tracing::info!(
            "Prepared {} train / {} test rows, {} features, {} targets",
            split.x_train.nrows(),
            split.x_test.nrows(),
            split.x_train.ncols(),
            split.y_train.ncols()
        );
        Ok(split)
    }

    pub fn load(&self) -> Result<RawTable> {
        CsvLoader::load(&self.config.data_path)
    }

    pub fn select_and_clean(&self, raw: &RawTable) -> Result<Vec<CleanedRecord>> {
        let selected = ColumnSelection::resolve(&raw.headers)?.select(raw)?;
        let records = Cleaner::drop_incomplete(selected);

        if records.is_empty() {
            return Err(PrepareError::EmptyResult(format!(
                "all {} rows had missing values",
                raw.len()
            )));
        }
        tracing::debug!("{} complete rows after cleaning", records.len());
        Ok(records)
    }

    pub fn encode(&self, records: &[CleanedRecord], task: Task) -> Result<EncodedFrame> {
        if records.is_empty() {
            return Err(PrepareError::EmptyResult("nothing to encode".to_string()));
        }
        FrameEncoder::encode(records, task)
    }

    pub fn split(&self, frame: &EncodedFrame, task: Task) -> Result<TrainTestSplit> {
        let (x, y) = features_and_targets(frame, task)?;
        let (x_train, x_test, y_train, y_test) =
            ShuffleSplit::new(self.config.test_size, self.config.random_state).split(&x, &y)?;

        Ok(TrainTestSplit {
            x_train,
            x_test,
            y_train,
            y_test,
        })
    }
}

/// Разделение закодированной таблицы на признаки и цель.
///
/// Регрессия: y = SEVERITY, категория тяжести в признаки не попадает.
/// Классификация: y = все индикаторы SEVERITY_CATEGORY_*, SEVERITY исключён из X.
pub fn features_and_targets(frame: &EncodedFrame, task: Task) -> Result<(Table, Table)> {
    let table = &frame.numeric;
    match task {
        Task::Regression => {
            // SEVERITY_CATEGORY остался строковой меткой и в числовую таблицу не входит
            let x = table.drop_columns(&[SEVERITY])?;
            let y = table.select_columns(&[SEVERITY])?;
            Ok((x, y))
        }
        Task::Classification => {
            let targets = frame.indicator_columns(SEVERITY_CATEGORY);
            if targets.is_empty() {
                return Err(PrepareError::Schema {
                    missing: vec![format!("{}_*", SEVERITY_CATEGORY)],
                });
            }
            let mut excluded = vec![SEVERITY];
            excluded.extend(targets.iter().copied());

            let x = table.drop_columns(&excluded)?;
            let y = table.select_columns(&targets)?;
            Ok((x, y))
        }
    }
}
