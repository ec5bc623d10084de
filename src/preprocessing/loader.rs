//! Загрузка исходного CSV

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{PrepareError, Result};

/// Сырая таблица: заголовок и строки как есть
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct CsvLoader;

impl CsvLoader {
    /// Читает файл целиком; дескриптор закрывается до возврата
    pub fn load(path: &Path) -> Result<RawTable> {
        let file = File::open(path).map_err(|e| PrepareError::io(path, e))?;
        let table = Self::read(BufReader::new(file))?;
        tracing::debug!(
            "Loaded {} rows x {} columns from {}",
            table.rows.len(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn read<R: Read>(reader: R) -> Result<RawTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                // BOM у первой колонки
                if i == 0 {
                    h.trim_start_matches('\u{feff}').trim().to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(PrepareError::Format("missing header row".to_string()));
        }

        // короткие строки допустимы: недостающие поля считаются пропусками
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(PrepareError::Format(format!(
                    "row {}: expected at most {} fields, found {}",
                    rows.len() + 1,
                    headers.len(),
                    record.len()
                )));
            }
            rows.push(record);
        }

        Ok(RawTable { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let data = "REGION,Severity\nCentral,3.5\nEastern,\n";
        let table = CsvLoader::read(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["REGION", "Severity"]);
        assert_eq!(table.len(), 2);
        assert_eq!(&table.rows[1][1], "");
    }

    #[test]
    fn strips_bom_and_header_padding() {
        let data = "\u{feff}REGION , Poverty\nCentral,1\n";
        let table = CsvLoader::read(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["REGION", "Poverty"]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let data = "REGION,Hazard (Intensity)\n\"Far-Western, Hills\",7.1\n";
        let table = CsvLoader::read(data.as_bytes()).unwrap();
        assert_eq!(&table.rows[0][0], "Far-Western, Hills");
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(CsvLoader::read("".as_bytes()), Err(PrepareError::Format(_))));
    }

    #[test]
    fn short_rows_are_kept() {
        let data = "a,b,c\n1,2,3\n4,5\n";
        let table = CsvLoader::read(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].len(), 2);
        assert!(table.rows[1].get(2).is_none());
    }

    #[test]
    fn long_rows_are_format_errors() {
        let data = "a,b,c\n1,2,3\n4,5,6,7\n";
        match CsvLoader::read(data.as_bytes()) {
            Err(PrepareError::Format(msg)) => assert!(msg.contains("row 2")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_is_format_error() {
        let data: &[u8] = b"REGION,Severity\nCen\xfftral,3.5\n";
        assert!(matches!(CsvLoader::read(data), Err(PrepareError::Format(_))));
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = CsvLoader::load(Path::new("definitely/not/here.csv"));
        assert!(matches!(result, Err(PrepareError::NotFound(_))));
    }
}
