//! Разбор текста CSV в строки `CsvRow`.
//!
//! Первая запись — заголовок. Пустые строки пропускаются, строки разной
//! длины допускаются: недостающие ячейки отсутствуют в строке, лишние
//! отбрасываются. Значения не обрезаются.

use contracts::shared::CsvRow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvIngestError {
    #[error("Failed to read CSV headers: {0}")]
    Headers(#[source] csv::Error),

    #[error("Malformed CSV record at line {line}: {source}")]
    Record {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

const UTF8_BOM: char = '\u{feff}';

pub fn parse_csv_text(text: &str) -> Result<Vec<CsvRow>, CsvIngestError> {
    let text = text.trim_start_matches(UTF8_BOM);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(CsvIngestError::Headers)?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| CsvIngestError::Record {
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;

        // Строка из одного пустого поля — пустая строка файла
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }

        let row: CsvRow = headers.iter().zip(record.iter()).collect();
        rows.push(row);
    }

    tracing::debug!("Parsed {} CSV rows ({} columns)", rows.len(), headers.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let rows = parse_csv_text("SKU,Quantity\nGLD,5\nRDB,3\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("SKU"), Some("GLD"));
        assert_eq!(rows[1].get("Quantity"), Some("3"));
        assert_eq!(rows[0].columns().collect::<Vec<_>>(), vec!["SKU", "Quantity"]);
    }

    #[test]
    fn test_blank_lines_and_bom() {
        let rows = parse_csv_text("\u{feff}SKU,Quantity\n\nGLD,5\n\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sku(), Some("GLD"));
    }

    #[test]
    fn test_ragged_rows() {
        let rows = parse_csv_text("SKU,Quantity,Name\nGLD\nRDB,3,Banana,extra\n").unwrap();
        assert_eq!(rows[0].get("SKU"), Some("GLD"));
        assert_eq!(rows[0].get("Quantity"), None);
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[1].get("Name"), Some("Banana"));
    }

    #[test]
    fn test_values_not_trimmed() {
        let rows = parse_csv_text("SKU,Quantity\n GLD , 5\n").unwrap();
        assert_eq!(rows[0].get("SKU"), Some(" GLD "));
    }

    #[test]
    fn test_quoted_fields() {
        let rows = parse_csv_text("SKU,Name\n\"GA123\",\"Apple, golden\"\n").unwrap();
        assert_eq!(rows[0].product_name(), Some("Apple, golden"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv_text("").unwrap().is_empty());
        assert!(parse_csv_text("SKU,Quantity\n").unwrap().is_empty());
    }
}
