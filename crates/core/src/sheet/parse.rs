//! CSV parsing and cell normalisation.
//!
//! Published spreadsheet exports arrive with a fair amount of noise: a
//! UTF-8 BOM glued to the first cell, zero-width spaces pasted in by
//! translators, stray whitespace, and the occasional blank or key-less
//! row. Everything here cleans that up before the sync engine sees it.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::table::LocaleValues;

/// A single data row extracted from the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// Cleaned key exactly as written in the sheet, case preserved.
    pub key: String,
    /// Cleaned cell values keyed by locale column name.
    pub values: LocaleValues,
}

/// Parsed representation of a localisation sheet.
#[derive(Debug, Clone, Default)]
pub struct CsvDocument {
    /// Locale column names in sheet order.
    pub locales: Vec<String>,
    /// Data rows in sheet order, duplicates preserved.
    pub rows: Vec<CsvRow>,
    /// Rows dropped during parsing (empty keys, unparseable records).
    pub skipped: usize,
}

impl CsvDocument {
    /// Uppercased key set of every parsed row.
    pub fn normalized_keys(&self) -> BTreeSet<String> {
        self.rows.iter().map(|row| normalize_key(&row.key)).collect()
    }
}

/// Parse a decoded CSV export.
///
/// The first record is the header: column 0 is the key column, the
/// remaining columns name locales. Data rows with an empty key are
/// skipped and counted, never treated as errors. Quoted cells may embed
/// commas and newlines; the reader is lenient about ragged row widths.
pub fn parse(text: &str) -> CsvDocument {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut document = CsvDocument::default();
    let mut locale_columns: Vec<(usize, String)> = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!("skipping sheet row {}: {err}", row_idx + 1);
                document.skipped += 1;
                continue;
            }
        };

        if row_idx == 0 {
            for (col_idx, field) in record.iter().enumerate().skip(1) {
                let locale = clean_cell(field);
                if locale.is_empty() {
                    continue;
                }
                locale_columns.push((col_idx, locale.clone()));
                document.locales.push(locale);
            }
            continue;
        }

        let key = record.get(0).map(clean_cell).unwrap_or_default();
        if key.is_empty() {
            debug!("skipping sheet row {}: empty key", row_idx + 1);
            document.skipped += 1;
            continue;
        }

        let mut values = LocaleValues::new();
        for (col_idx, locale) in &locale_columns {
            if let Some(field) = record.get(*col_idx) {
                values.insert(locale.clone(), clean_cell(field));
            }
        }
        document.rows.push(CsvRow { key, values });
    }

    document
}

/// Strip BOM and zero-width-space characters, then trim whitespace.
pub fn clean_cell(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '\u{FEFF}' | '\u{200B}'))
        .collect();
    stripped.trim().to_string()
}

/// Canonical (case-insensitive) form of a key: cleaned and uppercased.
pub fn normalize_key(raw: &str) -> String {
    clean_cell(raw).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let document = parse("Key,en,sv\nGREETING,Hello,Hej\nFAREWELL,Bye,Hejdå\n");
        assert_eq!(document.locales, vec!["en".to_string(), "sv".to_string()]);
        assert_eq!(document.rows.len(), 2);
        assert_eq!(document.rows[0].key, "GREETING");
        assert_eq!(
            document.rows[0].values.get("sv").map(String::as_str),
            Some("Hej")
        );
        assert_eq!(document.skipped, 0);
    }

    #[test]
    fn strips_bom_and_zero_width_characters() {
        let document = parse("\u{FEFF}Key,en\nGREETING\u{200B}, Hello \n");
        assert_eq!(document.rows[0].key, "GREETING");
        assert_eq!(
            document.rows[0].values.get("en").map(String::as_str),
            Some("Hello")
        );
    }

    #[test]
    fn skips_rows_without_a_key() {
        let document = parse("Key,en\n\nGREETING,Hello\n,orphan value\n   ,also orphan\n");
        assert_eq!(document.rows.len(), 1);
        assert_eq!(document.rows[0].key, "GREETING");
        assert_eq!(document.skipped, 2);
    }

    #[test]
    fn quoted_cells_may_embed_commas() {
        let document = parse("Key,en\nPRICE,\"1,99 kr\"\n");
        assert_eq!(
            document.rows[0].values.get("en").map(String::as_str),
            Some("1,99 kr")
        );
    }

    #[test]
    fn preserves_duplicate_keys_in_sheet_order() {
        let document = parse("Key,en\nGREETING,first\nGREETING,second\n");
        assert_eq!(document.rows.len(), 2);
        assert_eq!(
            document.rows[1].values.get("en").map(String::as_str),
            Some("second")
        );
    }

    #[test]
    fn short_rows_omit_missing_locales() {
        let document = parse("Key,en,sv\nGREETING,Hello\n");
        let row = &document.rows[0];
        assert_eq!(row.values.get("en").map(String::as_str), Some("Hello"));
        assert!(!row.values.contains_key("sv"));
    }

    #[test]
    fn extra_cells_beyond_the_header_are_ignored() {
        let document = parse("Key,en\nGREETING,Hello,stray,cells\n");
        assert_eq!(document.rows.len(), 1);
        let row = &document.rows[0];
        assert_eq!(row.values.len(), 1);
        assert_eq!(row.values.get("en").map(String::as_str), Some("Hello"));
        assert_eq!(document.skipped, 0);
    }

    #[test]
    fn unclosed_quotes_never_fail_the_parse() {
        // The reader is lenient: an unterminated quoted field runs to the
        // end of the input and comes back as one cell.
        let document = parse("Key,en\nGOOD,fine\nBAD,\"unclosed\n");
        assert_eq!(document.rows.len(), 2);
        assert_eq!(document.rows[1].key, "BAD");
        assert_eq!(
            document.rows[1].values.get("en").map(String::as_str),
            Some("unclosed")
        );
        assert_eq!(document.skipped, 0);
    }

    #[test]
    fn header_only_sheet_yields_no_rows() {
        let document = parse("Key,en,sv\n");
        assert!(document.rows.is_empty());
        assert!(document.normalized_keys().is_empty());
    }

    #[test]
    fn normalized_keys_are_uppercased() {
        let document = parse("Key,en\nhello,x\nWorld,y\n");
        let keys: Vec<String> = document.normalized_keys().into_iter().collect();
        assert_eq!(keys, vec!["HELLO".to_string(), "WORLD".to_string()]);
    }

    #[test]
    fn normalize_key_cleans_before_uppercasing() {
        assert_eq!(normalize_key(" \u{FEFF}greeting "), "GREETING");
        assert_eq!(normalize_key("\u{200B}"), "");
    }
}
