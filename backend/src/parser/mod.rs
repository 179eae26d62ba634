//! Raw record loading with encoding, format and delimiter auto-detection.
//!
//! Accepts either a JSON array of records or a CSV file whose header names
//! the record fields (`first_name`, `last_name`, `username`, `power`,
//! `gender`, `birth_date`). `last_name` may be missing from the header; an
//! empty `last_name` cell means no surname.

use std::path::Path;

use serde::Serialize;

use crate::error::{SourceError, SourceResult};
use crate::models::RawRecord;

/// Columns a CSV source must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["first_name", "username", "power", "gender", "birth_date"];

/// Detected shape of a record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Csv,
}

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records
    pub records: Vec<RawRecord>,
    /// Detected encoding
    pub encoding: String,
    /// Detected format
    pub format: SourceFormat,
    /// Detected delimiter (CSV only)
    pub delimiter: Option<char>,
    /// Column headers (CSV only)
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> SourceResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => {
            let codec = encoding_rs::Encoding::for_label(other.as_bytes())
                .ok_or_else(|| SourceError::Encoding(format!("unsupported encoding '{}'", other)))?;
            codec.decode(bytes).0.into_owned()
        }
    };

    // A UTF-8 BOM survives lossy decoding.
    Ok(decoded.trim_start_matches('\u{feff}').to_string())
}

/// JSON when the first meaningful character opens an array, CSV otherwise.
pub fn detect_format(content: &str) -> SourceFormat {
    match content.trim_start().chars().next() {
        Some('[') => SourceFormat::Json,
        _ => SourceFormat::Csv,
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse a JSON array of raw records.
///
/// # Example
/// ```
/// use roster::parser::parse_records_json;
///
/// let json = r#"[{"first_name":"Iris","username":"ibolens9","power":"418",
///                 "gender":"Female","birth_date":"13.04.1993"}]"#;
/// let records = parse_records_json(json).unwrap();
/// assert_eq!(records[0].username, "ibolens9");
/// assert!(records[0].last_name.is_none());
/// ```
pub fn parse_records_json(content: &str) -> SourceResult<Vec<RawRecord>> {
    Ok(serde_json::from_str(content)?)
}

/// Parse CSV rows into raw records with an explicit delimiter.
pub fn parse_records_csv(content: &str, delimiter: char) -> SourceResult<(Vec<String>, Vec<RawRecord>)> {
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| SourceError::Encoding(format!("delimiter '{}' is not ASCII", delimiter)))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = column(name).ok_or_else(|| SourceError::MissingColumn(name.to_string()))?;
    }
    let [first_name, username, power, gender, birth_date] = indices;
    let last_name = column("last_name");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |idx: usize| row.get(idx).unwrap_or("").to_string();

        records.push(RawRecord {
            first_name: cell(first_name),
            last_name: last_name.map(cell).filter(|s| !s.is_empty()),
            username: cell(username),
            power: cell(power),
            gender: cell(gender),
            birth_date: cell(birth_date),
        });
    }

    Ok((headers, records))
}

/// Parse a decoded string, detecting JSON vs CSV and the CSV delimiter.
pub fn parse_str_auto(content: &str, encoding: String) -> SourceResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(SourceError::Empty);
    }

    match detect_format(content) {
        SourceFormat::Json => Ok(ParseResult {
            records: parse_records_json(content)?,
            encoding,
            format: SourceFormat::Json,
            delimiter: None,
            headers: Vec::new(),
        }),
        SourceFormat::Csv => {
            let delimiter = detect_delimiter(content);
            let (headers, records) = parse_records_csv(content, delimiter)?;
            Ok(ParseResult {
                records,
                encoding,
                format: SourceFormat::Csv,
                delimiter: Some(delimiter),
                headers,
            })
        }
    }
}

/// Parse bytes with auto-detection of encoding, format and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> SourceResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    parse_str_auto(&content, encoding)
}

/// Parse a file with auto-detection.
///
/// # Example
/// ```ignore
/// let result = parse_file_auto("people.csv")?;
/// println!("Encoding: {}, Records: {}", result.encoding, result.records.len());
/// ```
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> SourceResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}
