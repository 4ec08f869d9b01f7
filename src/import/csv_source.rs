//! CSV tabular source
//!
//! Reads a header row and the records below it, and reports a raw dtype tag
//! per column the way dataframe loaders do:
//!
//! - `int64` when every value is an integer and nothing is missing
//! - `uint64` when every value is a non-negative integer, some too large for
//!   `int64`, and nothing is missing
//! - `float64` when every present value is numeric (integers with gaps
//!   included) or the column is entirely missing
//! - `bool` when every value is `True`/`False` and nothing is missing
//! - `object` otherwise, including integers that overflow 64 bits and
//!   columns mixing negative integers with ones beyond `int64`

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ImportError, SourceColumn, TabularSource};

/// Tokens read as missing values (compared case-insensitively)
const MISSING_TOKENS: &[&str] = &["na", "n/a", "#n/a", "nan", "null", "none"];

/// Options controlling how a CSV source is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Maximum number of records used to sniff dtypes (0 = all)
    pub sample_rows: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            sample_rows: 0,
        }
    }
}

#[derive(Debug, Clone)]
enum Input {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Tabular source reading CSV data from a file or an in-memory buffer
///
/// Data is read when [`TabularSource::columns`] is called, so an unreadable
/// file surfaces as an error of the derivation that uses it.
#[derive(Debug, Clone)]
pub struct CsvSource {
    identifier: String,
    input: Input,
    options: CsvOptions,
}

impl CsvSource {
    /// Source backed by a file; the identifier is the file name up to its
    /// first `.`
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            identifier: identifier_from_path(path),
            input: Input::Path(path.to_path_buf()),
            options: CsvOptions::default(),
        }
    }

    /// Source backed by CSV bytes held in memory
    pub fn from_bytes(identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            identifier: identifier.into(),
            input: Input::Bytes(bytes.into()),
            options: CsvOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    fn read<R: std::io::Read>(
        &self,
        mut reader: csv::Reader<R>,
    ) -> Result<Vec<SourceColumn>, ImportError> {
        let headers = reader.headers().map_err(from_csv_error)?.clone();
        if headers.is_empty() {
            return Err(ImportError::MissingHeader(self.identifier.clone()));
        }

        let mut candidates = vec![DtypeCandidate::default(); headers.len()];
        let mut record = csv::StringRecord::new();
        let mut processed = 0usize;
        while self.options.sample_rows == 0 || processed < self.options.sample_rows {
            if !reader.read_record(&mut record).map_err(from_csv_error)? {
                break;
            }
            for (idx, field) in record.iter().enumerate() {
                candidates[idx].update(field);
            }
            processed += 1;
        }

        debug!(
            "Sniffed {} columns from {} records of \"{}\"",
            headers.len(),
            processed,
            self.identifier
        );

        Ok(headers
            .iter()
            .zip(candidates)
            .map(|(name, candidate)| SourceColumn::new(name, candidate.decide()))
            .collect())
    }
}

impl TabularSource for CsvSource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn columns(&self) -> Result<Vec<SourceColumn>, ImportError> {
        let mut builder = csv::ReaderBuilder::new();
        builder.delimiter(self.options.delimiter).has_headers(true);

        match &self.input {
            Input::Path(path) => {
                let reader = builder.from_path(path).map_err(|e| match from_csv_error(e) {
                    ImportError::IoError(msg) => {
                        ImportError::IoError(format!("{}: {}", path.display(), msg))
                    }
                    other => other,
                })?;
                self.read(reader)
            }
            Input::Bytes(bytes) => self.read(builder.from_reader(bytes.as_slice())),
        }
    }
}

fn from_csv_error(err: csv::Error) -> ImportError {
    if let csv::ErrorKind::Io(io) = err.kind() {
        return ImportError::IoError(io.to_string());
    }
    ImportError::ParseError(err.to_string())
}

fn identifier_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
struct DtypeCandidate {
    present: usize,
    missing: usize,
    integer_matches: usize,
    unsigned_matches: usize,
    integral_matches: usize,
    oversized_integers: usize,
    float_matches: usize,
    boolean_matches: usize,
}

impl DtypeCandidate {
    fn update(&mut self, value: &str) {
        let trimmed = value.trim();
        if is_missing(trimmed) {
            self.missing += 1;
            return;
        }

        self.present += 1;
        let signed = trimmed.parse::<i64>().is_ok();
        let unsigned = trimmed.parse::<u64>().is_ok();
        if signed {
            self.integer_matches += 1;
        }
        if unsigned {
            self.unsigned_matches += 1;
        }
        if signed || unsigned {
            self.integral_matches += 1;
        } else if is_integer_literal(trimmed) {
            self.oversized_integers += 1;
        }
        if trimmed.parse::<f64>().is_ok() {
            self.float_matches += 1;
        }
        if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
            self.boolean_matches += 1;
        }
    }

    fn decide(self) -> &'static str {
        if self.present == 0 {
            // No records at all reads as text, a column of gaps as floats
            return if self.missing == 0 { "object" } else { "float64" };
        }
        if self.oversized_integers > 0 {
            // Beyond 64 bits; a float would silently lose digits
            return "object";
        }
        if self.missing == 0 && self.integral_matches == self.present {
            return if self.integer_matches == self.present {
                "int64"
            } else if self.unsigned_matches == self.present {
                "uint64"
            } else {
                "object"
            };
        }
        if self.float_matches == self.present {
            "float64"
        } else if self.boolean_matches == self.present && self.missing == 0 {
            "bool"
        } else {
            "object"
        }
    }
}

/// Optional sign followed by decimal digits only
fn is_integer_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_missing(value: &str) -> bool {
    value.is_empty()
        || MISSING_TOKENS
            .iter()
            .any(|token| value.eq_ignore_ascii_case(token))
}
