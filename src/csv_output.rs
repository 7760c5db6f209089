//! CSV export of simulation results
//!
//! One header row, then one row per sample:
//! `Profile,MemoryDensity,EmotionalCharge,Recursion,TimeDistortion`.
//! Floats use Rust's shortest round-trip formatting, so [`CsvOutput::parse`]
//! reads back exactly the values that were written.

use crate::batch::{ResultBatch, SampleBatch};
use crate::error::{PtlxError, Result};
use std::fs;
use std::path::Path;

/// Column names in output order
pub const CSV_COLUMNS: [&str; 5] = [
    "Profile",
    "MemoryDensity",
    "EmotionalCharge",
    "Recursion",
    "TimeDistortion",
];

/// CSV output formatter for a result batch
#[derive(Debug)]
pub struct CsvOutput<'a> {
    batch: &'a ResultBatch,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter
    pub fn new(batch: &'a ResultBatch) -> Self {
        Self { batch }
    }

    fn header() -> String {
        CSV_COLUMNS.join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
        {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(label: &str, m: f64, e: f64, r: f64, t: f64) -> String {
        format!("{},{},{},{},{}", Self::escape_field(label), m, e, r, t)
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&Self::header());
        output.push('\n');

        for (sample, t) in self.batch.rows() {
            output.push_str(&Self::format_row(
                sample.label,
                sample.m,
                sample.e,
                sample.r,
                t,
            ));
            output.push('\n');
        }

        output
    }

    /// Write the full snapshot to `path`
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_csv())?;
        tracing::info!(
            path = %path.display(),
            rows = self.batch.len(),
            "wrote CSV export"
        );
        Ok(())
    }

    /// Parse CSV text produced by [`CsvOutput::to_csv`] back into a batch
    ///
    /// # Errors
    /// `CsvParse` with a 1-based line number on a wrong header, wrong field
    /// count, unparseable float or unterminated quote.
    pub fn parse(content: &str) -> Result<ResultBatch> {
        let records = split_records(content)?;
        let mut records = records.into_iter();

        match records.next() {
            Some((_, header)) if header == CSV_COLUMNS => {}
            Some((line, header)) => {
                return Err(PtlxError::CsvParse {
                    line,
                    message: format!("unexpected header: {}", header.join(",")),
                })
            }
            None => {
                return Err(PtlxError::CsvParse {
                    line: 1,
                    message: "missing header row".to_string(),
                })
            }
        }

        let mut labels = Vec::new();
        let mut m = Vec::new();
        let mut e = Vec::new();
        let mut r = Vec::new();
        let mut t = Vec::new();

        for (line, fields) in records {
            if fields.len() != CSV_COLUMNS.len() {
                return Err(PtlxError::CsvParse {
                    line,
                    message: format!(
                        "expected {} fields, got {}",
                        CSV_COLUMNS.len(),
                        fields.len()
                    ),
                });
            }

            let mut fields = fields.into_iter();
            labels.push(fields.next().unwrap_or_default());
            m.push(parse_float(fields.next(), line, CSV_COLUMNS[1])?);
            e.push(parse_float(fields.next(), line, CSV_COLUMNS[2])?);
            r.push(parse_float(fields.next(), line, CSV_COLUMNS[3])?);
            t.push(parse_float(fields.next(), line, CSV_COLUMNS[4])?);
        }

        let samples = SampleBatch::new(m, e, r, labels)?;
        ResultBatch::new(samples, t)
    }

    /// Read and parse a CSV file
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ResultBatch> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }
}

fn parse_float(field: Option<String>, line: usize, column: &str) -> Result<f64> {
    let field = field.unwrap_or_default();
    field.trim().parse::<f64>().map_err(|_| PtlxError::CsvParse {
        line,
        message: format!("invalid {} value '{}'", column, field),
    })
}

/// Split CSV text into records of unescaped fields, tagged with the line each
/// record starts on. Blank lines are skipped.
fn split_records(content: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                if !fields.is_empty() || !field.is_empty() {
                    fields.push(std::mem::take(&mut field));
                    records.push((record_line, std::mem::take(&mut fields)));
                }
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(PtlxError::CsvParse {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !fields.is_empty() || !field.is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}
