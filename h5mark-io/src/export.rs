//! Annotated CSV export.

use crate::{Error, Result};
use csv::{Terminator, WriterBuilder};
use h5mark_core::{Mark, Session, Settings};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Header of the trailing column holding each row's mark color.
pub const MARK_COLUMN: &str = "mark color";

/// Writes dataset rows with their mark color to delimited text.
///
/// Every numeric cell is formatted with exactly `precision` decimals; the
/// last field is the covering mark's `#rrggbb` identifier, or empty.
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    delimiter: u8,
    precision: usize,
}

impl CsvExporter {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            delimiter: settings.delimiter_byte(),
            precision: settings.precision(),
        }
    }

    /// Writes a header and one record per row.
    ///
    /// Returns the number of data records written.
    ///
    /// # Errors
    /// Returns an error if a row length differs from the header count or the
    /// writer fails.
    pub fn write<'a, W, I>(&self, writer: W, headers: &[String], rows: I) -> Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = (&'a [f64], Option<&'a Mark>)>,
    {
        let mut csv = WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        csv.write_record(
            headers
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(MARK_COLUMN)),
        )?;

        let precision = self.precision;
        let mut written = 0;
        let mut record: Vec<String> = Vec::with_capacity(headers.len() + 1);
        for (row, mark) in rows {
            if row.len() != headers.len() {
                return Err(Error::InvalidFormat(format!(
                    "row {written} has {} values for {} columns",
                    row.len(),
                    headers.len()
                )));
            }
            record.clear();
            record.extend(row.iter().map(|value| format!("{value:.precision$}")));
            record.push(mark.map(|m| m.color().hex()).unwrap_or_default());
            csv.write_record(&record)?;
            written += 1;
        }
        csv.flush()?;
        Ok(written)
    }

    /// Writes the session's dataset and marks.
    ///
    /// # Errors
    /// Returns [`h5mark_core::Error::Dataset`] when nothing is loaded, or any
    /// error from [`CsvExporter::write`].
    pub fn write_session<W: Write>(&self, writer: W, session: &Session) -> Result<usize> {
        let dataset = session.dataset().ok_or_else(|| {
            h5mark_core::Error::Dataset("no dataset loaded".to_string())
        })?;
        self.write(writer, dataset.headers(), session.export_rows())
    }

    /// Exports the session to a file, replacing it if present.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn export_to_path<P: AsRef<Path>>(&self, path: P, session: &Session) -> Result<usize> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let rows = self.write_session(BufWriter::new(file), session)?;
        info!("Exported {rows} rows to {}", path.display());
        Ok(rows)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
