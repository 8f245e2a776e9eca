//! Output strategies
//!
//! An output receives the complete list of transformed records once.

use std::io::{BufWriter, Write};

use crate::error::Result;
use crate::record::Record;

/// Trait for output strategies (sinks)
pub trait Output {
    /// Write all `records` to `destination`
    fn emit(&self, destination: &str, records: &[Record]) -> Result<()>;

    /// One-line description shown in the CLI help
    fn describe(&self) -> &'static str;
}

/// Writes the records as a single JSON array, replacing the file
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileOutput;

impl Output for JsonFileOutput {
    fn emit(&self, destination: &str, records: &[Record]) -> Result<()> {
        tracing::debug!(path = destination, count = records.len(), "writing records");
        let file = std::fs::File::create(destination)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "write results to a JSON file"
    }
}

/// Pretty-prints the records to standard output; the destination is ignored
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    /// Render `records` as indented JSON followed by a newline
    pub fn render<W: Write>(records: &[Record], writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, records)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Output for ConsoleOutput {
    fn emit(&self, _destination: &str, records: &[Record]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        Self::render(records, &mut handle)?;
        handle.flush()?;
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "pretty-print results to the console"
    }
}
