use crate::domain::model::OfficeRecord;
use crate::domain::ports::RecordSink;
use crate::utils::error::Result;
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::io::Write;

/// Streams admitted records as always-quoted two-field CSV lines, flushed
/// per record so each location appears on the output as it is found.
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        let writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .has_headers(false)
            .from_writer(out);
        Self { writer }
    }
}

impl CsvSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> RecordSink for CsvSink<W> {
    fn accept(&mut self, record: &OfficeRecord) -> Result<()> {
        self.writer
            .write_record([record.location_key(), record.detail()])?;
        self.writer.flush()?;
        Ok(())
    }
}
