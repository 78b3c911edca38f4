//! JSON Lines chunk sink.
//!
//! Writes one `{"text": ..., "metadata": {...}}` object per line. Non-ASCII
//! text goes out unescaped. The sink is the single choke point for the
//! no-empty-chunk invariant: an empty text here is a splitter defect and
//! aborts the run rather than emitting corrupt data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::models::TextChunk;

pub struct JsonlSink<W: Write> {
    writer: W,
    written: u64,
}

impl JsonlSink<BufWriter<File>> {
    /// Create the output file, making parent directories as needed.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create output file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write_chunk(&mut self, chunk: &TextChunk) -> Result<()> {
        if chunk.text.is_empty() {
            bail!(
                "refusing to emit a chunk with empty text (metadata: {:?})",
                chunk.metadata
            );
        }
        serde_json::to_writer(&mut self.writer, chunk)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flush and return the number of chunks written.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        Ok(self.written)
    }
}
