use std::fs::{File, OpenOptions};
use std::io::{self, Stdout, Write};
use std::path::Path;

/// Trailing line of the export file: forwards the arguments the file was
/// invoked with, so `sh vault-env cmd args...` runs `cmd args...` with the
/// exports in place.
pub const PASSTHROUGH: &str = "$*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignment {
    pub env_key: String,
    pub value: String,
}

impl ResolvedAssignment {
    pub fn export_line(&self) -> String {
        format!("export {}={}", self.env_key, self.value)
    }
}

/// Destination of resolved exports.
///
/// Every line is flushed as soon as it is written, so lines resolved before
/// a failure stay in the file.
pub struct OutputSink<W: Write> {
    writer: W,
    passthrough: bool,
    lines: usize,
}

impl OutputSink<Stdout> {
    /// Debug destination: exports only, no passthrough line
    pub fn console() -> Self {
        Self::new(io::stdout(), false)
    }
}

impl OutputSink<File> {
    /// Create or truncate the export file at `path`
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o755);
        }
        let file = options.open(path)?;
        Ok(Self::new(file, true))
    }
}

impl<W: Write> OutputSink<W> {
    pub fn new(writer: W, passthrough: bool) -> Self {
        Self {
            writer,
            passthrough,
            lines: 0,
        }
    }

    pub fn write_assignment(&mut self, assignment: &ResolvedAssignment) -> io::Result<()> {
        writeln!(self.writer, "{}", assignment.export_line())?;
        self.writer.flush()?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Append the passthrough line (file sinks only) and hand back the writer
    pub fn finish(mut self) -> io::Result<W> {
        if self.passthrough {
            writeln!(self.writer, "{}", PASSTHROUGH)?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}
