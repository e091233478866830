use anyhow::{Context, Result};
use env_logger::{Env, Target, WriteStyle};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Initialises `env_logger` at `info` (or `RUST_LOG`). With a log file,
/// records go to both stderr and the file.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        builder
            .target(Target::Pipe(Box::new(Tee::new(io::stderr(), file))))
            .write_style(WriteStyle::Never);
    }

    builder.try_init().context("Failed to initialise logging")?;
    Ok(())
}

/// Writes everything to a primary writer and a file.
struct Tee<W> {
    primary: W,
    file: File,
}

impl<W: Write> Tee<W> {
    fn new(primary: W, file: File) -> Self {
        Self { primary, file }
    }
}

impl<W: Write> Write for Tee<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        self.file.flush()
    }
}
