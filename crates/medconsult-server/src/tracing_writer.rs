//! Tracing writer for the file log layer.
//!
//! [`FileMakeWriter`] appends formatted events to the server log file. The
//! file layer is built with `.with_ansi(false)` so no ANSI stripping is
//! needed, and keeps its own `EnvFilter` apart from the terminal layer.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Log file name inside the configured log directory.
pub const LOG_FILE_NAME: &str = "medconsult.log";

/// Opens `<log_dir>/medconsult.log` for appending, creating the directory.
///
/// Failures are reported on stderr and disable file logging rather than
/// aborting startup.
pub fn open_log_file(log_dir: &Path) -> Option<Arc<Mutex<File>>> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "Warning: cannot create log directory {}: {e}",
            log_dir.display()
        );
        return None;
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(Arc::new(Mutex::new(file))),
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {e}", log_path.display());
            None
        }
    }
}

/// [`MakeWriter`](tracing_subscriber::fmt::MakeWriter) for the file layer.
#[derive(Clone)]
pub struct FileMakeWriter {
    file: Arc<Mutex<File>>,
}

impl FileMakeWriter {
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for FileMakeWriter {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter {
            file: Arc::clone(&self.file),
            buf: Vec::with_capacity(256),
        }
    }
}

/// Per-event writer for file output.
///
/// Buffers one formatted event and appends it under the lock on [`Drop`],
/// so lines from concurrent requests never interleave.
pub struct FileWriter {
    file: Arc<Mutex<File>>,
    buf: Vec<u8>,
}

impl Write for FileWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }

        let mut file = self.file.lock();
        let _ = file.write_all(&self.buf);
        let _ = file.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn events_are_appended_on_drop() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let file = open_log_file(&temp.path().join("logs")).expect("open log file");
        let make = FileMakeWriter::new(file);

        {
            let mut writer = make.make_writer();
            writer.write_all(b"first ").expect("write");
            writer.write_all(b"line\n").expect("write");
        }
        {
            let mut writer = make.make_writer();
            writer.write_all(b"second line\n").expect("write");
        }

        let content = std::fs::read_to_string(temp.path().join("logs").join(LOG_FILE_NAME))
            .expect("read log");
        assert_eq!(content, "first line\nsecond line\n");
    }

    #[test]
    fn unwritable_directory_disables_file_logging() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "x").expect("write blocker");

        assert!(open_log_file(&blocker.join("logs")).is_none());
    }
}
