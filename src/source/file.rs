//! File-based probe source.
//!
//! Reads a JSON array of probe rows in the same shape the list endpoint
//! returns. Useful offline and for replaying a captured response.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::ProbeSource;
use crate::data::{ProbeRow, ProbeSnapshot, Sequencer};

/// A probe source that reads the probe list from a JSON file.
///
/// The file is read lazily on the first poll after each reload request.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    sequencer: Sequencer,
    pending: Option<u64>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            sequencer: Sequencer::new(),
            pending: None,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&mut self) -> Option<Vec<ProbeRow>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(rows) => {
                    self.last_error = None;
                    Some(rows)
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "invalid probe file");
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl ProbeSource for FileSource {
    fn request_reload(&mut self) {
        // Back-to-back requests collapse into the newest one.
        self.pending = Some(self.sequencer.issue());
    }

    fn poll(&mut self) -> Option<ProbeSnapshot> {
        let sequence = self.pending.take()?;
        let rows = self.read_file()?;
        self.sequencer
            .accept(sequence)
            .then(|| ProbeSnapshot::new(sequence, rows))
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"[
            {"host": "8.8.8.8", "measurement": "icmp", "threshold": 100, "alerted": false,
             "hours": [1, 1, 2]},
            {"host": "example.org", "measurement": "https", "threshold": "500", "alerted": true}
        ]"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/probes.json");
        assert_eq!(source.path(), Path::new("/tmp/probes.json"));
        assert_eq!(source.description(), "file: /tmp/probes.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_poll_without_request_returns_nothing() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_reload_reads_file_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        source.request_reload();

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.sequence, 1);
        assert_eq!(snapshot.rows.len(), 2);
        assert!(snapshot.rows[1].alerted);

        assert!(source.poll().is_none());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        source.request_reload();
        let _ = source.poll();

        file.as_file().set_len(0).unwrap();
        file.rewind().unwrap();
        writeln!(file, r#"[{{"host": "only", "measurement": "http"}}]"#).unwrap();
        file.flush().unwrap();

        source.request_reload();
        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.sequence, 2);
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.rows[0].host, "only");
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/probes.json");
        source.request_reload();

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        source.request_reload();

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }
}
