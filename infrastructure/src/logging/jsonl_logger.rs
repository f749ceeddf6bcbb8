//! JSONL file writer for engine events.
//!
//! Each [`VoteEvent`] is serialized as a single JSON line with a
//! `type` field and an RFC 3339 `timestamp`. The file is opened in append
//! mode so restarts extend the same audit trail.

use concord_application::ports::vote_event_logger::{VoteEvent, VoteEventLogger};
use serde_json::{Value, json};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Audit logger that appends one JSON object per engine event.
///
/// Lines go through a `Mutex<BufWriter<File>>` and are flushed per event, so
/// a crash loses at most the event being written.
pub struct JsonlVoteEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlVoteEventLogger {
    /// Open (or create) the log file for appending, creating parent
    /// directories as needed.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Appending engine events to {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Payload fields sit next to `type` and `timestamp`; a non-object payload
/// goes under `data`.
fn to_record(event: VoteEvent, timestamp: String) -> Value {
    match event.payload {
        Value::Object(mut map) => {
            map.insert("type".to_string(), Value::from(event.event_type));
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        }
        data => json!({
            "type": event.event_type,
            "timestamp": timestamp,
            "data": data,
        }),
    }
}

impl VoteEventLogger for JsonlVoteEventLogger {
    fn log(&self, event: VoteEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let record = to_record(event, timestamp);

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        let written = serde_json::to_writer(&mut *writer, &record)
            .map_err(io::Error::from)
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush());
        if let Err(e) = written {
            warn!("Failed to write event to {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlVoteEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
