//! Time-windowed retrieval of overlay metrics lines
//!
//! The overlay emits one `metal-HUD: <frame>, ...` line per frame, but the same frame can
//! show up more than once in the log stream. Retrieval keeps the first line seen for each
//! frame number, so the scan direction decides which copy survives.

use chrono::{DateTime, Local, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::constants::{config, log};
use crate::error::LogError;
use crate::platform::Capabilities;

/// One line from the process log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }
}

/// Direction a log source walks from its starting position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Entries at or before the position, newest first
    Reverse,
    /// Entries at or after the position, oldest first
    Forward,
}

/// How the retriever walks the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanStrategy {
    /// Start at `now`, walk backwards and filter the whole window
    #[default]
    Reverse,
    /// Start at the window start, walk forwards and stop at the first entry after `now`
    ForwardEarlyStop,
}

/// Queryable process log
pub trait LogSource {
    /// Entries from `position` in `direction`, in source order
    fn entries(
        &self,
        position: DateTime<Utc>,
        direction: ScanDirection,
    ) -> Result<Box<dyn Iterator<Item = LogEntry> + '_>, LogError>;
}

/// Log source over entries held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSource {
    entries: Vec<LogEntry>,
}

impl MemoryLogSource {
    /// Entries are kept in chronological order; ties keep insertion order
    pub fn new(mut entries: Vec<LogEntry>) -> Self {
        entries.sort_by_key(|e| e.timestamp);
        Self { entries }
    }

    pub fn push(&mut self, entry: LogEntry) {
        let idx = self.entries.partition_point(|e| e.timestamp <= entry.timestamp);
        self.entries.insert(idx, entry);
    }
}

impl LogSource for MemoryLogSource {
    fn entries(
        &self,
        position: DateTime<Utc>,
        direction: ScanDirection,
    ) -> Result<Box<dyn Iterator<Item = LogEntry> + '_>, LogError> {
        Ok(scan(&self.entries, position, direction))
    }
}

/// Log source reading `<RFC 3339 timestamp> <message>` lines from a file
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<Vec<LogEntry>, LogError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound || source.kind() == io::ErrorKind::PermissionDenied {
                LogError::OpenStore { path: self.path.clone(), source }
            } else {
                LogError::ReadStore { path: self.path.clone(), source }
            }
        })?;

        let mut entries = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            match parse_log_line(line) {
                Some(entry) => entries.push(entry),
                None if line.trim().is_empty() => {}
                None => debug!(line_number = idx + 1, "Skipping malformed log line"),
            }
        }
        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }
}

impl LogSource for FileLogSource {
    fn entries(
        &self,
        position: DateTime<Utc>,
        direction: ScanDirection,
    ) -> Result<Box<dyn Iterator<Item = LogEntry> + '_>, LogError> {
        let entries = self.load()?;
        let iter: Box<dyn Iterator<Item = LogEntry>> = match direction {
            ScanDirection::Reverse => Box::new(
                entries
                    .into_iter()
                    .rev()
                    .filter(move |e| e.timestamp <= position),
            ),
            ScanDirection::Forward => Box::new(
                entries
                    .into_iter()
                    .filter(move |e| e.timestamp >= position),
            ),
        };
        Ok(iter)
    }
}

fn scan<'a>(
    entries: &'a [LogEntry],
    position: DateTime<Utc>,
    direction: ScanDirection,
) -> Box<dyn Iterator<Item = LogEntry> + 'a> {
    match direction {
        ScanDirection::Reverse => Box::new(
            entries
                .iter()
                .rev()
                .filter(move |e| e.timestamp <= position)
                .cloned(),
        ),
        ScanDirection::Forward => Box::new(
            entries
                .iter()
                .filter(move |e| e.timestamp >= position)
                .cloned(),
        ),
    }
}

/// Parse `<RFC 3339 timestamp> <message>`
pub fn parse_log_line(line: &str) -> Option<LogEntry> {
    let (stamp, message) = line.split_once(' ')?;
    let timestamp = DateTime::parse_from_rfc3339(stamp).ok()?.with_timezone(&Utc);
    Some(LogEntry::new(timestamp, message))
}

/// Frame number of a metrics line: text after the prefix, up to the first comma, trimmed
///
/// Lines without the prefix or without a comma have no frame key. The key is only used
/// for deduplication and is never parsed as a number.
pub fn frame_key(message: &str) -> Option<&str> {
    let rest = message.strip_prefix(log::MESSAGE_PREFIX)?.trim();
    let (key, _) = rest.split_once(log::FRAME_KEY_TERMINATOR)?;
    Some(key.trim())
}

/// Keep the first message seen per frame key, in encounter order
pub fn dedup_by_frame<I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = LogEntry>,
{
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for entry in entries {
        let Some(key) = frame_key(&entry.message) else {
            continue;
        };
        if seen.insert(key.to_string()) {
            lines.push(entry.message);
        }
    }
    lines
}

/// Pulls overlay lines out of a log source and writes the deduplicated report
pub struct LogRetriever<S: LogSource> {
    source: S,
    capabilities: Capabilities,
    strategy: ScanStrategy,
}

impl<S: LogSource> LogRetriever<S> {
    pub fn new(source: S, capabilities: Capabilities) -> Self {
        Self {
            source,
            capabilities,
            strategy: ScanStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the last `past_seconds` of overlay lines into `out_path`
    ///
    /// Returns the number of lines written.
    pub fn fetch_logs(&self, past_seconds: i64, out_path: &Path) -> Result<usize, LogError> {
        self.fetch_logs_at(Utc::now(), past_seconds, out_path)
    }

    /// [`fetch_logs`](Self::fetch_logs) against an explicit `now`
    pub fn fetch_logs_at(
        &self,
        now: DateTime<Utc>,
        past_seconds: i64,
        out_path: &Path,
    ) -> Result<usize, LogError> {
        if out_path.as_os_str().is_empty() {
            error!("Log artifact path is empty");
            return Err(LogError::EmptyOutputPath);
        }

        let lines = self.collect_report(now, past_seconds).inspect_err(|e| {
            error!(error = %e, "Error fetching overlay logs");
        })?;

        write_artifact(out_path, &lines).inspect_err(|e| {
            error!(error = %e, "Error writing overlay log artifact");
        })?;

        info!(count = lines.len(), path = %out_path.display(), "Fetched overlay log entries");
        Ok(lines.len())
    }

    /// Deduplicated overlay lines in `[now - past_seconds, now]`, in scan order
    pub fn collect_report(&self, now: DateTime<Utc>, past_seconds: i64) -> Result<Vec<String>, LogError> {
        if past_seconds < 0 {
            return Err(LogError::InvalidWindow(past_seconds));
        }
        if !self.capabilities.log_store {
            warn!("Process log store is not available on this platform");
            return Err(LogError::StoreUnavailable);
        }

        let start = TimeDelta::try_seconds(past_seconds)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or(LogError::InvalidWindow(past_seconds))?;
        debug!(start = %start, end = %now, strategy = ?self.strategy, "Scanning overlay log window");

        let is_overlay_line = |e: &LogEntry| e.message.starts_with(log::MESSAGE_PREFIX);

        let lines = match self.strategy {
            ScanStrategy::Reverse => {
                let entries = self.source.entries(now, ScanDirection::Reverse)?;
                dedup_by_frame(
                    entries
                        .filter(is_overlay_line)
                        .filter(|e| e.timestamp >= start && e.timestamp <= now),
                )
            }
            ScanStrategy::ForwardEarlyStop => {
                let entries = self.source.entries(start, ScanDirection::Forward)?;
                dedup_by_frame(
                    entries
                        .take_while(|e| e.timestamp <= now)
                        .filter(is_overlay_line)
                        .filter(|e| e.timestamp >= start),
                )
            }
        };
        Ok(lines)
    }
}

/// Write `lines` joined by `\n` (no trailing newline), replacing `path` atomically
///
/// Missing parent directories are created. The content goes to a hidden sibling first and
/// is renamed into place, so a failed write never leaves a partial artifact at `path`.
pub fn write_artifact(path: &Path, lines: &[String]) -> Result<(), LogError> {
    let write_error = |source: io::Error| LogError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| write_error(io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = lines.join("\n");
    let result = fs::write(&tmp_path, content.as_bytes()).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_error(source));
    }
    Ok(())
}

/// `FetchLogging_<device>_<os>_<yyyyMMdd_HHmmss>.txt`, spaces replaced by underscores
pub fn artifact_file_name(device_model: &str, os: &str, at: DateTime<Local>) -> String {
    format!(
        "{}_{}_{}_{}.txt",
        log::ARTIFACT_PREFIX,
        device_model.replace(' ', "_"),
        os.replace(' ', "_"),
        at.format(log::ARTIFACT_TIMESTAMP_FORMAT)
    )
}

/// Default artifact location under the user data directory
pub fn default_artifact_path(device_model: &str, os: &str, at: DateTime<Local>) -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(config::APP_DIR);
    path.push(artifact_file_name(device_model, os, at));
    path
}
