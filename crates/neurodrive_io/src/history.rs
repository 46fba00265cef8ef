use crate::error::{IoError, Result};
use chrono::Utc;
use neurodrive_data::{GenerationReport, LiveEvent};
use sha2::{Digest, Sha256};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const LIVE_FILE: &str = "live.jsonl";

/// Append-only JSONL log of run events.
pub struct HistoryLogger {
    live_file: Option<BufWriter<File>>,
    log_dir: PathBuf,
}

impl HistoryLogger {
    pub fn new_at<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| IoError::from(e).with_context(format!("creating {}", dir.display())))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LIVE_FILE))?;
        Ok(Self {
            live_file: Some(BufWriter::new(file)),
            log_dir: dir.to_path_buf(),
        })
    }

    /// Logger that discards everything.
    pub fn new_dummy() -> Self {
        Self {
            live_file: None,
            log_dir: PathBuf::new(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.live_file.is_some()
    }

    #[must_use]
    pub fn live_path(&self) -> PathBuf {
        self.log_dir.join(LIVE_FILE)
    }

    pub fn log_event(&mut self, event: &LiveEvent) -> Result<()> {
        if let Some(ref mut file) = self.live_file {
            let json = serde_json::to_string(event)?;
            writeln!(file, "{}", json)?;
            file.flush()?;
        }
        Ok(())
    }

    pub fn log_run_started(&mut self, seed: Option<u64>, fingerprint: &str) -> Result<()> {
        self.log_event(&LiveEvent::RunStarted {
            seed,
            fingerprint: fingerprint.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    pub fn log_generation(&mut self, report: &GenerationReport) -> Result<()> {
        self.log_event(&LiveEvent::Generation {
            report: report.clone(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    /// Every generation report written to this logger's directory so far.
    pub fn get_generation_reports(&self) -> Result<Vec<GenerationReport>> {
        if !self.is_enabled() {
            return Ok(vec![]);
        }
        read_generation_reports(self.live_path())
    }

    pub fn compute_history_hash(reports: &[GenerationReport]) -> Result<String> {
        let json = serde_json::to_string(reports)?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Reads all events from a JSONL history file, skipping unparseable lines.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<LiveEvent>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IoError::not_found(path.display().to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let reader = BufReader::new(file);
    let mut events = Vec::new();
    for l in reader.lines().map_while(std::result::Result::ok) {
        match serde_json::from_str::<LiveEvent>(&l) {
            Ok(event) => events.push(event),
            Err(e) => tracing::warn!(error = %e, "Skipping malformed history line"),
        }
    }
    Ok(events)
}

/// Generation reports from a JSONL history file, in write order.
pub fn read_generation_reports<P: AsRef<Path>>(path: P) -> Result<Vec<GenerationReport>> {
    Ok(read_events(path)?
        .into_iter()
        .filter_map(|event| match event {
            LiveEvent::Generation { report, .. } => Some(report),
            LiveEvent::RunStarted { .. } => None,
        })
        .collect())
}
