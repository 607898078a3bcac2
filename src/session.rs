use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::error::ShellError;

/// Mutable per-session state threaded into every command handler.
///
/// The working directory lives here rather than in the process-wide cwd, so
/// relative paths always resolve through [`Session::resolve`] and a `cd` in
/// one session can never leak into anything else. Only the `cd` handler may
/// replace the working directory; only the dispatch loop appends to history.
pub struct Session {
    working_dir: PathBuf,
    history: Vec<String>,
    started: Instant,
    started_at: DateTime<Local>,
}

impl Session {
    /// Creates a session rooted at the directory the process was launched from.
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self::with_working_dir(env::current_dir()?))
    }

    /// Creates a session rooted at an explicit directory.
    pub fn with_working_dir(dir: PathBuf) -> Self {
        Session {
            working_dir: dir,
            history: Vec::new(),
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Replaces the working directory. Callers must have verified that the
    /// path points at an existing directory.
    pub fn set_working_dir(&mut self, dir: PathBuf) {
        self.working_dir = dir;
    }

    /// Resolves a user-supplied path against the session working directory.
    /// Absolute paths pass through untouched.
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    pub fn record(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }
}
