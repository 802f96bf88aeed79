//! Per-session result files: one record per guessed round, the final summary and a progress
//! snapshot, all under `<results_dir>/<session_id>/`.

use crate::sessions::models::{FinalSummary, RoundEntry, SessionProgress};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FINAL_SUMMARY_FILE: &str = "full.txt";
const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Error)]
pub enum ResultStoreError {
    #[error("failed to create results directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize session progress into {path}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("corrupted session progress in {path}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug)]
pub struct FileResultStore {
    dir: PathBuf,
}

impl FileResultStore {
    pub fn new(results_dir: &Path, session_id: &str) -> Self {
        Self {
            dir: results_dir.join(session_id),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `NN.txt` for a 1-based round number: `score, distance, lat, lng, elapsed`.
    /// Whole numbers keep their trailing `.0`.
    pub fn record_round(
        &self,
        round_number: usize,
        entry: &RoundEntry,
    ) -> Result<(), ResultStoreError> {
        let line = format!(
            "{:?}, {:?}, {:?}, {:?}, {:?}\n",
            entry.result.score,
            entry.result.distance_km,
            entry.guess.lat,
            entry.guess.lng,
            entry.elapsed_secs,
        );
        self.write(&format!("{round_number:02}.txt"), line.as_bytes())
    }

    pub fn record_final(&self, summary: &FinalSummary) -> Result<(), ResultStoreError> {
        let times = summary
            .times
            .iter()
            .map(|time| format!("{time:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        let contents = format!("{summary}\n Times: {times}\n");
        self.write(FINAL_SUMMARY_FILE, contents.as_bytes())
    }

    pub fn save_progress(&self, progress: &SessionProgress) -> Result<(), ResultStoreError> {
        let contents =
            serde_json::to_vec(progress).map_err(|source| ResultStoreError::Serialize {
                path: self.dir.join(PROGRESS_FILE),
                source,
            })?;
        self.write(PROGRESS_FILE, &contents)
    }

    /// `None` if the session never saved any progress.
    pub fn load_progress(&self) -> Result<Option<SessionProgress>, ResultStoreError> {
        let path = self.dir.join(PROGRESS_FILE);
        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ResultStoreError::Read { path, source }),
        };
        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|source| ResultStoreError::Deserialize { path, source })
    }

    fn write(&self, file_name: &str, contents: &[u8]) -> Result<(), ResultStoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| ResultStoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents).map_err(|source| ResultStoreError::Write { path, source })
    }
}
