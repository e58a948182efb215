use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

type Result<T> = std::result::Result<T, CheckpointError>;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("failed to access checkpoint file")]
    IoError(#[from] std::io::Error),
    #[error("failed to (de)serialize checkpoint JSON")]
    JsonError(#[from] serde_json::Error),
}

/// High-water-mark timestamps of mirrored submissions, keyed by problem id.
///
/// Serialized as a flat JSON object such as `{"abc100_a":1000}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checkpoint {
    timestamps: BTreeMap<String, i64>,
}

impl Checkpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, problem_id: &str) -> Option<i64> {
        self.timestamps.get(problem_id).copied()
    }

    /// Overwrites the recorded timestamp for the problem.
    pub fn record(&mut self, problem_id: &str, epoch_second: i64) {
        self.timestamps.insert(problem_id.to_string(), epoch_second);
    }

    /// Records the timestamp only if it is newer than the current one.
    /// Returns whether the checkpoint changed.
    pub fn advance(&mut self, problem_id: &str, epoch_second: i64) -> bool {
        match self.timestamps.get_mut(problem_id) {
            Some(current) if *current >= epoch_second => false,
            Some(current) => {
                *current = epoch_second;
                true
            }
            None => {
                self.timestamps.insert(problem_id.to_string(), epoch_second);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &i64)> {
        self.timestamps.iter()
    }
}

impl FromIterator<(String, i64)> for Checkpoint {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            timestamps: iter.into_iter().collect(),
        }
    }
}

/// File-backed storage of a [`Checkpoint`].
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_owned(),
        }
    }

    /// Loads the checkpoint. An empty checkpoint file is created when none exists yet.
    pub fn load(&self) -> Result<Checkpoint> {
        if !self.path.exists() {
            tracing::info!(
                "checkpoint file {} not found, create an empty one",
                self.path.display()
            );
            let checkpoint = Checkpoint::new();
            self.save(&checkpoint)?;
            return Ok(checkpoint);
        }

        let file = File::open(&self.path)?;
        let checkpoint: Checkpoint = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(
            "{} problems loaded from checkpoint {}",
            checkpoint.len(),
            self.path.display()
        );

        Ok(checkpoint)
    }

    /// Replaces the checkpoint file as a whole.
    ///
    /// The content is written to a sibling temporary file first and then renamed over the
    /// target, so a crash never leaves a half-written checkpoint behind.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut temporary = self.path.clone().into_os_string();
        temporary.push(".tmp");
        let temporary = PathBuf::from(temporary);

        {
            let file = File::create(&temporary)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, checkpoint)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&temporary, &self.path)?;

        tracing::info!(
            "checkpoint with {} problems saved to {}",
            checkpoint.len(),
            self.path.display()
        );
        Ok(())
    }
}
