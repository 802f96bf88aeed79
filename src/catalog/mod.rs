use crate::ndjson::{self, NdjsonError};
use error::CatalogError;
use models::RoundLocation;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

pub mod curation;
pub mod error;
pub mod models;
#[cfg(test)]
mod tests;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    rounds: Vec<RoundLocation>,
}

impl Catalog {
    pub fn new(rounds: Vec<RoundLocation>) -> Self {
        Self { rounds }
    }

    /// Reads one [`RoundLocation`] per line. An empty catalog is an error since no game can be
    /// played from it.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let rounds: Vec<RoundLocation> = ndjson::read(path)?;
        if rounds.is_empty() {
            return Err(CatalogError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::info!(
            rounds_count = rounds.len(),
            path = %path.display(),
            "Loaded round catalog.",
        );
        Ok(Self::new(rounds))
    }

    pub fn write(&self, path: &Path) -> Result<(), NdjsonError> {
        ndjson::write(path, &self.rounds)
    }

    pub fn rounds(&self) -> &[RoundLocation] {
        &self.rounds
    }

    pub fn rounds_mut(&mut self) -> &mut [RoundLocation] {
        &mut self.rounds
    }

    pub fn into_rounds(self) -> Vec<RoundLocation> {
        self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Random selection of at most `count` rounds, in random order.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Self {
        let rounds = self
            .rounds
            .choose_multiple(rng, count)
            .cloned()
            .collect::<Vec<_>>();
        Self::new(rounds)
    }

    /// Drops rounds whose photo is missing from `image_folder`. Returns how many were dropped.
    pub fn retain_existing_images(&mut self, image_folder: &Path) -> usize {
        let before = self.rounds.len();
        self.rounds
            .retain(|round| image_folder.join(round.image_file_name()).is_file());
        let dropped = before - self.rounds.len();
        if dropped > 0 {
            tracing::warn!(
                dropped,
                image_folder = %image_folder.display(),
                "Dropped catalog rounds without an image file.",
            );
        }
        dropped
    }
}
