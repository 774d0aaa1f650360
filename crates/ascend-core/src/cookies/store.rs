use super::types::CookieRecord;
use crate::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Cookie jar persisted between runs as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct CookieStore {
    path: PathBuf,
}

impl CookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read persisted cookies in file order, or `None` when no file exists yet
    pub fn load(&self) -> Result<Option<Vec<CookieRecord>>> {
        if !self.path.exists() {
            tracing::debug!("No cookie file at: {}", self.path.display());
            return Ok(None);
        }

        tracing::debug!("Reading cookies from: {}", self.path.display());

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let cookies: Vec<CookieRecord> = serde_json::from_reader(reader)?;

        tracing::info!("Loaded {} cookies from {}", cookies.len(), self.path.display());

        Ok(Some(cookies))
    }

    /// Overwrite the cookie file with the given snapshot
    pub fn save(&self, cookies: &[CookieRecord]) -> Result<()> {
        tracing::debug!("Writing cookies to: {}", self.path.display());

        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, cookies)?;

        tracing::info!("Saved {} cookies to {}", cookies.len(), self.path.display());

        Ok(())
    }
}
