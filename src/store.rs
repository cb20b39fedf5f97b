// JSON-file persistence for the whole database.
//
// Every write rewrites the document through a temp file and an atomic rename.
// Read-modify-write cycles are serialized by an async mutex.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::Db;

pub const DEFAULT_DB_PATH: &str = "data/db.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access database file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid database contents: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> Result<Db, StoreError> {
        let _guard = self.lock.lock().await;
        load_db(&self.path)
    }

    /// Load the database, apply `f`, and persist the result if `f` succeeds.
    pub async fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Db) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut db = load_db(&self.path)?;
        let out = f(&mut db)?;
        save_db(&self.path, &db)?;
        Ok(out)
    }
}

// A missing file is an empty database
pub fn load_db(path: &Path) -> Result<Db, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Db::default()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&text)?)
}

pub fn save_db(path: &Path, db: &Db) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("json.tmp");
    let text = serde_json::to_string_pretty(db)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
