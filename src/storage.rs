//! # Collection files
//!
//! Flat-file persistence for form submissions.
//!
//! Each collection is a single JSON array on disk, rewritten wholesale on
//! every append. The datasets are tiny (a brochure site's contact inbox and
//! newsletter list), so a full read-modify-write per request is fine.
//!
//! ## Rules
//!
//! - Records are append-only. Nothing here mutates or deletes an existing
//!   record.
//! - A missing or unparsable file reads as the empty collection, so a bad
//!   deploy or a hand-edited file never takes the endpoint down.
//! - Every append happens under the collection's mutex, which serializes
//!   concurrent writers to the same file.

use std::{marker::PhantomData, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};
use tracing::warn;

use crate::error::AppError;

pub struct Collection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub async fn load(&self) -> Vec<T> {
        let _guard = self.lock.lock().await;

        self.read_records().await
    }

    pub async fn append(&self, record: T) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_records().await;
        records.push(record);

        self.write_records(&records).await
    }

    /// Appends unless a record matching `exists` is already present.
    /// Returns whether the record was inserted.
    pub async fn append_if_absent(
        &self,
        record: T,
        exists: impl Fn(&T) -> bool,
    ) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_records().await;
        if records.iter().any(exists) {
            return Ok(false);
        }

        records.push(record);
        self.write_records(&records).await?;

        Ok(true)
    }

    async fn read_records(&self) -> Vec<T> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Unreadable collection {}, starting fresh: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    async fn write_records(&self, records: &[T]) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, json).await?;

        Ok(())
    }
}
