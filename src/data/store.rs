use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::AppError;
use crate::models::record::ExpenseRecord;

const RECORD_FILE: &str = "expense_record.json";
const IMAGE_FILE: &str = "bill_image.jpg";

/// Single-slot mailbox shared between the producer and consumer processes.
///
/// Both slots (result record, input image) live as plain files under one
/// directory reachable from either process. There is no cross-process lock;
/// the record is written to a temp file and renamed into place so a reader
/// always sees a complete snapshot or nothing. One in-flight scan at a time:
/// a second write silently overwrites the first.
#[derive(Debug, Clone)]
pub struct SharedStore {
    dir: PathBuf,
}

impl SharedStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self) -> PathBuf {
        self.dir.join(RECORD_FILE)
    }

    fn image_path(&self) -> PathBuf {
        self.dir.join(IMAGE_FILE)
    }

    pub fn save_record(&self, record: &ExpenseRecord) -> Result<(), AppError> {
        let json = serde_json::to_vec(record)?;
        let tmp = self.dir.join(format!("{RECORD_FILE}.tmp"));
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, self.record_path())?;
        Ok(())
    }

    /// Reads the current record. Returns `None` when the slot is empty or the
    /// file is unreadable mid-race; the poller treats both as "not yet".
    pub fn load_record(&self) -> Option<ExpenseRecord> {
        let bytes = match fs::read(self.record_path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("failed to read shared record: {e}");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("failed to decode shared record: {e}");
                None
            }
        }
    }

    /// Best-effort delete; a missing file is fine (the other side may have
    /// cleared it already).
    pub fn clear_record(&self) {
        if let Err(e) = fs::remove_file(self.record_path()) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to clear shared record: {e}");
            }
        }
    }

    pub fn save_image(&self, bytes: &[u8]) -> Result<(), AppError> {
        fs::write(self.image_path(), bytes)?;
        Ok(())
    }

    pub fn load_image(&self) -> Option<Vec<u8>> {
        match fs::read(self.image_path()) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("failed to read shared image: {e}");
                None
            }
        }
    }

    pub fn clear_image(&self) {
        if let Err(e) = fs::remove_file(self.image_path()) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to clear shared image: {e}");
            }
        }
    }
}
