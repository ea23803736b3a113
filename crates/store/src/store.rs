//! Sharded JSON storage of accepted replies.
//!
//! ## Directory structure
//!
//! Each record lives at `<data_dir>/<s1>/<s2>/<32hex-uuid>/reply.json` where
//! `s1`/`s2` are the first 4 hex characters of the record id. Two shard
//! levels keep any single directory small without an index.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ReplyStoreError, StoreResult};

const REPLY_FILE_NAME: &str = "reply.json";

const CSV_HEADERS: &[&str] = &[
    "ID",
    "Created At",
    "Classification",
    "Patient Messages",
    "AI Reply",
    "Feedback",
    "Feedback Comment",
];

/// One accepted reply plus any reviewer feedback attached later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub classification: String,
    pub patient_messages: String,
    pub ai_reply: String,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub feedback_comment: Option<String>,
}

/// File-backed reply persistence.
#[derive(Debug, Clone)]
pub struct ReplyStore {
    data_dir: PathBuf,
}

impl ReplyStore {
    /// Creates a store over the given data directory.
    ///
    /// The directory itself is created lazily on first insert; a missing
    /// directory just means there are no records yet.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Persists a newly accepted reply and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns a `ReplyStoreError` if the shard directory cannot be created
    /// or the record cannot be serialized or written.
    pub fn insert(
        &self,
        classification: &str,
        patient_messages: &str,
        ai_reply: &str,
    ) -> StoreResult<ReplyRecord> {
        let record = ReplyRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            classification: classification.to_string(),
            patient_messages: patient_messages.to_string(),
            ai_reply: ai_reply.to_string(),
            feedback: None,
            feedback_comment: None,
        };

        let record_dir = self.record_dir(&record.id);
        fs::create_dir_all(&record_dir).map_err(ReplyStoreError::StorageDirCreation)?;
        self.write_record(&record_dir, &record)?;

        tracing::info!(id = %record.id.simple(), "stored accepted reply");
        Ok(record)
    }

    /// Attaches reviewer feedback to an existing reply.
    ///
    /// The comment is only overwritten when one is provided, so a plain
    /// verdict update keeps an earlier comment.
    ///
    /// # Errors
    ///
    /// Returns `ReplyStoreError::NotFound` if no record exists for `id`, or
    /// an I/O/serialization error if the read-modify-write fails.
    pub fn set_feedback(
        &self,
        id: Uuid,
        feedback: &str,
        comment: Option<&str>,
    ) -> StoreResult<()> {
        let record_dir = self.record_dir(&id);
        let mut record = match self.read_record(&record_dir) {
            Some(Ok(record)) => record,
            Some(Err(e)) => return Err(e),
            None => return Err(ReplyStoreError::NotFound(id)),
        };

        record.feedback = Some(feedback.to_string());
        if let Some(comment) = comment {
            record.feedback_comment = Some(comment.to_string());
        }

        self.write_record(&record_dir, &record)
    }

    /// Lists all stored replies, newest first.
    ///
    /// Unreadable or unparsable entries are logged and skipped, mirroring how
    /// the record tree is treated everywhere: tolerant reads, strict writes.
    pub fn list_all(&self) -> Vec<ReplyRecord> {
        let mut records = Vec::new();

        let s1_iter = match fs::read_dir(&self.data_dir) {
            Ok(it) => it,
            Err(_) => return records,
        };
        for s1 in s1_iter.flatten() {
            let s1_path = s1.path();
            if !s1_path.is_dir() {
                continue;
            }

            let s2_iter = match fs::read_dir(&s1_path) {
                Ok(it) => it,
                Err(_) => continue,
            };
            for s2 in s2_iter.flatten() {
                let s2_path = s2.path();
                if !s2_path.is_dir() {
                    continue;
                }

                let id_iter = match fs::read_dir(&s2_path) {
                    Ok(it) => it,
                    Err(_) => continue,
                };
                for id_entry in id_iter.flatten() {
                    let id_path = id_entry.path();
                    if !id_path.is_dir() {
                        continue;
                    }

                    match self.read_record(&id_path) {
                        Some(Ok(record)) => records.push(record),
                        Some(Err(e)) => {
                            tracing::warn!("skipping reply at {}: {e}", id_path.display());
                        }
                        None => {}
                    }
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Renders every stored reply as CSV, newest first.
    ///
    /// Column set and quoting match the review spreadsheet the clinic already
    /// uses: free-text fields are double-quoted with embedded quotes doubled.
    pub fn export_csv(&self) -> String {
        let mut lines = vec![CSV_HEADERS.join(",")];

        for record in self.list_all() {
            let row = [
                record.id.simple().to_string(),
                record.created_at.to_rfc3339(),
                record.classification.clone(),
                csv_quote(&record.patient_messages),
                csv_quote(&record.ai_reply),
                record.feedback.clone().unwrap_or_default(),
                record.feedback_comment.clone().unwrap_or_default(),
            ];
            lines.push(row.join(","));
        }

        lines.join("\n")
    }

    fn record_dir(&self, id: &Uuid) -> PathBuf {
        let hex = id.simple().to_string();
        self.data_dir.join(&hex[0..2]).join(&hex[2..4]).join(&hex)
    }

    fn write_record(&self, record_dir: &Path, record: &ReplyRecord) -> StoreResult<()> {
        let json =
            serde_json::to_string_pretty(record).map_err(ReplyStoreError::Serialization)?;
        fs::write(record_dir.join(REPLY_FILE_NAME), json).map_err(ReplyStoreError::FileWrite)
    }

    /// Reads the record in `record_dir`; `None` when no reply file exists.
    fn read_record(&self, record_dir: &Path) -> Option<StoreResult<ReplyRecord>> {
        let path = record_dir.join(REPLY_FILE_NAME);
        if !path.is_file() {
            return None;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => return Some(Err(ReplyStoreError::FileRead(e))),
        };

        Some(serde_json::from_str(&contents).map_err(ReplyStoreError::Deserialization))
    }
}

/// Quotes a free-text CSV field, doubling embedded double quotes.
fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
