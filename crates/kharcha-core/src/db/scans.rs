//! Receipt-scan history operations
//!
//! Each extraction run over recognized text is recorded with a SHA-256 hash
//! of that text. Re-scanning identical text is detected by hash and served
//! from the stored suggestion.

use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewReceiptScan, ReceiptScan};

/// Hex-encoded SHA-256 of recognized receipt text
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

impl Database {
    /// Record a scan, replacing any previous scan of the same text
    pub fn insert_scan(&self, user_id: &str, scan: &NewReceiptScan) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO receipt_scans (user_id, content_hash, amount, confidence, category)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(user_id, content_hash) DO UPDATE SET
                 amount = excluded.amount,
                 confidence = excluded.confidence,
                 category = excluded.category",
            params![
                user_id,
                scan.content_hash,
                scan.amount,
                scan.confidence as i64,
                scan.category,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a user's scan by content hash (for dedup)
    pub fn get_scan_by_hash(&self, user_id: &str, hash: &str) -> Result<Option<ReceiptScan>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, content_hash, amount, confidence, category, created_at
             FROM receipt_scans WHERE user_id = ? AND content_hash = ?",
        )?;

        let scan = stmt
            .query_row(params![user_id, hash], |row| Self::row_to_scan(row))
            .optional()?;

        Ok(scan)
    }

    /// List a user's scans, newest first
    pub fn list_scans(&self, user_id: &str, limit: i64) -> Result<Vec<ReceiptScan>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, content_hash, amount, confidence, category, created_at
             FROM receipt_scans WHERE user_id = ?
             ORDER BY created_at DESC, id DESC LIMIT ?",
        )?;

        let scans = stmt
            .query_map(params![user_id, limit], |row| Self::row_to_scan(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(scans)
    }

    fn row_to_scan(row: &rusqlite::Row) -> rusqlite::Result<ReceiptScan> {
        let created_at_str: String = row.get(6)?;
        let confidence: i64 = row.get(4)?;

        Ok(ReceiptScan {
            id: row.get(0)?,
            user_id: row.get(1)?,
            content_hash: row.get(2)?,
            amount: row.get(3)?,
            confidence: confidence.clamp(0, 100) as u8,
            category: row.get(5)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
