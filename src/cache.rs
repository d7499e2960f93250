use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::PathBuf;

use crate::api::DocumentSummary;
use crate::model::job::{AnalysisRequest, AnalysisResult};

/// A completed analysis as stored locally
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub analysis_id: String,
    pub document_id: String,
    pub num_topics: u32,
    pub max_iterations: u32,
    pub completed_at: DateTime<Utc>,
    pub result: AnalysisResult,
}

pub struct CacheDb {
    conn: Connection,
}

impl CacheDb {
    pub fn new() -> Result<Self> {
        let cache_dir = Self::get_cache_dir();
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache dir {}", cache_dir.display()))?;

        let conn = Connection::open(cache_dir.join("cache.db"))?;
        Self::from_connection(conn)
    }

    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let mut cache = CacheDb { conn };
        cache.init_schema()?;
        Ok(cache)
    }

    fn get_cache_dir() -> PathBuf {
        match dirs::cache_dir() {
            Some(cache_dir) => cache_dir.join("sdgdash"),
            None => std::env::temp_dir().join("sdgdash-cache"),
        }
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS documents (
                position INTEGER NOT NULL,
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS analysis_history (
                analysis_id TEXT PRIMARY KEY,
                document_id TEXT NOT NULL,
                num_topics INTEGER NOT NULL,
                iterations INTEGER NOT NULL,
                completed_at TEXT NOT NULL,
                result_json TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_history_document
                ON analysis_history (document_id, completed_at);
            ",
        )?;

        Ok(())
    }

    // Document list, replaced wholesale on every successful fetch
    pub fn save_documents(&self, documents: &[DocumentSummary]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM documents", [])?;

        {
            let mut stmt =
                tx.prepare("INSERT OR REPLACE INTO documents (position, id, name) VALUES (?1, ?2, ?3)")?;
            for (position, doc) in documents.iter().enumerate() {
                stmt.execute(params![position as i64, &doc.id, &doc.name])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    pub fn get_documents(&self) -> Result<Vec<DocumentSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM documents ORDER BY position")?;

        let documents = stmt
            .query_map([], |row| {
                Ok(DocumentSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(documents)
    }

    // Analysis history
    pub fn save_completed_analysis(
        &self,
        analysis_id: &str,
        request: &AnalysisRequest,
        result: &AnalysisResult,
        completed_at: DateTime<Utc>,
    ) -> Result<()> {
        let result_json = serde_json::to_string(result).context("Failed to encode analysis result")?;

        self.conn.execute(
            "INSERT OR REPLACE INTO analysis_history
             (analysis_id, document_id, num_topics, iterations, completed_at, result_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                analysis_id,
                &request.document_id,
                request.num_topics,
                request.max_iterations,
                completed_at.to_rfc3339(),
                result_json,
            ],
        )?;

        Ok(())
    }

    pub fn latest_for_document(&self, document_id: &str) -> Result<Option<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT analysis_id, document_id, num_topics, iterations, completed_at, result_json
             FROM analysis_history WHERE document_id = ?1
             ORDER BY completed_at DESC LIMIT 1",
        )?;

        let row = stmt.query_row(params![document_id], Self::read_row);

        match row {
            Ok(raw) => Ok(Some(raw.into_entry()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn recent_history(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT analysis_id, document_id, num_topics, iterations, completed_at, result_json
             FROM analysis_history ORDER BY completed_at DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit as i64], Self::read_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(RawHistoryRow::into_entry).collect()
    }

    fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawHistoryRow> {
        Ok(RawHistoryRow {
            analysis_id: row.get(0)?,
            document_id: row.get(1)?,
            num_topics: row.get(2)?,
            max_iterations: row.get(3)?,
            completed_at: row.get(4)?,
            result_json: row.get(5)?,
        })
    }
}

struct RawHistoryRow {
    analysis_id: String,
    document_id: String,
    num_topics: u32,
    max_iterations: u32,
    completed_at: String,
    result_json: String,
}

impl RawHistoryRow {
    fn into_entry(self) -> Result<HistoryEntry> {
        let completed_at = DateTime::parse_from_rfc3339(&self.completed_at)
            .with_context(|| format!("Bad timestamp in history: {}", self.completed_at))?
            .with_timezone(&Utc);
        let result = serde_json::from_str(&self.result_json)
            .with_context(|| format!("Bad result JSON for analysis {}", self.analysis_id))?;

        Ok(HistoryEntry {
            analysis_id: self.analysis_id,
            document_id: self.document_id,
            num_topics: self.num_topics,
            max_iterations: self.max_iterations,
            completed_at,
            result,
        })
    }
}
