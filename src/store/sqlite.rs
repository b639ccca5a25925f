use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::Candidate;
use crate::error::{Result, SearchError};
use crate::store::{BranchCount, CandidateStore, DirectoryFilter, StoreStats};

/// SQLite-backed alumni store
///
/// Schema:
/// ```sql
/// CREATE TABLE alumni (
///     alumni_id INTEGER PRIMARY KEY,
///     name TEXT,
///     branch TEXT,
///     graduation_year INTEGER,
///     company TEXT,
///     field TEXT,
///     verified INTEGER NOT NULL DEFAULT 0
/// );
/// CREATE TABLE alumni_location (
///     alumni_id INTEGER PRIMARY KEY REFERENCES alumni(alumni_id) ON DELETE CASCADE,
///     city TEXT,
///     state TEXT,
///     country TEXT
/// );
/// ```
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

const SELECT_CANDIDATES: &str = "
    SELECT a.alumni_id, a.name, a.branch, a.graduation_year, a.company, a.field,
           a.verified, l.city, l.state, l.country
    FROM alumni a
    LEFT JOIN alumni_location l ON a.alumni_id = l.alumni_id
    WHERE a.verified = 1";

const ORDER_CANDIDATES: &str = " ORDER BY a.graduation_year DESC, a.name ASC";

impl SqliteStore {
    /// Open (or create) the store. `":memory:"` gives a private in-memory db.
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS alumni (
                alumni_id INTEGER PRIMARY KEY,
                name TEXT,
                branch TEXT,
                graduation_year INTEGER,
                company TEXT,
                field TEXT,
                verified INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS alumni_location (
                alumni_id INTEGER PRIMARY KEY REFERENCES alumni(alumni_id) ON DELETE CASCADE,
                city TEXT,
                state TEXT,
                country TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_alumni_verified
                ON alumni(verified, graduation_year);",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SearchError::Store("connection mutex poisoned".to_string()))
    }

    fn query_candidates(&self, sql: &str, values: Vec<Value>) -> Result<Vec<Candidate>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(values), row_to_candidate)?;

        let candidates = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(candidates)
    }
}

fn row_to_candidate(row: &Row<'_>) -> rusqlite::Result<Candidate> {
    Ok(Candidate {
        id: row.get(0)?,
        name: row.get(1)?,
        branch: row.get(2)?,
        graduation_year: row.get(3)?,
        company: row.get(4)?,
        field: row.get(5)?,
        verified: Some(row.get(6)?),
        city: row.get(7)?,
        state: row.get(8)?,
        country: row.get(9)?,
    })
}

/// `%text%` with LIKE wildcards in `text` escaped by `\`
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Treat blank filter values as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl CandidateStore for SqliteStore {
    async fn verified_candidates(&self) -> Result<Vec<Candidate>> {
        let sql = format!("{}{}", SELECT_CANDIDATES, ORDER_CANDIDATES);
        self.query_candidates(&sql, Vec::new())
    }

    async fn directory(&self, filter: &DirectoryFilter) -> Result<Vec<Candidate>> {
        let mut sql = SELECT_CANDIDATES.to_string();
        let mut values = Vec::new();

        if let Some(branch) = present(&filter.branch) {
            sql.push_str(" AND a.branch = ?");
            values.push(Value::Text(branch.to_string()));
        }
        if let Some(field) = present(&filter.field) {
            sql.push_str(" AND a.field LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(field)));
        }
        if let Some(city) = present(&filter.city) {
            sql.push_str(" AND l.city LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(city)));
        }
        if let Some(year) = filter.graduation_year {
            sql.push_str(" AND a.graduation_year = ?");
            values.push(Value::Integer(year as i64));
        }

        sql.push_str(ORDER_CANDIDATES);
        self.query_candidates(&sql, values)
    }

    async fn upsert(&self, candidate: &Candidate) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO alumni (alumni_id, name, branch, graduation_year, company, field, verified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(alumni_id) DO UPDATE SET
                name = excluded.name,
                branch = excluded.branch,
                graduation_year = excluded.graduation_year,
                company = excluded.company,
                field = excluded.field,
                verified = excluded.verified",
            params![
                candidate.id,
                candidate.name,
                candidate.branch,
                candidate.graduation_year,
                candidate.company,
                candidate.field,
                candidate.verified.unwrap_or(false),
            ],
        )?;

        if candidate.location().is_some() {
            tx.execute(
                "INSERT OR REPLACE INTO alumni_location (alumni_id, city, state, country)
                 VALUES (?1, ?2, ?3, ?4)",
                params![candidate.id, candidate.city, candidate.state, candidate.country],
            )?;
        } else {
            tx.execute(
                "DELETE FROM alumni_location WHERE alumni_id = ?",
                params![candidate.id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    async fn set_verified(&self, id: i64, verified: bool) -> Result<bool> {
        let conn = self.lock()?;

        let changed = conn.execute(
            "UPDATE alumni SET verified = ?1 WHERE alumni_id = ?2",
            params![verified, id],
        )?;

        Ok(changed > 0)
    }

    async fn stats(&self) -> Result<StoreStats> {
        let conn = self.lock()?;

        let (total, verified): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(verified), 0) FROM alumni",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut stmt = conn.prepare(
            "SELECT branch, COUNT(*) FROM alumni
             WHERE verified = 1 AND branch IS NOT NULL AND branch <> ''
             GROUP BY branch
             ORDER BY COUNT(*) DESC, branch ASC",
        )?;
        let by_branch = stmt
            .query_map([], |row| {
                Ok(BranchCount {
                    branch: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(StoreStats {
            total: total as u64,
            verified: verified as u64,
            pending: (total - verified) as u64,
            by_branch,
        })
    }
}
