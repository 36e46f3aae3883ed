//! SQLite-backed region source and rate store.
//!
//! Schema:
//! ```text
//! regions(slug TEXT PRIMARY KEY, name TEXT, parent_slug TEXT NULL)
//! ports(code TEXT PRIMARY KEY, name TEXT, parent_slug TEXT)
//! prices(orig_code TEXT, dest_code TEXT, day TEXT 'YYYY-MM-DD', price REAL NULL)
//! ```
//!
//! Every value reaches SQLite as a bound parameter. Code sets expand to a
//! list of numbered placeholders; nothing user-supplied is formatted into
//! the statement text.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

use crate::rates::types::{DailyRate, PriceRecord, RateQuery};
use crate::regions::types::{RegionRow, RegionSlug};
use crate::store::{RateStore, RegionSource, StoreError, StoreResult};

const DAY_FORMAT: &str = "%Y-%m-%d";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS regions (
        slug TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        parent_slug TEXT
    );
    CREATE TABLE IF NOT EXISTS ports (
        code TEXT PRIMARY KEY,
        name TEXT NOT NULL DEFAULT '',
        parent_slug TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS prices (
        orig_code TEXT NOT NULL,
        dest_code TEXT NOT NULL,
        day TEXT NOT NULL,
        price REAL
    );
    CREATE INDEX IF NOT EXISTS idx_prices_day ON prices(day);
    CREATE INDEX IF NOT EXISTS idx_ports_parent ON ports(parent_slug);
";

/// Store over a single SQLite connection.
///
/// Calls run on the blocking pool; the connection is serialized behind a mutex.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "SQLite database opened");
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create the tables and indexes if they are missing.
    pub async fn init_schema(&self) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
    }

    pub async fn insert_regions(&self, rows: Vec<RegionRow>) -> StoreResult<()> {
        self.with_conn(move |conn| {
            let mut stmt =
                conn.prepare("INSERT INTO regions (slug, name, parent_slug) VALUES (?1, ?2, ?3)")?;
            for row in &rows {
                stmt.execute(params![row.slug, row.name, row.parent_slug])?;
            }
            Ok(())
        })
        .await
    }

    pub async fn insert_port(&self, code: &str, name: &str, parent_slug: &str) -> StoreResult<()> {
        let (code, name, parent_slug) = (code.to_string(), name.to_string(), parent_slug.to_string());
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO ports (code, name, parent_slug) VALUES (?1, ?2, ?3)",
                params![code, name, parent_slug],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn insert_prices(&self, records: Vec<PriceRecord>) -> StoreResult<()> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "INSERT INTO prices (orig_code, dest_code, day, price) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in &records {
                stmt.execute(params![
                    record.orig_code,
                    record.dest_code,
                    record.day.format(DAY_FORMAT).to_string(),
                    record.price,
                ])?;
            }
            Ok(())
        })
        .await
    }

    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection mutex poisoned".into()))?;
            f(&*guard)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("blocking task failed: {e}")))?
    }
}

/// `?first, ?first+1, ...` for `count` parameters.
fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_day(raw: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DAY_FORMAT)
        .map_err(|e| StoreError::InvalidData(format!("day '{raw}': {e}")))
}

#[async_trait]
impl RegionSource for SqliteStore {
    async fn regions(&self) -> StoreResult<Vec<RegionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT slug, name, parent_slug FROM regions ORDER BY parent_slug ASC, rowid ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(RegionRow {
                    slug: row.get(0)?,
                    name: row.get(1)?,
                    parent_slug: row.get(2)?,
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await
    }

    async fn location_codes(&self) -> StoreResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT code FROM ports")?;
            let codes = stmt.query_map([], |row| row.get(0))?;
            Ok(codes.collect::<Result<Vec<String>, _>>()?)
        })
        .await
    }

    async fn location_codes_in(&self, slugs: &[RegionSlug]) -> StoreResult<Vec<String>> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }
        let slugs = slugs.to_vec();
        self.with_conn(move |conn| {
            let sql = format!(
                "SELECT code FROM ports WHERE parent_slug IN ({})",
                placeholders(1, slugs.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let codes = stmt.query_map(params_from_iter(slugs.iter()), |row| row.get(0))?;
            Ok(codes.collect::<Result<Vec<String>, _>>()?)
        })
        .await
    }
}

#[async_trait]
impl RateStore for SqliteStore {
    async fn average_prices(&self, query: &RateQuery) -> StoreResult<Vec<DailyRate>> {
        if query.origin.is_empty() || query.destination.is_empty() {
            return Ok(Vec::new());
        }

        let origin_count = query.origin.len();
        let dest_count = query.destination.len();
        let sql = format!(
            "SELECT day,
                    CASE WHEN COUNT(*) >= ?1 THEN ROUND(AVG(price), ?2) ELSE NULL END
             FROM prices
             WHERE price IS NOT NULL
               AND day >= ?3
               AND day <= ?4
               AND orig_code IN ({})
               AND dest_code IN ({})
             GROUP BY day
             ORDER BY day",
            placeholders(5, origin_count),
            placeholders(5 + origin_count, dest_count),
        );

        let mut bind_values: Vec<Value> = vec![
            Value::Integer(i64::from(query.min_records)),
            Value::Integer(i64::from(query.decimal_places)),
            Value::Text(query.date_from.format(DAY_FORMAT).to_string()),
            Value::Text(query.date_to.format(DAY_FORMAT).to_string()),
        ];
        bind_values.extend(query.origin.iter().cloned().map(Value::Text));
        bind_values.extend(query.destination.iter().cloned().map(Value::Text));

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(bind_values.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
            })?;

            let mut rates = Vec::new();
            for row in rows {
                let (day, average_price) = row?;
                rates.push(DailyRate {
                    day: parse_day(&day)?,
                    average_price,
                });
            }
            Ok(rates)
        })
        .await
    }
}
