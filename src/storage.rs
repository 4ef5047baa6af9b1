// Persistence of finished match results

use chrono::{DateTime, TimeZone, Utc};
use log::info;
use rusqlite::{params, Connection};

use crate::error::StorageError;
use crate::result::{MatchResult, ResultType};

/// Default database file, next to the working directory
pub const DATABASE_NAME: &str = "chess_db.db3";

/// Somewhere finished match results are kept
pub trait ResultStore {
    /// Every stored result, ordered by id
    fn load_all(&mut self) -> Result<Vec<MatchResult>, StorageError>;

    /// Store a finished result under the next sequential id and return it
    fn insert(&mut self, result: &MatchResult) -> Result<MatchResult, StorageError>;
}

/// Results kept for the lifetime of the process only
#[derive(Default)]
pub struct MemoryStore {
    results: Vec<MatchResult>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl ResultStore for MemoryStore {
    fn load_all(&mut self) -> Result<Vec<MatchResult>, StorageError> {
        Ok(self.results.clone())
    }

    fn insert(&mut self, result: &MatchResult) -> Result<MatchResult, StorageError> {
        if !result.is_finished() {
            return Err(StorageError::Unfinished);
        }
        let next_id = self
            .results
            .iter()
            .filter_map(|r| r.id)
            .max()
            .map_or(0, |id| id + 1);

        let stored = MatchResult {
            id: Some(next_id),
            ..result.clone()
        };
        self.results.push(stored.clone());
        Ok(stored)
    }
}

/// Results kept in the `matchResults` table of a SQLite database
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let connection = Connection::open(path)?;
        info!("opened result database {}", path);
        Self::with_connection(connection)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self, StorageError> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS matchResults (
                 id integer PRIMARY KEY,
                 player1Name text NOT NULL,
                 player2Name text NOT NULL,
                 resultType integer NOT NULL,
                 startedAt integer NOT NULL,
                 finishedAt integer NOT NULL
             )",
            [],
        )?;
        Ok(SqliteStore { connection })
    }
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>, StorageError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(StorageError::InvalidTimestamp(millis))
}

impl ResultStore for SqliteStore {
    fn load_all(&mut self) -> Result<Vec<MatchResult>, StorageError> {
        let mut statement = self.connection.prepare(
            "SELECT id, player1Name, player2Name, resultType, startedAt, finishedAt
             FROM matchResults ORDER BY id",
        )?;

        let rows = statement.query_map([], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (id, player1_name, player2_name, code, started, finished) = row?;
            let result_type =
                ResultType::from_code(code).ok_or(StorageError::InvalidResultType(code))?;
            results.push(MatchResult {
                id: Some(id),
                player1_name,
                player2_name,
                result_type: Some(result_type),
                started_at: from_millis(started)?,
                ended_at: Some(from_millis(finished)?),
            });
        }
        Ok(results)
    }

    fn insert(&mut self, result: &MatchResult) -> Result<MatchResult, StorageError> {
        let (result_type, ended_at) = match (result.result_type, result.ended_at) {
            (Some(result_type), Some(ended_at)) => (result_type, ended_at),
            _ => return Err(StorageError::Unfinished),
        };

        let next_id: u32 = self.connection.query_row(
            "SELECT COALESCE(MAX(id) + 1, 0) FROM matchResults",
            [],
            |row| row.get(0),
        )?;

        self.connection.execute(
            "INSERT INTO matchResults VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                next_id,
                result.player1_name,
                result.player2_name,
                result_type.code(),
                result.started_at.timestamp_millis(),
                ended_at.timestamp_millis(),
            ],
        )?;
        info!("stored match result #{}", next_id);

        Ok(MatchResult {
            id: Some(next_id),
            ..result.clone()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(p1: &str, p2: &str, result_type: ResultType) -> MatchResult {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut result = MatchResult::start(p1, p2, start);
        result.finish(result_type, start + chrono::Duration::seconds(90));
        result
    }

    fn exercise(store: &mut dyn ResultStore) {
        assert!(store.load_all().unwrap().is_empty());

        let first = store
            .insert(&finished("Ana", "Bo", ResultType::FirstPlayerWin))
            .unwrap();
        let second = store
            .insert(&finished("Cy", "O'Neil", ResultType::SecondPlayerWin))
            .unwrap();
        assert_eq!(first.id, Some(0));
        assert_eq!(second.id, Some(1));

        let all = store.load_all().unwrap();
        assert_eq!(all, vec![first, second], "Stored records come back unchanged");
    }

    #[test]
    fn test_memory_store() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn test_sqlite_store() {
        exercise(&mut SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_unfinished_results_are_refused() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let result = MatchResult::start("Ana", "Bo", start);

        let mut memory = MemoryStore::new();
        assert!(matches!(memory.insert(&result), Err(StorageError::Unfinished)));

        let mut sqlite = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(sqlite.insert(&result), Err(StorageError::Unfinished)));
        assert!(sqlite.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_rejects_bad_result_type() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .connection
            .execute(
                "INSERT INTO matchResults VALUES (0, 'Ana', 'Bo', 9, 0, 0)",
                [],
            )
            .unwrap();

        assert!(matches!(
            store.load_all(),
            Err(StorageError::InvalidResultType(9))
        ));
    }
}
