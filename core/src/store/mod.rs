//! SQLite persistence layer.
//!
//! RULE: only the store talks to the database. The calculators are pure;
//! callers hand finished records to the store, which enforces the
//! replace-by-period invariant (see `ledger.rs`).

mod ledger;
mod targets;

use crate::{error::EngineResult, team::TeamKind};
use rusqlite::{params, Connection};

pub struct BonusStore {
    conn: Connection,
}

impl BonusStore {
    /// Open (or create) the bonus database at `path`.
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Teams ──────────────────────────────────────────────────

    /// Insert the three organizational teams if they are not present yet.
    pub fn seed_teams(&self) -> EngineResult<()> {
        for team in TeamKind::ALL {
            self.conn.execute(
                "INSERT OR IGNORE INTO team (team, description) VALUES (?1, ?2)",
                params![team.as_str(), team.description()],
            )?;
        }
        Ok(())
    }
}
