use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::components::identity::Gender;
use crate::core::rng::SimRng;

const DEFAULT_NAMES_DB_PATH: &str = "./assets/names/names.db";
const MAX_ATTEMPTS: u32 = 6;

#[derive(Debug)]
pub enum NameDbError {
    Db(rusqlite::Error),
    NotFound(String),
}

impl std::fmt::Display for NameDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameDbError::Db(err) => write!(f, "database error: {}", err),
            NameDbError::NotFound(table) => write!(f, "no names available in {}", table),
        }
    }
}

impl std::error::Error for NameDbError {}

/// Name provider for character creation. Backed by the names DB when present,
/// otherwise a small built-in list so creation always succeeds.
pub enum NameSource {
    Db(NameDb),
    Builtin,
}

impl NameSource {
    pub fn open_default() -> Self {
        let path = Path::new(DEFAULT_NAMES_DB_PATH);
        if !path.exists() {
            return NameSource::Builtin;
        }
        match NameDb::open(path) {
            Ok(db) => NameSource::Db(db),
            Err(err) => {
                eprintln!("Failed to open names DB: {}; using built-in names", err);
                NameSource::Builtin
            }
        }
    }

    pub fn given_name(&self, rng: &mut SimRng, gender: Gender) -> String {
        if let NameSource::Db(db) = self {
            match db.random_given(rng, gender) {
                Ok(name) => return name,
                Err(err) => eprintln!("Name lookup failed: {}; using built-in names", err),
            }
        }
        builtin_given(rng, gender)
    }

    pub fn family_name(&self, rng: &mut SimRng) -> String {
        if let NameSource::Db(db) = self {
            match db.random_family(rng) {
                Ok(name) => return name,
                Err(err) => eprintln!("Name lookup failed: {}; using built-in names", err),
            }
        }
        builtin_family(rng)
    }
}

/// Read-only names database with `given_names(name, gender)` and
/// `family_names(name)` tables, sampled by rowid.
pub struct NameDb {
    conn: Connection,
    max_given_rowid: i64,
    max_family_rowid: i64,
}

impl NameDb {
    pub fn open(path: &Path) -> Result<Self, NameDbError> {
        let conn = Connection::open(path).map_err(NameDbError::Db)?;
        conn.execute("PRAGMA query_only = ON;", [])
            .map_err(NameDbError::Db)?;

        let max_given_rowid: i64 = conn
            .query_row(
                "SELECT COALESCE(MAX(rowid), 0) FROM given_names",
                [],
                |row| row.get(0),
            )
            .map_err(NameDbError::Db)?;
        let max_family_rowid: i64 = conn
            .query_row(
                "SELECT COALESCE(MAX(rowid), 0) FROM family_names",
                [],
                |row| row.get(0),
            )
            .map_err(NameDbError::Db)?;

        Ok(Self {
            conn,
            max_given_rowid,
            max_family_rowid,
        })
    }

    pub fn random_given(&self, rng: &mut SimRng, gender: Gender) -> Result<String, NameDbError> {
        if self.max_given_rowid <= 0 {
            return Err(NameDbError::NotFound("given_names".to_string()));
        }
        let code = match gender {
            Gender::Male => "M",
            Gender::Female => "F",
        };
        for _ in 0..MAX_ATTEMPTS {
            let rowid = rng.roll(self.max_given_rowid as u64) as i64 + 1;
            let name: Option<String> = self
                .conn
                .query_row(
                    "SELECT name FROM given_names WHERE rowid >= ?1 AND gender = ?2 \
                     ORDER BY rowid LIMIT 1",
                    (rowid, code),
                    |row| row.get(0),
                )
                .optional()
                .map_err(NameDbError::Db)?;
            if let Some(name) = name {
                return Ok(name);
            }
        }
        self.conn
            .query_row(
                "SELECT name FROM given_names WHERE gender = ?1 ORDER BY rowid LIMIT 1",
                [code],
                |row| row.get(0),
            )
            .optional()
            .map_err(NameDbError::Db)?
            .ok_or_else(|| NameDbError::NotFound("given_names".to_string()))
    }

    pub fn random_family(&self, rng: &mut SimRng) -> Result<String, NameDbError> {
        if self.max_family_rowid <= 0 {
            return Err(NameDbError::NotFound("family_names".to_string()));
        }
        for _ in 0..MAX_ATTEMPTS {
            let rowid = rng.roll(self.max_family_rowid as u64) as i64 + 1;
            let name: Option<String> = self
                .conn
                .query_row(
                    "SELECT name FROM family_names WHERE rowid >= ?1 ORDER BY rowid LIMIT 1",
                    [rowid],
                    |row| row.get(0),
                )
                .optional()
                .map_err(NameDbError::Db)?;
            if let Some(name) = name {
                return Ok(name);
            }
        }
        Err(NameDbError::NotFound("family_names".to_string()))
    }
}

const BUILTIN_MALE: &[&str] = &[
    "James", "Oliver", "Marcus", "Theo", "Daniel", "Victor", "Samuel", "Elias", "Hugo", "Adrian",
];
const BUILTIN_FEMALE: &[&str] = &[
    "Clara", "Maya", "Sofia", "Irene", "Nadia", "Ruth", "Elena", "Greta", "Alice", "Vera",
];
const BUILTIN_FAMILY: &[&str] = &[
    "Hale", "Moreno", "Lindqvist", "Okafor", "Brandt", "Suzuki", "Carver", "Dias", "Novak",
    "Whitfield",
];

fn builtin_given(rng: &mut SimRng, gender: Gender) -> String {
    let pool = match gender {
        Gender::Male => BUILTIN_MALE,
        Gender::Female => BUILTIN_FEMALE,
    };
    pool[rng.roll(pool.len() as u64) as usize].to_string()
}

fn builtin_family(rng: &mut SimRng) -> String {
    BUILTIN_FAMILY[rng.roll(BUILTIN_FAMILY.len() as u64) as usize].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_deterministic_per_seed() {
        let source = NameSource::Builtin;
        let mut a = SimRng::new(12);
        let mut b = SimRng::new(12);
        assert_eq!(
            source.given_name(&mut a, Gender::Female),
            source.given_name(&mut b, Gender::Female)
        );
        assert_eq!(source.family_name(&mut a), source.family_name(&mut b));
    }
}
