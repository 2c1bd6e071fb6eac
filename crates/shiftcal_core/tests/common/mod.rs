#![allow(dead_code)]

use shiftcal_core::db::open_db_in_memory;
use shiftcal_core::{
    CalendarStore, IsoDate, KeyValueStore, RepoError, RepoResult, SliceGateway,
    SqliteKeyValueStore,
};
use std::collections::HashMap;

pub fn date(value: &str) -> IsoDate {
    IsoDate::parse(value).unwrap()
}

pub fn sqlite_gateway() -> SliceGateway<SqliteKeyValueStore> {
    let conn = open_db_in_memory().unwrap();
    SliceGateway::new(SqliteKeyValueStore::try_new(conn).unwrap())
}

pub fn sqlite_store(today: &str) -> CalendarStore<SqliteKeyValueStore> {
    CalendarStore::hydrate(sqlite_gateway(), date(today))
}

/// In-memory key-value store whose writes can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub values: HashMap<String, String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub writes: Vec<String>,
}

impl FlakyStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            values: entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            ..Self::default()
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        if self.fail_reads {
            return Err(RepoError::Unavailable("read refused".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes {
            return Err(RepoError::Unavailable("quota exceeded".to_string()));
        }
        self.writes.push(key.to_string());
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
