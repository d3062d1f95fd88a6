use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

pub const LIFE_LOG_CAPACITY: usize = 10;

/// Rolling journal of the last few years, keyed by age. A later entry for the
/// same age amends the existing record instead of duplicating it.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifeLog {
    entries: Vec<LifeLogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeLogEntry {
    pub age: u32,
    pub lines: Vec<String>,
}

impl LifeLog {
    pub fn record(&mut self, age: u32, line: impl Into<String>) {
        let line = line.into();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.age == age) {
            entry.lines.push(line);
            return;
        }
        self.entries.push(LifeLogEntry {
            age,
            lines: vec![line],
        });
        if self.entries.len() > LIFE_LOG_CAPACITY {
            let overflow = self.entries.len() - LIFE_LOG_CAPACITY;
            self.entries.drain(..overflow);
        }
    }

    pub fn entries(&self) -> &[LifeLogEntry] {
        &self.entries
    }
}

/// Scratch log for the current year, cleared at the start of each age-up and
/// folded into [`LifeLog`] afterwards.
#[derive(Resource, Debug, Default)]
pub struct YearLog(pub Vec<String>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_age_amends_instead_of_duplicating() {
        let mut log = LifeLog::default();
        log.record(7, "started school");
        log.record(7, "joined the chess club");
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries()[0].lines.len(), 2);
    }

    #[test]
    fn capacity_is_bounded_to_the_last_ten_ages() {
        let mut log = LifeLog::default();
        for age in 0..25 {
            log.record(age, format!("year {}", age));
        }
        assert_eq!(log.entries().len(), LIFE_LOG_CAPACITY);
        assert_eq!(log.entries()[0].age, 15);
        assert_eq!(log.entries().last().map(|e| e.age), Some(24));
    }
}
