use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::stats::CoreStats;
use crate::core::rng::SimRng;

pub const DEFAULT_MAX_AGE: u32 = 100;

/// Tunables for a playthrough.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_age: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// Alive-or-over state machine, transitioned once per age-up.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub enum GameStatus {
    Alive,
    Over { reason: String },
}

impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::Alive
    }
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Over { .. })
    }
}

/// Small per-year drift driven by age alone. Deltas stay within ±3.
pub fn natural_aging(age: u32, stats: &mut CoreStats, rng: &mut SimRng) -> Vec<String> {
    let mut lines = Vec::new();

    let health_delta = match age {
        0..=12 => 0,
        13..=25 => {
            if rng.chance(30) {
                1
            } else {
                0
            }
        }
        26..=60 => -rng.range_i32(0, 1),
        _ => -rng.range_i32(1, 3),
    };
    if health_delta != 0 {
        stats.adjust_health(health_delta);
        if health_delta < -1 {
            lines.push("The years are starting to weigh on you.".to_string());
        }
    }

    if age > 30 {
        let looks_delta = rng.range_i32(0, 1);
        if looks_delta > 0 {
            stats.adjust_looks(-looks_delta);
        }
    } else if age >= 13 && rng.chance(25) {
        stats.adjust_looks(1);
    }

    if age >= 18 && rng.chance(30) {
        stats.adjust_smarts(1);
    } else if age > 75 && rng.chance(20) {
        stats.adjust_smarts(-1);
    }

    lines
}

/// Returns the game-over reason once a terminal condition is met.
pub fn check_termination(health: i32, age: u32, max_age: u32) -> Option<String> {
    if health <= 0 {
        return Some("Your health gave out.".to_string());
    }
    if age >= max_age {
        return Some(format!("You lived to the ripe old age of {}.", age));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depleted_health_terminates() {
        let reason = check_termination(0, 40, DEFAULT_MAX_AGE).expect("terminal");
        assert!(!reason.is_empty());
    }

    #[test]
    fn max_age_terminates() {
        assert!(check_termination(80, 100, DEFAULT_MAX_AGE).is_some());
        assert!(check_termination(80, 99, DEFAULT_MAX_AGE).is_none());
    }

    #[test]
    fn aging_deltas_stay_small() {
        let mut rng = SimRng::new(11);
        for age in [5u32, 20, 45, 70, 90] {
            let mut stats = CoreStats {
                health: 50,
                happiness: 50,
                smarts: 50,
                looks: 50,
            };
            natural_aging(age, &mut stats, &mut rng);
            assert!((stats.health - 50).abs() <= 3);
            assert!((stats.looks - 50).abs() <= 1);
            assert!((stats.smarts - 50).abs() <= 1);
        }
    }

    #[test]
    fn childhood_health_is_flat() {
        let mut rng = SimRng::new(8);
        let mut stats = CoreStats {
            health: 60,
            happiness: 50,
            smarts: 50,
            looks: 50,
        };
        for _ in 0..50 {
            natural_aging(6, &mut stats, &mut rng);
        }
        assert_eq!(stats.health, 60);
    }
}
