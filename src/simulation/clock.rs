use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Global resource tracking the calendar. One tick = one year of life.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    pub year: i32,
    pub tick: u64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            year: 2000,
            tick: 0,
        }
    }
}

impl SimClock {
    pub fn advance(&mut self) {
        self.tick += 1;
        self.year += 1;
    }
}
