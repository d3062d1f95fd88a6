use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Who a character is on paper.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Age in whole years. Only ever incremented.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age(pub u32);

/// Stable identifier for addressing entities externally.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Marker component for the played character to distinguish them from family NPCs.
#[derive(Component, Debug)]
pub struct Player;
