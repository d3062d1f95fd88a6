use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// How an NPC relates to the played character.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Kinship {
    pub role: FamilyRole,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyRole {
    Mother,
    Father,
    Sibling,
    Partner,
    Child,
    Friend,
}

/// A family member's own health pool, 0..=100. Separate from the player's
/// health stat; reaching zero marks the member as deceased.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitality(pub i32);

/// Sub-scores that make up the bond with one family member, each 0..=100.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipStats {
    pub level: i32,
    pub trust: i32,
    pub respect: i32,
    pub communication: i32,
    pub conflict_resolution: i32,
}

impl Default for RelationshipStats {
    fn default() -> Self {
        Self {
            level: 50,
            trust: 50,
            respect: 50,
            communication: 50,
            conflict_resolution: 50,
        }
    }
}

/// Remembered interactions with one family member. Strength decays over time
/// proportionally to how strong the memory was.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionLog(pub Vec<Interaction>);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub description: String,
    pub strength: i32,
    pub age_recorded: u32,
}
