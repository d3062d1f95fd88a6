use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Chronic conditions attached to the character by the annual health check.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionList(pub Vec<ChronicCondition>);

impl ConditionList {
    pub fn has(&self, kind: ConditionKind) -> bool {
        self.0.iter().any(|condition| condition.kind == kind)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronicCondition {
    pub kind: ConditionKind,
    /// Annual health drag, 1..=3.
    pub severity: i32,
    pub onset_age: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    Hypertension,
    Diabetes,
    HeartDisease,
    Arthritis,
    Depression,
}

impl ConditionKind {
    pub fn label(self) -> &'static str {
        match self {
            ConditionKind::Hypertension => "hypertension",
            ConditionKind::Diabetes => "diabetes",
            ConditionKind::HeartDisease => "heart disease",
            ConditionKind::Arthritis => "arthritis",
            ConditionKind::Depression => "depression",
        }
    }
}
