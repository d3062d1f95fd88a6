use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Employment state of the character.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Employment {
    pub job: Option<Job>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Career track this job belongs to, if hired through a ladder.
    pub track_id: Option<String>,
    pub title: String,
    pub salary: i64,
    pub level: u32,
    pub tenure_years: u32,
    /// Last computed annual performance review, 0..=100.
    pub performance: i32,
}

/// Schooling progression.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub stage: EducationStage,
}

impl Default for Education {
    fn default() -> Self {
        Self {
            stage: EducationStage::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationStage {
    None,
    Primary,
    Secondary,
    University,
    Postgraduate,
}

/// Convictions attached to the character. Empty record means a clean sheet.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriminalRecord {
    pub convictions: Vec<String>,
}

impl CriminalRecord {
    pub fn is_clean(&self) -> bool {
        self.convictions.is_empty()
    }
}
