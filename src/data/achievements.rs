use serde::{Deserialize, Serialize};

use crate::components::career::EducationStage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    pub text: String,
    pub requirements: AchievementRequirement,
    #[serde(default)]
    pub reward: AchievementReward,
}

/// Threshold predicates. Every present field must hold for the unlock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_wealth: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_net_worth: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_fame: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_at_least: Option<EducationStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_family: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AchievementReward {
    #[serde(default)]
    pub happiness: i32,
    #[serde(default)]
    pub fame: i32,
    #[serde(default)]
    pub wealth: i64,
}

pub fn achievement_catalog() -> Vec<AchievementDef> {
    vec![
        achievement(
            "first_job",
            "Gainfully Employed",
            "Hold a job.",
            AchievementRequirement {
                employed: Some(true),
                ..Default::default()
            },
            reward(2, 0, 0),
        ),
        achievement(
            "nest_egg",
            "Nest Egg",
            "Save up 1,000.",
            AchievementRequirement {
                min_wealth: Some(1_000),
                ..Default::default()
            },
            reward(1, 0, 0),
        ),
        achievement(
            "six_figures",
            "Six Figures",
            "Reach 100,000 in cash.",
            AchievementRequirement {
                min_wealth: Some(100_000),
                ..Default::default()
            },
            reward(3, 1, 0),
        ),
        achievement(
            "millionaire",
            "Millionaire",
            "Reach a net worth of 1,000,000.",
            AchievementRequirement {
                min_net_worth: Some(1_000_000),
                ..Default::default()
            },
            reward(5, 5, 0),
        ),
        achievement(
            "scholar",
            "Scholar",
            "Finish university.",
            AchievementRequirement {
                education_at_least: Some(EducationStage::University),
                ..Default::default()
            },
            reward(3, 0, 0),
        ),
        achievement(
            "household_name",
            "Household Name",
            "Reach 75 fame.",
            AchievementRequirement {
                min_fame: Some(75),
                ..Default::default()
            },
            reward(4, 0, 5_000),
        ),
        achievement(
            "full_house",
            "Full House",
            "Have four living family members.",
            AchievementRequirement {
                min_family: Some(4),
                ..Default::default()
            },
            reward(4, 0, 0),
        ),
        achievement(
            "centenarian",
            "Centenarian",
            "Live to 100.",
            AchievementRequirement {
                min_age: Some(100),
                ..Default::default()
            },
            reward(10, 5, 0),
        ),
        achievement(
            "high_earner",
            "High Earner",
            "Hold a job paying 150,000 a year.",
            AchievementRequirement {
                min_salary: Some(150_000),
                employed: Some(true),
                ..Default::default()
            },
            reward(3, 2, 0),
        ),
    ]
}

fn achievement(
    id: &str,
    name: &str,
    text: &str,
    requirements: AchievementRequirement,
    reward: AchievementReward,
) -> AchievementDef {
    AchievementDef {
        id: id.to_string(),
        name: name.to_string(),
        text: text.to_string(),
        requirements,
        reward,
    }
}

fn reward(happiness: i32, fame: i32, wealth: i64) -> AchievementReward {
    AchievementReward {
        happiness,
        fame,
        wealth,
    }
}
