use std::collections::HashSet;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::career::EducationStage;
use crate::data::achievements::{AchievementDef, AchievementRequirement};

/// The loaded achievement catalog.
#[derive(Resource, Debug, Default, Clone)]
pub struct AchievementLibrary(pub Vec<AchievementDef>);

/// Unlocked ids for this playthrough. Once in, never re-evaluated.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementState {
    pub unlocked: HashSet<String>,
}

/// Character values the requirement predicates can look at.
#[derive(Debug, Clone, Copy)]
pub struct AchievementView {
    pub age: u32,
    pub wealth: i64,
    pub net_worth: i64,
    pub salary: i64,
    pub fame: i32,
    pub employed: bool,
    pub education: EducationStage,
    pub living_family: usize,
}

fn requirements_met(req: &AchievementRequirement, view: &AchievementView) -> bool {
    if let Some(min) = req.min_age {
        if view.age < min {
            return false;
        }
    }
    if let Some(min) = req.min_wealth {
        if view.wealth < min {
            return false;
        }
    }
    if let Some(min) = req.min_net_worth {
        if view.net_worth < min {
            return false;
        }
    }
    if let Some(min) = req.min_salary {
        if view.salary < min {
            return false;
        }
    }
    if let Some(min) = req.min_fame {
        if view.fame < min {
            return false;
        }
    }
    if let Some(wanted) = req.employed {
        if view.employed != wanted {
            return false;
        }
    }
    if let Some(stage) = req.education_at_least {
        if view.education < stage {
            return false;
        }
    }
    if let Some(min) = req.min_family {
        if view.living_family < min {
            return false;
        }
    }
    true
}

/// Test every still-locked achievement; unlock the ones whose requirements
/// hold and return them so the caller can apply rewards.
pub fn check_achievements<'a>(
    catalog: &'a [AchievementDef],
    view: &AchievementView,
    state: &mut AchievementState,
) -> Vec<&'a AchievementDef> {
    let mut newly = Vec::new();
    for def in catalog {
        if state.unlocked.contains(&def.id) {
            continue;
        }
        if requirements_met(&def.requirements, view) {
            state.unlocked.insert(def.id.clone());
            newly.push(def);
        }
    }
    newly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::achievements::AchievementReward;

    fn wealth_achievement(threshold: i64) -> Vec<AchievementDef> {
        vec![AchievementDef {
            id: "rich".to_string(),
            name: "Rich".to_string(),
            text: String::new(),
            requirements: AchievementRequirement {
                min_wealth: Some(threshold),
                ..Default::default()
            },
            reward: AchievementReward::default(),
        }]
    }

    fn view(wealth: i64) -> AchievementView {
        AchievementView {
            age: 30,
            wealth,
            net_worth: wealth,
            salary: 0,
            fame: 0,
            employed: false,
            education: EducationStage::None,
            living_family: 0,
        }
    }

    #[test]
    fn unlocks_exactly_once_and_stays_unlocked() {
        let catalog = wealth_achievement(1_000);
        let mut state = AchievementState::default();

        assert!(check_achievements(&catalog, &view(999), &mut state).is_empty());

        let first = check_achievements(&catalog, &view(1_000), &mut state);
        assert_eq!(first.len(), 1);

        // Wealth drops back below the threshold; the unlock persists and is
        // not re-reported.
        assert!(check_achievements(&catalog, &view(10), &mut state).is_empty());
        assert!(state.unlocked.contains("rich"));
    }

    #[test]
    fn every_present_requirement_must_hold() {
        let def = AchievementDef {
            id: "exec".to_string(),
            name: "Executive".to_string(),
            text: String::new(),
            requirements: AchievementRequirement {
                min_salary: Some(100_000),
                employed: Some(true),
                ..Default::default()
            },
            reward: AchievementReward::default(),
        };
        let mut state = AchievementState::default();
        let mut v = view(0);
        v.salary = 150_000;
        v.employed = false;
        assert!(check_achievements(std::slice::from_ref(&def), &v, &mut state).is_empty());
        v.employed = true;
        assert_eq!(
            check_achievements(std::slice::from_ref(&def), &v, &mut state).len(),
            1
        );
    }

    #[test]
    fn education_requirement_orders_stages() {
        let def = AchievementDef {
            id: "grad".to_string(),
            name: "Graduate".to_string(),
            text: String::new(),
            requirements: AchievementRequirement {
                education_at_least: Some(EducationStage::University),
                ..Default::default()
            },
            reward: AchievementReward::default(),
        };
        let mut state = AchievementState::default();
        let mut v = view(0);
        v.education = EducationStage::Secondary;
        assert!(check_achievements(std::slice::from_ref(&def), &v, &mut state).is_empty());
        v.education = EducationStage::Postgraduate;
        assert_eq!(
            check_achievements(std::slice::from_ref(&def), &v, &mut state).len(),
            1
        );
    }
}
