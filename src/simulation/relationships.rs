use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::family::{Interaction, InteractionLog, RelationshipStats};
use crate::components::stats::clamp_stat;
use crate::core::rng::SimRng;

/// Yearly digest of the family, read by the career engine and event selector.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipSummary {
    pub average_quality: i32,
    pub living_members: usize,
}

impl Default for RelationshipSummary {
    fn default() -> Self {
        Self {
            average_quality: 50,
            living_members: 0,
        }
    }
}

/// Fixed weighted sum over the sub-scores.
pub fn relationship_quality(stats: &RelationshipStats) -> i32 {
    let weighted = stats.level * 30
        + stats.trust * 25
        + stats.respect * 15
        + stats.communication * 15
        + stats.conflict_resolution * 15;
    clamp_stat(weighted / 100)
}

/// Memories fade in proportion to how strong they were; spent ones drop out.
pub fn decay_interactions(log: &mut InteractionLog) {
    for memory in log.0.iter_mut() {
        let decay = (memory.strength / 5).max(1);
        memory.strength -= decay;
    }
    log.0.retain(|memory| memory.strength > 0);
}

/// Outcome of one member's year, applied by the relationship system.
pub struct MemberYear {
    pub conflict: bool,
    pub milestone: bool,
    pub died: bool,
}

/// One year for a single family member: memories fade, bonds drift, the
/// member ages, and conflicts or milestones may fire past their thresholds.
pub fn tick_member(
    stats: &mut RelationshipStats,
    log: &mut InteractionLog,
    member_age: u32,
    vitality: &mut i32,
    player_age: u32,
    rng: &mut SimRng,
) -> MemberYear {
    decay_interactions(log);

    // Neglect drifts the bond toward indifference; recent memories hold it up.
    if log.0.is_empty() {
        stats.level = clamp_stat(stats.level - rng.range_i32(1, 3));
        stats.communication = clamp_stat(stats.communication - 1);
    } else {
        stats.level = clamp_stat(stats.level + 1);
    }

    let mut conflict = false;
    if (stats.trust < 40 || stats.communication < 35) && rng.chance(20) {
        conflict = true;
        stats.trust = clamp_stat(stats.trust - rng.range_i32(3, 8));
        stats.respect = clamp_stat(stats.respect - 2);
        log.0.push(Interaction {
            description: "a falling-out".to_string(),
            strength: 20,
            age_recorded: player_age,
        });
    }

    let mut milestone = false;
    if relationship_quality(stats) > 80 && rng.chance(15) {
        milestone = true;
        stats.trust = clamp_stat(stats.trust + 3);
        log.0.push(Interaction {
            description: "a shared milestone".to_string(),
            strength: 30,
            age_recorded: player_age,
        });
    }

    // Members age alongside the player.
    let decay = match member_age {
        0..=49 => 0,
        50..=69 => rng.range_i32(0, 2),
        70..=84 => rng.range_i32(1, 3),
        _ => rng.range_i32(2, 5),
    };
    *vitality = (*vitality - decay).max(0);
    let died = *vitality <= 0;

    MemberYear {
        conflict,
        milestone,
        died,
    }
}
