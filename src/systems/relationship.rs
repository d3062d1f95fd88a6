use bevy_ecs::prelude::*;

use crate::components::family::{InteractionLog, Kinship, RelationshipStats, Vitality};
use crate::components::identity::{Age, Identity, Player};
use crate::components::stats::CoreStats;
use crate::core::rng::SimRng;
use crate::simulation::aging::GameStatus;
use crate::simulation::log::YearLog;
use crate::simulation::relationships::{relationship_quality, tick_member, RelationshipSummary};

/// System: one relationship year per family member, then refresh the digest
/// the other engines read.
pub fn relationship_system(
    status: Res<GameStatus>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<YearLog>,
    mut summary: ResMut<RelationshipSummary>,
    mut player: Query<(&Age, &mut CoreStats), With<Player>>,
    mut members: Query<
        (
            &Identity,
            &mut Age,
            &mut Kinship,
            &mut Vitality,
            &mut RelationshipStats,
            &mut InteractionLog,
        ),
        Without<Player>,
    >,
) {
    if status.is_over() {
        return;
    }
    let Ok((player_age, mut player_stats)) = player.get_single_mut() else {
        return;
    };

    let mut total_quality = 0i64;
    let mut living = 0usize;

    for (identity, mut age, mut kinship, mut vitality, mut stats, mut memories) in
        members.iter_mut()
    {
        if !kinship.alive {
            continue;
        }
        age.0 += 1;

        let year = tick_member(
            &mut stats,
            &mut memories,
            age.0,
            &mut vitality.0,
            player_age.0,
            &mut rng,
        );

        if year.conflict {
            log.0
                .push(format!("You had a falling-out with {}.", identity.first_name));
            player_stats.adjust_happiness(-2);
        }
        if year.milestone {
            log.0.push(format!(
                "You shared a milestone with {}.",
                identity.first_name
            ));
            player_stats.adjust_happiness(2);
        }
        if year.died {
            kinship.alive = false;
            log.0
                .push(format!("{} passed away.", identity.first_name));
            player_stats.adjust_happiness(-8);
            continue;
        }

        total_quality += relationship_quality(&stats) as i64;
        living += 1;
    }

    *summary = if living > 0 {
        RelationshipSummary {
            average_quality: (total_quality / living as i64) as i32,
            living_members: living,
        }
    } else {
        RelationshipSummary {
            average_quality: 50,
            living_members: 0,
        }
    };
}
