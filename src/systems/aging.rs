use bevy_ecs::prelude::*;

use crate::components::identity::{Age, Player};
use crate::components::stats::CoreStats;
use crate::core::rng::SimRng;
use crate::simulation::aging::{check_termination, natural_aging, GameConfig, GameStatus};
use crate::simulation::clock::SimClock;
use crate::simulation::log::YearLog;

/// System: the year-advance orchestrator head. Ages the character, applies
/// natural drift, and transitions to game over when a terminal condition
/// holds. Runs before every other engine in the tick.
pub fn aging_system(
    mut status: ResMut<GameStatus>,
    config: Res<GameConfig>,
    mut clock: ResMut<SimClock>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<YearLog>,
    mut query: Query<(&mut Age, &mut CoreStats), With<Player>>,
) {
    log.0.clear();
    if status.is_over() {
        return;
    }
    let Ok((mut age, mut stats)) = query.get_single_mut() else {
        return;
    };

    // A character who entered the tick already depleted is done; no aging,
    // no event this step.
    if stats.health <= 0 {
        *status = GameStatus::Over {
            reason: "Your health gave out.".to_string(),
        };
        log.0.push("Your story has come to an end.".to_string());
        return;
    }

    age.0 += 1;
    clock.advance();

    for line in natural_aging(age.0, &mut stats, &mut rng) {
        log.0.push(line);
    }

    if let Some(reason) = check_termination(stats.health, age.0, config.max_age) {
        log.0.push(reason.clone());
        *status = GameStatus::Over { reason };
    }
}
