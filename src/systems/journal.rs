use bevy_ecs::prelude::*;

use crate::components::identity::{Age, Player};
use crate::simulation::log::{LifeLog, YearLog};

/// System: folds this year's scratch log into the rolling life log, keyed by
/// the character's current age. Runs last in the tick.
pub fn journal_system(
    mut life_log: ResMut<LifeLog>,
    year_log: Res<YearLog>,
    query: Query<&Age, With<Player>>,
) {
    let Ok(age) = query.get_single() else {
        return;
    };
    for line in year_log.0.iter() {
        life_log.record(age.0, line.clone());
    }
}
