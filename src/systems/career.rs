use bevy_ecs::prelude::*;

use crate::components::career::Employment;
use crate::components::identity::Player;
use crate::components::stats::CoreStats;
use crate::core::rng::SimRng;
use crate::data::careers::CareerTrack;
use crate::simulation::aging::GameStatus;
use crate::simulation::career::tick_career;
use crate::simulation::log::YearLog;
use crate::simulation::relationships::RelationshipSummary;

/// The loaded career ladders.
#[derive(Resource, Debug, Default, Clone)]
pub struct CareerLibrary(pub Vec<CareerTrack>);

/// System: runs the annual review and promotion roll.
pub fn career_system(
    status: Res<GameStatus>,
    tracks: Res<CareerLibrary>,
    relationships: Res<RelationshipSummary>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<YearLog>,
    mut query: Query<(&mut Employment, &CoreStats), With<Player>>,
) {
    if status.is_over() {
        return;
    }
    let Ok((mut employment, stats)) = query.get_single_mut() else {
        return;
    };
    tick_career(
        &mut employment,
        stats,
        relationships.average_quality,
        &tracks.0,
        &mut rng,
        &mut log.0,
    );
}
