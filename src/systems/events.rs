use bevy_ecs::prelude::*;

use crate::components::identity::{Age, Player};
use crate::components::stats::{CoreStats, Fame, Finances};
use crate::core::rng::SimRng;
use crate::simulation::aging::GameStatus;
use crate::simulation::events::{
    select_event, ActiveEvent, EventContext, EventLibrary, EventState, PendingEvent,
    EVENT_CHANCE_PERCENT,
};
use crate::simulation::log::YearLog;
use crate::simulation::relationships::RelationshipSummary;

/// System: the per-year event roll. With a fixed chance, filters the pool by
/// eligibility and draws one rarity-weighted event; the result parks in
/// [`PendingEvent`] until the shell resolves it.
pub fn event_roll_system(
    status: Res<GameStatus>,
    library: Res<EventLibrary>,
    relationships: Res<RelationshipSummary>,
    mut state: ResMut<EventState>,
    mut pending: ResMut<PendingEvent>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<YearLog>,
    query: Query<(&Age, &CoreStats, &Fame, &Finances), With<Player>>,
) {
    if status.is_over() || pending.0.is_some() {
        return;
    }
    let Ok((age, stats, fame, finances)) = query.get_single() else {
        return;
    };
    if stats.health <= 0 {
        return;
    }
    if !rng.chance(EVENT_CHANCE_PERCENT) {
        return;
    }

    let ctx = EventContext {
        age: age.0,
        health: stats.health,
        happiness: stats.happiness,
        smarts: stats.smarts,
        looks: stats.looks,
        fame: fame.0,
        wealth: finances.balance,
        relationship: relationships.average_quality,
    };

    if let Some(event) = select_event(&library.0, &ctx, &mut state, &mut rng) {
        log.0.push(format!("{}.", event.title));
        pending.0 = Some(ActiveEvent {
            event: event.clone(),
            age: age.0,
        });
    }
}
