use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::core::rng::SimRng;
use crate::core::world::IdAllocator;
use crate::data::achievements::achievement_catalog;
use crate::data::careers::career_tracks;
use crate::data::events::{builtin_catalog, load_event_catalog, EventCatalog};
use crate::simulation::achievements::{AchievementLibrary, AchievementState};
use crate::simulation::aging::{GameConfig, GameStatus};
use crate::simulation::clock::SimClock;
use crate::simulation::events::{EventLibrary, EventState, PendingEvent};
use crate::simulation::finance::MarketState;
use crate::simulation::log::{LifeLog, YearLog};
use crate::simulation::relationships::RelationshipSummary;
use crate::systems::{
    achievement_system, aging_system, career_system, event_roll_system, finance_system,
    health_system, journal_system, relationship_system, CareerLibrary,
};

const DEFAULT_EVENTS_PATH: &str = "./assets/data/life_events.json";

/// Canonical tick ordering for the simulation.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Aging,
    Engines,
    Events,
    Cleanup,
}

/// Build the ECS world with baseline resources.
pub fn create_world(seed: u64) -> World {
    let mut world = World::new();
    world.insert_resource(SimRng::new(seed));
    world.insert_resource(SimClock::default());
    world.insert_resource(GameStatus::default());
    world.insert_resource(GameConfig::default());
    world.insert_resource(IdAllocator::default());
    world.insert_resource(MarketState::default());
    world.insert_resource(EventState::default());
    world.insert_resource(PendingEvent::default());
    world.insert_resource(AchievementState::default());
    world.insert_resource(RelationshipSummary::default());
    world.insert_resource(LifeLog::default());
    world.insert_resource(YearLog::default());
    world.insert_resource(EventLibrary(load_events().events));
    world.insert_resource(CareerLibrary(career_tracks()));
    world.insert_resource(AchievementLibrary(achievement_catalog()));
    world
}

/// Build the system schedule in the canonical order. Engines are chained so a
/// fixed seed replays the exact same year.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets(
        (
            TickSet::Aging,
            TickSet::Engines,
            TickSet::Events,
            TickSet::Cleanup,
        )
            .chain(),
    );

    schedule.add_systems((
        aging_system.in_set(TickSet::Aging),
        (
            career_system,
            finance_system,
            health_system,
            relationship_system,
            achievement_system,
        )
            .chain()
            .in_set(TickSet::Engines),
        event_roll_system.in_set(TickSet::Events),
        journal_system.in_set(TickSet::Cleanup),
    ));

    schedule
}

fn load_events() -> EventCatalog {
    if !std::path::Path::new(DEFAULT_EVENTS_PATH).exists() {
        return builtin_catalog();
    }
    match load_event_catalog(DEFAULT_EVENTS_PATH) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!(
                "Failed to load events from {}: {}; using built-in catalog",
                DEFAULT_EVENTS_PATH, err
            );
            builtin_catalog()
        }
    }
}
