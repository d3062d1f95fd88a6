use bevy_ecs::prelude::*;

use crate::components::career::{CriminalRecord, Education, Employment, Job};
use crate::components::family::{
    FamilyRole, InteractionLog, Kinship, RelationshipStats, Vitality,
};
use crate::components::health::ConditionList;
use crate::components::identity::{Age, EntityId, Gender, Identity, Player};
use crate::components::stats::{AssetPortfolio, CoreStats, Fame, Finances};
use crate::content::NameSource;
use crate::core::rng::SimRng;
use crate::core::world::IdAllocator;
use crate::data::careers::career_tracks;

/// Partial character description; omitted fields get randomized defaults.
#[derive(Debug, Clone, Default)]
pub struct CharacterSpec {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub seed: Option<u64>,
}

/// Spawn the played character at age 0 with rolled stats and two parents.
pub fn spawn_character(world: &mut World, spec: &CharacterSpec, names: &NameSource) -> Entity {
    let mut rng = world.resource::<SimRng>().clone();

    let gender = spec.gender.unwrap_or_else(|| {
        if rng.chance(50) {
            Gender::Female
        } else {
            Gender::Male
        }
    });
    let first_name = spec
        .first_name
        .clone()
        .unwrap_or_else(|| names.given_name(&mut rng, gender));
    let last_name = spec
        .last_name
        .clone()
        .unwrap_or_else(|| names.family_name(&mut rng));

    let stats = CoreStats {
        health: rng.range_i32(60, 100),
        happiness: rng.range_i32(40, 90),
        smarts: rng.range_i32(20, 95),
        looks: rng.range_i32(20, 95),
    };

    let uid = allocate_id(world);
    let player = world
        .spawn((
            Player,
            EntityId(uid),
            Identity {
                first_name,
                last_name: last_name.clone(),
                gender,
            },
            Age(0),
            stats,
            Fame::default(),
            Finances::default(),
            AssetPortfolio::default(),
            Employment::default(),
            Education::default(),
            CriminalRecord::default(),
            ConditionList::default(),
        ))
        .id();

    spawn_parent(world, names, &mut rng, &last_name, FamilyRole::Mother);
    spawn_parent(world, names, &mut rng, &last_name, FamilyRole::Father);

    *world.resource_mut::<SimRng>() = rng;
    player
}

fn spawn_parent(
    world: &mut World,
    names: &NameSource,
    rng: &mut SimRng,
    family_name: &str,
    role: FamilyRole,
) {
    let gender = match role {
        FamilyRole::Mother => Gender::Female,
        _ => Gender::Male,
    };
    let first_name = names.given_name(rng, gender);
    let age = rng.range_i32(20, 45) as u32;

    let tracks = career_tracks();
    let track = &tracks[rng.roll(tracks.len() as u64) as usize];
    let level_index = rng.roll(2.min(track.levels.len() as u64)) as u32;
    let job = track.level(level_index).map(|level| Job {
        track_id: Some(track.id.clone()),
        title: level.title.clone(),
        salary: level.salary,
        level: level_index,
        tenure_years: rng.range_i32(0, 5) as u32,
        performance: rng.range_i32(40, 80),
    });

    let uid = allocate_id(world);
    world.spawn((
        EntityId(uid),
        Identity {
            first_name,
            last_name: family_name.to_string(),
            gender,
        },
        Age(age),
        Kinship { role, alive: true },
        Vitality(rng.range_i32(70, 100)),
        RelationshipStats {
            level: rng.range_i32(50, 90),
            trust: rng.range_i32(50, 90),
            respect: rng.range_i32(50, 90),
            communication: rng.range_i32(40, 85),
            conflict_resolution: rng.range_i32(40, 85),
        },
        InteractionLog::default(),
        Employment { job },
    ));
}

/// Spawn a family member mid-playthrough (marriage, birth, meeting someone).
pub fn spawn_family_member(
    world: &mut World,
    names: &NameSource,
    role: FamilyRole,
    name: Option<String>,
    family_name: &str,
    player_age: u32,
) {
    let mut rng = world.resource::<SimRng>().clone();
    let gender = if rng.chance(50) {
        Gender::Female
    } else {
        Gender::Male
    };
    let first_name = name.unwrap_or_else(|| names.given_name(&mut rng, gender));
    let age = match role {
        FamilyRole::Child => 0,
        FamilyRole::Partner | FamilyRole::Friend => {
            (player_age as i32 + rng.jitter(6)).max(16) as u32
        }
        FamilyRole::Sibling => (player_age as i32 + rng.jitter(8)).max(0) as u32,
        FamilyRole::Mother | FamilyRole::Father => player_age + rng.range_i32(18, 35) as u32,
    };

    let uid = allocate_id(world);
    world.spawn((
        EntityId(uid),
        Identity {
            first_name,
            last_name: family_name.to_string(),
            gender,
        },
        Age(age),
        Kinship { role, alive: true },
        Vitality(rng.range_i32(75, 100)),
        RelationshipStats {
            level: rng.range_i32(55, 85),
            trust: rng.range_i32(50, 85),
            respect: rng.range_i32(50, 85),
            communication: rng.range_i32(45, 85),
            conflict_resolution: rng.range_i32(45, 85),
        },
        InteractionLog::default(),
        Employment::default(),
    ));
    *world.resource_mut::<SimRng>() = rng;
}

fn allocate_id(world: &mut World) -> u32 {
    let mut alloc = world.resource_mut::<IdAllocator>();
    alloc.alloc()
}
