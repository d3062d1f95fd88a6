use std::collections::HashSet;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::rng::{weighted_index, SimRng};
use crate::data::events::{ConditionSubject, EventCondition, LifeEvent};

/// Chance per year that an eligible event is drawn at all.
pub const EVENT_CHANCE_PERCENT: u32 = 85;

/// The loaded event pool.
#[derive(Resource, Debug, Default, Clone)]
pub struct EventLibrary(pub Vec<LifeEvent>);

/// Per-playthrough bookkeeping: ids of fired one-time events.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventState {
    pub triggered: HashSet<String>,
}

/// Event generated this year and awaiting a choice. While set, aging is
/// blocked until the shell resolves it.
#[derive(Resource, Debug, Default, Clone)]
pub struct PendingEvent(pub Option<ActiveEvent>);

#[derive(Debug, Clone)]
pub struct ActiveEvent {
    pub event: LifeEvent,
    pub age: u32,
}

/// Character values an event condition can look at.
#[derive(Debug, Clone, Copy)]
pub struct EventContext {
    pub age: u32,
    pub health: i32,
    pub happiness: i32,
    pub smarts: i32,
    pub looks: i32,
    pub fame: i32,
    pub wealth: i64,
    pub relationship: i32,
}

fn subject_value(subject: ConditionSubject, ctx: &EventContext) -> i64 {
    match subject {
        ConditionSubject::Health => ctx.health as i64,
        ConditionSubject::Happiness => ctx.happiness as i64,
        ConditionSubject::Smarts => ctx.smarts as i64,
        ConditionSubject::Looks => ctx.looks as i64,
        ConditionSubject::Fame => ctx.fame as i64,
        ConditionSubject::Age => ctx.age as i64,
        ConditionSubject::Wealth => ctx.wealth,
        ConditionSubject::Relationship => ctx.relationship as i64,
    }
}

fn condition_holds(condition: &EventCondition, ctx: &EventContext) -> bool {
    condition
        .op
        .holds(subject_value(condition.subject, ctx), condition.value)
}

pub fn event_is_eligible(event: &LifeEvent, ctx: &EventContext, state: &EventState) -> bool {
    if ctx.age < event.min_age || ctx.age > event.max_age {
        return false;
    }
    if event.once && state.triggered.contains(&event.id) {
        return false;
    }
    event
        .conditions
        .iter()
        .all(|condition| condition_holds(condition, ctx))
}

/// Rarity-weighted draw over the eligible pool. `None` when nothing applies,
/// which is an expected outcome rather than an error. One-time winners are
/// recorded in `state` so they cannot repeat.
pub fn select_event<'a>(
    pool: &'a [LifeEvent],
    ctx: &EventContext,
    state: &mut EventState,
    rng: &mut SimRng,
) -> Option<&'a LifeEvent> {
    let eligible: Vec<&LifeEvent> = pool
        .iter()
        .filter(|event| event_is_eligible(event, ctx, state))
        .collect();
    if eligible.is_empty() {
        return None;
    }

    let weights: Vec<u32> = eligible.iter().map(|event| event.weight).collect();
    let idx = weighted_index(&weights, rng)?;
    let chosen = eligible[idx];
    if chosen.once {
        state.triggered.insert(chosen.id.clone());
    }
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::events::{
        ChoiceOutcome, ConditionOp, EventChoice, EventCondition, LifeEvent,
    };

    fn template(id: &str, min_age: u32, max_age: u32, weight: u32, once: bool) -> LifeEvent {
        LifeEvent {
            id: id.to_string(),
            title: id.to_string(),
            text: String::new(),
            min_age,
            max_age,
            weight,
            once,
            conditions: Vec::new(),
            choices: vec![EventChoice {
                id: "ok".to_string(),
                text: "ok".to_string(),
                outcome: ChoiceOutcome::default(),
            }],
        }
    }

    fn ctx(age: u32) -> EventContext {
        EventContext {
            age,
            health: 50,
            happiness: 50,
            smarts: 50,
            looks: 50,
            fame: 0,
            wealth: 0,
            relationship: 50,
        }
    }

    #[test]
    fn age_range_is_inclusive_and_excluding() {
        let state = EventState::default();
        let event = template("e", 10, 20, 5, false);
        assert!(event_is_eligible(&event, &ctx(10), &state));
        assert!(event_is_eligible(&event, &ctx(20), &state));
        assert!(!event_is_eligible(&event, &ctx(9), &state));
        assert!(!event_is_eligible(&event, &ctx(21), &state));
    }

    #[test]
    fn conditions_gate_eligibility() {
        let state = EventState::default();
        let mut event = template("e", 0, 100, 5, false);
        event.conditions.push(EventCondition {
            subject: ConditionSubject::Wealth,
            op: ConditionOp::Ge,
            value: 1_000,
        });
        assert!(!event_is_eligible(&event, &ctx(30), &state));
        let mut rich = ctx(30);
        rich.wealth = 1_000;
        assert!(event_is_eligible(&event, &rich, &state));
    }

    #[test]
    fn empty_pool_returns_none() {
        let mut state = EventState::default();
        let mut rng = SimRng::new(1);
        assert!(select_event(&[], &ctx(30), &mut state, &mut rng).is_none());
    }

    #[test]
    fn once_events_never_repeat() {
        let mut state = EventState::default();
        let mut rng = SimRng::new(5);
        let pool = vec![template("solo", 0, 100, 5, true)];
        let first = select_event(&pool, &ctx(30), &mut state, &mut rng);
        assert_eq!(first.map(|e| e.id.as_str()), Some("solo"));
        let second = select_event(&pool, &ctx(30), &mut state, &mut rng);
        assert!(second.is_none());
    }

    #[test]
    fn selection_is_deterministic_for_a_seed() {
        let pool = vec![
            template("a", 0, 100, 10, false),
            template("b", 0, 100, 10, false),
            template("c", 0, 100, 10, false),
        ];
        let draw = |seed: u64| {
            let mut state = EventState::default();
            let mut rng = SimRng::new(seed);
            (0..16)
                .map(|_| {
                    select_event(&pool, &ctx(30), &mut state, &mut rng)
                        .map(|e| e.id.clone())
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(77), draw(77));
    }

    #[test]
    fn frequencies_follow_weights() {
        let pool = vec![
            template("common", 0, 100, 90, false),
            template("rare", 0, 100, 10, false),
        ];
        let mut state = EventState::default();
        let mut rng = SimRng::new(2024);
        let mut common = 0u32;
        for _ in 0..10_000 {
            if let Some(event) = select_event(&pool, &ctx(30), &mut state, &mut rng) {
                if event.id == "common" {
                    common += 1;
                }
            }
        }
        assert!(common > 8_500 && common < 9_500, "common = {}", common);
    }

    #[test]
    fn never_selects_out_of_age_range() {
        let pool = vec![
            template("child", 0, 12, 50, false),
            template("adult", 18, 60, 50, false),
        ];
        let mut state = EventState::default();
        let mut rng = SimRng::new(3);
        for _ in 0..500 {
            if let Some(event) = select_event(&pool, &ctx(30), &mut state, &mut rng) {
                assert_eq!(event.id, "adult");
            }
        }
    }
}
