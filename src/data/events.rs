use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::career::EducationStage;
use crate::components::family::FamilyRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCatalog {
    pub schema_version: u32,
    pub events: Vec<LifeEvent>,
}

/// An immutable narrative event template. Eligibility is the inclusive age
/// range plus every listed condition; `weight` drives rarity-weighted draws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeEvent {
    pub id: String,
    pub title: String,
    pub text: String,
    pub min_age: u32,
    pub max_age: u32,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub once: bool,
    #[serde(default)]
    pub conditions: Vec<EventCondition>,
    pub choices: Vec<EventChoice>,
}

fn default_weight() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCondition {
    pub subject: ConditionSubject,
    pub op: ConditionOp,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionSubject {
    Health,
    Happiness,
    Smarts,
    Looks,
    Fame,
    Age,
    Wealth,
    Relationship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOp {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
}

impl ConditionOp {
    pub fn holds(self, left: i64, right: i64) -> bool {
        match self {
            ConditionOp::Gt => left > right,
            ConditionOp::Lt => left < right,
            ConditionOp::Eq => left == right,
            ConditionOp::Ge => left >= right,
            ConditionOp::Le => left <= right,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventChoice {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub outcome: ChoiceOutcome,
}

/// Closed effect set for a choice. Absent fields are no-ops, so malformed
/// content degrades to "nothing happens" instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happiness: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smarts: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looks: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fame: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wealth: Option<i64>,
    /// Applied to every living family member's relationship level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobGrant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<EducationStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conviction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_family: Option<NewFamilyMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobGrant {
    pub title: String,
    pub salary: i64,
    #[serde(default)]
    pub track_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFamilyMember {
    pub role: FamilyRole,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug)]
pub enum EventDataError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Validation(String),
}

impl std::fmt::Display for EventDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventDataError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            EventDataError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            EventDataError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for EventDataError {}

pub fn load_event_catalog(path: impl AsRef<Path>) -> Result<EventCatalog, EventDataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| EventDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog: EventCatalog =
        serde_json::from_str(&raw).map_err(|source| EventDataError::Json {
            path: path.display().to_string(),
            source,
        })?;
    catalog.validate()?;
    Ok(catalog)
}

impl EventCatalog {
    pub fn validate(&self) -> Result<(), EventDataError> {
        let mut ids = HashSet::new();
        for event in &self.events {
            if event.id.trim().is_empty() {
                return Err(EventDataError::Validation(
                    "event id cannot be empty".to_string(),
                ));
            }
            if !ids.insert(event.id.clone()) {
                return Err(EventDataError::Validation(format!(
                    "duplicate event id {}",
                    event.id
                )));
            }
            if event.title.trim().is_empty() {
                return Err(EventDataError::Validation(format!(
                    "event {} missing title",
                    event.id
                )));
            }
            if event.min_age > event.max_age {
                return Err(EventDataError::Validation(format!(
                    "event {} has inverted age range",
                    event.id
                )));
            }
            if event.choices.is_empty() {
                return Err(EventDataError::Validation(format!(
                    "event {} has no choices",
                    event.id
                )));
            }
        }
        Ok(())
    }
}

/// Default catalog used when no asset file is present, so the crate is
/// playable out of the box.
pub fn builtin_catalog() -> EventCatalog {
    let events = vec![
        event(
            "first_steps",
            "First Steps",
            "You take your first wobbly steps across the living room.",
            0,
            2,
            20,
            true,
            vec![],
            vec![
                choice("toddle", "Toddle onward", outcome(|o| o.happiness = Some(3))),
                choice("sit", "Sit back down", ChoiceOutcome::default()),
            ],
        ),
        event(
            "school_spelling_bee",
            "Spelling Bee",
            "Your school holds its annual spelling bee.",
            6,
            12,
            14,
            false,
            vec![cond(ConditionSubject::Smarts, ConditionOp::Ge, 30)],
            vec![
                choice(
                    "compete",
                    "Compete to win",
                    outcome(|o| {
                        o.smarts = Some(2);
                        o.happiness = Some(2);
                    }),
                ),
                choice(
                    "skip",
                    "Pretend to be sick",
                    outcome(|o| o.happiness = Some(-1)),
                ),
            ],
        ),
        event(
            "playground_scrap",
            "Playground Scrap",
            "A bigger kid shoves you at recess.",
            6,
            13,
            12,
            false,
            vec![],
            vec![
                choice(
                    "fight_back",
                    "Fight back",
                    outcome(|o| {
                        o.health = Some(-3);
                        o.happiness = Some(2);
                    }),
                ),
                choice(
                    "walk_away",
                    "Walk away",
                    outcome(|o| o.happiness = Some(-2)),
                ),
            ],
        ),
        event(
            "graduate_secondary",
            "Graduation Day",
            "You finish secondary school.",
            17,
            19,
            25,
            true,
            vec![cond(ConditionSubject::Smarts, ConditionOp::Ge, 20)],
            vec![
                choice(
                    "university",
                    "Enroll in university",
                    outcome(|o| {
                        o.education = Some(EducationStage::University);
                        o.smarts = Some(3);
                        o.wealth = Some(-2_000);
                    }),
                ),
                choice(
                    "work",
                    "Find a job instead",
                    outcome(|o| {
                        o.education = Some(EducationStage::Secondary);
                        o.job = Some(JobGrant {
                            title: "Retail Clerk".to_string(),
                            salary: 22_000,
                            track_id: Some("retail".to_string()),
                        });
                    }),
                ),
            ],
        ),
        event(
            "first_office_job",
            "Job Offer",
            "A local firm offers you an entry-level position.",
            18,
            30,
            18,
            false,
            vec![cond(ConditionSubject::Smarts, ConditionOp::Ge, 40)],
            vec![
                choice(
                    "accept",
                    "Accept the offer",
                    outcome(|o| {
                        o.job = Some(JobGrant {
                            title: "Junior Clerk".to_string(),
                            salary: 32_000,
                            track_id: Some("office".to_string()),
                        });
                        o.happiness = Some(2);
                    }),
                ),
                choice("decline", "Hold out for something better", ChoiceOutcome::default()),
            ],
        ),
        event(
            "meet_someone",
            "A Chance Meeting",
            "You hit it off with someone at a friend's party.",
            18,
            60,
            12,
            false,
            vec![cond(ConditionSubject::Happiness, ConditionOp::Ge, 20)],
            vec![
                choice(
                    "ask_out",
                    "Ask them out",
                    outcome(|o| {
                        o.happiness = Some(4);
                        o.new_family = Some(NewFamilyMember {
                            role: FamilyRole::Partner,
                            name: None,
                        });
                    }),
                ),
                choice("shrug", "Keep it casual", outcome(|o| o.happiness = Some(1))),
            ],
        ),
        event(
            "windfall_inheritance",
            "Unexpected Inheritance",
            "A distant relative leaves you a surprising sum.",
            25,
            80,
            3,
            true,
            vec![],
            vec![
                choice(
                    "invest",
                    "Invest it",
                    outcome(|o| o.wealth = Some(25_000)),
                ),
                choice(
                    "spend",
                    "Spend it on a long holiday",
                    outcome(|o| {
                        o.wealth = Some(10_000);
                        o.happiness = Some(6);
                    }),
                ),
            ],
        ),
        event(
            "shady_scheme",
            "A Shady Proposition",
            "An old acquaintance offers you a cut of something clearly illegal.",
            18,
            65,
            6,
            false,
            vec![cond(ConditionSubject::Wealth, ConditionOp::Lt, 5_000)],
            vec![
                choice(
                    "join",
                    "Take the cut",
                    outcome(|o| {
                        o.wealth = Some(8_000);
                        o.conviction = Some("fraud".to_string());
                        o.happiness = Some(-3);
                    }),
                ),
                choice("refuse", "Refuse flatly", outcome(|o| o.happiness = Some(1))),
            ],
        ),
        event(
            "local_fame",
            "Fifteen Minutes",
            "A video of you goes unexpectedly viral.",
            13,
            70,
            5,
            false,
            vec![cond(ConditionSubject::Looks, ConditionOp::Ge, 50)],
            vec![
                choice(
                    "lean_in",
                    "Lean into it",
                    outcome(|o| {
                        o.fame = Some(10);
                        o.happiness = Some(3);
                    }),
                ),
                choice(
                    "hide",
                    "Delete everything",
                    outcome(|o| o.fame = Some(2)),
                ),
            ],
        ),
        event(
            "midlife_checkup",
            "Routine Checkup",
            "Your doctor suggests a full physical.",
            40,
            70,
            14,
            false,
            vec![],
            vec![
                choice(
                    "go",
                    "Take the physical",
                    outcome(|o| o.health = Some(3)),
                ),
                choice(
                    "skip",
                    "Skip it again",
                    outcome(|o| o.health = Some(-2)),
                ),
            ],
        ),
        event(
            "family_reunion",
            "Family Reunion",
            "The whole family gathers for the first time in years.",
            10,
            90,
            10,
            false,
            vec![cond(ConditionSubject::Relationship, ConditionOp::Ge, 30)],
            vec![
                choice(
                    "attend",
                    "Show up and reconnect",
                    outcome(|o| {
                        o.relationship = Some(5);
                        o.happiness = Some(3);
                    }),
                ),
                choice(
                    "excuse",
                    "Make an excuse",
                    outcome(|o| o.relationship = Some(-4)),
                ),
            ],
        ),
        event(
            "retirement_party",
            "Retirement Party",
            "Colleagues throw you a send-off.",
            60,
            75,
            15,
            true,
            vec![cond(ConditionSubject::Age, ConditionOp::Ge, 62)],
            vec![
                choice(
                    "celebrate",
                    "Celebrate properly",
                    outcome(|o| o.happiness = Some(5)),
                ),
                choice(
                    "quiet",
                    "Slip out early",
                    outcome(|o| o.happiness = Some(1)),
                ),
            ],
        ),
        event(
            "grand_old_age",
            "Letters From Afar",
            "Old friends write to ask how you are holding up.",
            76,
            99,
            12,
            false,
            vec![],
            vec![
                choice(
                    "reply",
                    "Write back at length",
                    outcome(|o| {
                        o.happiness = Some(3);
                        o.relationship = Some(3);
                    }),
                ),
                choice("file", "File them away", ChoiceOutcome::default()),
            ],
        ),
    ];

    EventCatalog {
        schema_version: 1,
        events,
    }
}

fn event(
    id: &str,
    title: &str,
    text: &str,
    min_age: u32,
    max_age: u32,
    weight: u32,
    once: bool,
    conditions: Vec<EventCondition>,
    choices: Vec<EventChoice>,
) -> LifeEvent {
    LifeEvent {
        id: id.to_string(),
        title: title.to_string(),
        text: text.to_string(),
        min_age,
        max_age,
        weight,
        once,
        conditions,
        choices,
    }
}

fn choice(id: &str, text: &str, outcome: ChoiceOutcome) -> EventChoice {
    EventChoice {
        id: id.to_string(),
        text: text.to_string(),
        outcome,
    }
}

fn cond(subject: ConditionSubject, op: ConditionOp, value: i64) -> EventCondition {
    EventCondition { subject, op, value }
}

fn outcome(build: impl FnOnce(&mut ChoiceOutcome)) -> ChoiceOutcome {
    let mut out = ChoiceOutcome::default();
    build(&mut out);
    out
}
