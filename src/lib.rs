// Re-export core modules for use by the binary or other consumers
pub mod components;
pub mod content;
pub mod core;
pub mod data;
pub mod simulation;
pub mod systems;

// Expose the main Game wrapper and types needed for interaction
pub use crate::core::serialization::{SaveFile, SaveState};
pub use crate::core::world::{
    ChoiceError, ChoiceView, FamilyView, Game, PendingChoiceView, YearSummary,
};
pub use crate::simulation::creation::CharacterSpec;
