pub mod achievement;
pub mod aging;
pub mod career;
pub mod events;
pub mod finance;
pub mod health;
pub mod journal;
pub mod relationship;

pub use achievement::achievement_system;
pub use aging::aging_system;
pub use career::{career_system, CareerLibrary};
pub use events::event_roll_system;
pub use finance::finance_system;
pub use health::health_system;
pub use journal::journal_system;
pub use relationship::relationship_system;
