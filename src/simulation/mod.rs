pub mod achievements;
pub mod aging;
pub mod career;
pub mod clock;
pub mod creation;
pub mod effects;
pub mod events;
pub mod finance;
pub mod health;
pub mod log;
pub mod relationships;
