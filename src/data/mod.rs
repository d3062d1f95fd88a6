pub mod achievements;
pub mod careers;
pub mod events;
