pub mod career;
pub mod family;
pub mod health;
pub mod identity;
pub mod stats;
