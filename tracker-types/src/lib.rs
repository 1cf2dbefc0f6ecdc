pub mod game;
pub mod shot;
pub mod team;
pub mod user;

// Re-export all types
pub use game::*;
pub use shot::*;
pub use team::*;
pub use user::*;
