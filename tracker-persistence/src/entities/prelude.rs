pub use super::games::Entity as Games;
pub use super::players::Entity as Players;
pub use super::shots::Entity as Shots;
pub use super::teams::Entity as Teams;
