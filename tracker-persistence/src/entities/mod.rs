pub mod prelude;

pub mod games;
pub mod players;
pub mod shots;
pub mod teams;
