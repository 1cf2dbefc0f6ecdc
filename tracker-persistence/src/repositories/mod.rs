pub mod game_repository;
pub mod player_repository;
pub mod shot_repository;
pub mod team_repository;

pub use game_repository::GameRepository;
pub use player_repository::PlayerRepository;
pub use shot_repository::ShotRepository;
pub use team_repository::TeamRepository;
