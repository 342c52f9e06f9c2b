pub mod game;
pub mod league;
pub mod player;
pub mod stats;
pub mod team;
