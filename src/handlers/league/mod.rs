pub mod fixture_handler;
pub mod game_handler;
pub mod league_handler;
pub mod player_handler;
pub mod season_handler;
pub mod stats_handler;
pub mod team_handler;
