pub mod fixture_queries;
pub mod game_queries;
pub mod league_queries;
pub mod player_queries;
pub mod stats_queries;
pub mod team_queries;
