pub mod membership;
pub mod results;
pub mod schedule;
pub mod seasons;
pub mod stats;
pub mod streaks;
pub mod table;
pub mod team_of_week;
