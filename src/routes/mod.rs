use actix_web::web;

pub mod health;
pub mod league;
pub mod media;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(media::serve_image)
        .service(league::create_league)
        .service(league::list_leagues)
        .service(league::get_league)
        .service(league::add_team_to_league)
        .service(league::remove_team_from_league)
        .service(league::start_new_season)
        .service(league::generate_fixtures)
        .service(league::create_fixture)
        .service(league::list_fixtures)
        .service(league::get_game)
        .service(league::update_game_result)
        .service(league::update_team_performances)
        .service(league::update_game_status)
        .service(league::delete_game)
        .service(league::get_league_table)
        .service(league::get_top_scorers)
        .service(league::get_top_assists)
        .service(league::get_top_ratings)
        .service(league::get_team_advanced_stats)
        .service(league::get_team_of_the_week)
        .service(league::create_team)
        .service(league::get_team)
        .service(league::upload_team_image)
        .service(league::create_player)
        .service(league::get_player)
        .service(league::assign_player_to_team)
        .service(league::remove_player_from_team)
        .service(league::upload_player_image);
}
