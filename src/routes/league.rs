use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::league::{
    fixture_handler, game_handler, league_handler, player_handler, season_handler, stats_handler,
    team_handler,
};
use crate::league::table::LeaderboardMetric;
use crate::models::game::{GameResultRequest, GameStatusRequest, TeamPerformanceRequest};
use crate::models::league::{
    CreateFixtureRequest, CreateLeagueRequest, GenerateFixturesRequest, LimitQuery, WindowQuery,
};
use crate::models::player::CreatePlayerRequest;
use crate::models::team::CreateTeamRequest;
use crate::services::{CacheService, StorageService};

// Leagues

#[post("/leagues")]
async fn create_league(
    request: web::Json<CreateLeagueRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    league_handler::create_league(request, pool).await
}

#[get("/leagues")]
async fn list_leagues(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    league_handler::list_leagues(pool).await
}

#[get("/leagues/{league_id}")]
async fn get_league(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    league_handler::get_league(path.into_inner(), pool, cache).await
}

#[post("/leagues/{league_id}/teams/{team_id}")]
async fn add_team_to_league(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let (league_id, team_id) = path.into_inner();
    league_handler::add_team(league_id, team_id, pool, cache).await
}

#[delete("/leagues/{league_id}/teams/{team_id}")]
async fn remove_team_from_league(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let (league_id, team_id) = path.into_inner();
    league_handler::remove_team(league_id, team_id, pool, cache).await
}

#[post("/leagues/{league_id}/seasons")]
async fn start_new_season(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    season_handler::start_new_season(path.into_inner(), pool, cache).await
}

// Fixtures

#[post("/leagues/{league_id}/fixtures/generate")]
async fn generate_fixtures(
    path: web::Path<Uuid>,
    request: web::Json<GenerateFixturesRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    fixture_handler::generate_fixtures(path.into_inner(), request, pool).await
}

#[post("/leagues/{league_id}/fixtures")]
async fn create_fixture(
    path: web::Path<Uuid>,
    request: web::Json<CreateFixtureRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    fixture_handler::create_fixture(path.into_inner(), request, pool).await
}

#[get("/leagues/{league_id}/fixtures")]
async fn list_fixtures(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    fixture_handler::list_fixtures(path.into_inner(), pool).await
}

// Games

#[get("/games/{game_id}")]
async fn get_game(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    game_handler::get_game(path.into_inner(), pool).await
}

#[put("/games/{game_id}/result")]
async fn update_game_result(
    path: web::Path<Uuid>,
    request: web::Json<GameResultRequest>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    game_handler::update_game_result(path.into_inner(), request, pool, cache).await
}

#[put("/games/{game_id}/performances")]
async fn update_team_performances(
    path: web::Path<Uuid>,
    request: web::Json<TeamPerformanceRequest>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    game_handler::update_team_performances(path.into_inner(), request, pool, cache).await
}

#[put("/games/{game_id}/status")]
async fn update_game_status(
    path: web::Path<Uuid>,
    request: web::Json<GameStatusRequest>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    game_handler::update_game_status(path.into_inner(), request, pool, cache).await
}

#[delete("/games/{game_id}")]
async fn delete_game(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    game_handler::delete_game(path.into_inner(), pool, cache).await
}

// Derived statistics

#[get("/leagues/{league_id}/table")]
async fn get_league_table(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    stats_handler::get_league_table(path.into_inner(), pool, cache).await
}

#[get("/leagues/{league_id}/stats/top-scorers")]
async fn get_top_scorers(
    path: web::Path<Uuid>,
    query: web::Query<LimitQuery>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    stats_handler::get_leaderboard(path.into_inner(), LeaderboardMetric::Goals, query, pool, cache)
        .await
}

#[get("/leagues/{league_id}/stats/top-assists")]
async fn get_top_assists(
    path: web::Path<Uuid>,
    query: web::Query<LimitQuery>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    stats_handler::get_leaderboard(
        path.into_inner(),
        LeaderboardMetric::Assists,
        query,
        pool,
        cache,
    )
    .await
}

#[get("/leagues/{league_id}/stats/top-ratings")]
async fn get_top_ratings(
    path: web::Path<Uuid>,
    query: web::Query<LimitQuery>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    stats_handler::get_leaderboard(
        path.into_inner(),
        LeaderboardMetric::AvgRating,
        query,
        pool,
        cache,
    )
    .await
}

#[get("/teams/{team_id}/advanced-stats")]
async fn get_team_advanced_stats(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    stats_handler::get_team_advanced_stats(path.into_inner(), pool).await
}

#[get("/leagues/{league_id}/team-of-the-week")]
async fn get_team_of_the_week(
    path: web::Path<Uuid>,
    query: web::Query<WindowQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    stats_handler::get_team_of_the_week(path.into_inner(), query, pool).await
}

// Teams

#[post("/teams")]
async fn create_team(
    request: web::Json<CreateTeamRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    team_handler::create_team(request, pool).await
}

#[get("/teams/{team_id}")]
async fn get_team(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    team_handler::get_team(path.into_inner(), pool).await
}

#[post("/teams/{team_id}/image")]
async fn upload_team_image(
    path: web::Path<Uuid>,
    payload: web::Bytes,
    req: HttpRequest,
    pool: web::Data<PgPool>,
    storage: web::Data<StorageService>,
) -> Result<HttpResponse, ApiError> {
    team_handler::upload_team_image(path.into_inner(), payload, req, pool, storage).await
}

// Players

#[post("/players")]
async fn create_player(
    request: web::Json<CreatePlayerRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    player_handler::create_player(request, pool).await
}

#[get("/players/{player_id}")]
async fn get_player(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    player_handler::get_player(path.into_inner(), pool).await
}

#[post("/players/{player_id}/team/{team_id}")]
async fn assign_player_to_team(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let (player_id, team_id) = path.into_inner();
    player_handler::assign_player_to_team(player_id, team_id, pool).await
}

#[delete("/players/{player_id}/team")]
async fn remove_player_from_team(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    player_handler::remove_player_from_team(path.into_inner(), pool).await
}

#[post("/players/{player_id}/image")]
async fn upload_player_image(
    path: web::Path<Uuid>,
    payload: web::Bytes,
    req: HttpRequest,
    pool: web::Data<PgPool>,
    storage: web::Data<StorageService>,
) -> Result<HttpResponse, ApiError> {
    player_handler::upload_player_image(path.into_inner(), payload, req, pool, storage).await
}
