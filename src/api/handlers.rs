// HTTP request handlers for the dashboard, listing and chart endpoints

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use tracing::error;

use crate::analysis;
use crate::api::dashboard::DASHBOARD_HTML;
use crate::api::models::{ErrorResponse, HealthResponse};
use crate::charts::ChartKind;
use crate::database_ops::{fetch_movies, MovieFilter};
use crate::error::AppError;
use crate::util::db::Db;

/// Dashboard page embedding the four charts
pub async fn dashboard() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(DASHBOARD_HTML)
}

/// Liveness only; never touches the database.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy())
}

/// Every movie, ordered by id
pub async fn list_movies(db: web::Data<Db>) -> HttpResponse {
    match fetch_movies(&db, MovieFilter::All).await {
        Ok(movies) => HttpResponse::Ok().json(movies),
        Err(e) => {
            error!(route = "/api/movies", error = %e, "movie listing failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

pub async fn avg_rating_by_genre(db: web::Data<Db>) -> HttpResponse {
    plot_response(&db, ChartKind::AvgRatingByGenre).await
}

pub async fn movie_count_by_genre(db: web::Data<Db>) -> HttpResponse {
    plot_response(&db, ChartKind::MovieCountByGenre).await
}

pub async fn rating_distribution_by_genre(db: web::Data<Db>) -> HttpResponse {
    plot_response(&db, ChartKind::RatingDistributionByGenre).await
}

pub async fn heatmap_avg_rating(db: web::Data<Db>) -> HttpResponse {
    plot_response(&db, ChartKind::HeatmapAvgRating).await
}

async fn plot_response(db: &Db, kind: ChartKind) -> HttpResponse {
    match render_plot(db, kind).await {
        Ok(png) => HttpResponse::Ok().content_type(ContentType::png()).body(png),
        Err(e) => {
            error!(chart = kind.file_name(), error = %e, "plot generation failed");
            plot_error(&e)
        }
    }
}

pub(crate) fn plot_error(e: &AppError) -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body(format!("Error generating plot: {e}"))
}

/// Fetch the rows, then aggregate and draw on the blocking pool.
async fn render_plot(db: &Db, kind: ChartKind) -> Result<Vec<u8>, AppError> {
    let movies = fetch_movies(db, kind.filter()).await?;
    web::block(move || analysis::render(kind, &movies))
        .await
        .map_err(|e| AppError::Worker(e.to_string()))?
}
