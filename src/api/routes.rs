// API route configuration

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::dashboard))
        .route("/health", web::get().to(handlers::health_check))
        .route("/api/movies", web::get().to(handlers::list_movies))
        // Query strings (cache busters) never reach the matcher
        .service(
            web::scope("/plots")
                .route(
                    "/avg_rating_by_genre.png",
                    web::get().to(handlers::avg_rating_by_genre),
                )
                .route(
                    "/movie_count_by_genre.png",
                    web::get().to(handlers::movie_count_by_genre),
                )
                .route(
                    "/rating_distribution_by_genre.png",
                    web::get().to(handlers::rating_distribution_by_genre),
                )
                .route(
                    "/heatmap_avg_rating.png",
                    web::get().to(handlers::heatmap_avg_rating),
                ),
        );
}
