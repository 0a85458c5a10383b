pub mod movies;

pub use movies::{fetch_movies, Movie, MovieFilter};
