pub mod analysis;
pub mod api;
pub mod charts;
pub mod database_ops;
pub mod error;
pub mod normalization;
pub mod stats;
pub mod tracing;

pub mod util {
    pub mod db;
    pub mod env;
}

pub use error::AppError;
