// HTTP surface: dashboard page, movie listing and PNG chart endpoints

pub mod dashboard;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
