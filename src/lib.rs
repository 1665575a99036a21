pub mod analytics;
pub mod chat;
pub mod clients;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod utils;
