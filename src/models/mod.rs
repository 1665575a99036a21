pub mod cache;
pub mod dataset;
pub mod error;
pub mod race;
pub mod session;
