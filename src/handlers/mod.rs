pub mod analytics;
pub mod chat;
pub mod historical;
pub mod live;
