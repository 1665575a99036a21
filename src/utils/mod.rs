pub mod config;
pub mod race_utils;
pub mod roster;
pub mod state;
