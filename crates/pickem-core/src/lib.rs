// Pick'em engine: tier classification, scoring, pick validation,
// leaderboards, and the persistence layer they read from.

pub mod config;
pub mod db;
pub mod leaderboard;
pub mod model;
pub mod scoring;
pub mod store;
pub mod tier;
pub mod validate;
