// College football data feeds: season records and preseason rankings from
// the CollegeFootballData API, plus the preseason-rank CSV import.

pub mod client;
pub mod error;
pub mod provider;
pub mod ranks_csv;
pub mod rankings;
pub mod records;

pub use client::CfbdClient;
pub use error::FeedError;
pub use provider::SportsDataProvider;
