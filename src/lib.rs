pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod language;
pub mod rank;
pub mod score;
pub mod sentiment;

pub use error::{Result, ShopscoreError};
