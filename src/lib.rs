pub mod batting_order;
pub mod config;
pub mod delivery;
pub mod error;
pub mod free_hit;
pub mod innings;
pub mod match_engine;
pub mod over;
pub mod report;
pub mod roster;
pub mod scorer;
pub mod server;
pub mod signal;
pub mod state;
pub mod store;
pub mod strike;
pub mod types;

pub use delivery::DeliveryRequest;
pub use error::ScoringError;
pub use match_engine::{Match, MatchPhase, MatchResult, Winner};

#[cfg(test)]
mod tests;
