//! External API integrations

pub mod positions;
pub mod reasoning;
pub mod weather;

pub use positions::PositionFeedClient;
pub use reasoning::{EtaEstimator, ReasoningClient};
pub use weather::WeatherFeedClient;
