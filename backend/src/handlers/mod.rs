//! HTTP handlers for the Ferry ETA Service

pub mod ferry_weather;
pub mod health;

pub use ferry_weather::get_ferry_weather;
pub use health::health_check;
