//! Shared types and models for the Ferry ETA Service
//!
//! This crate contains the types that make up the `/ferry_weather`
//! response and the payload exchanged with the reasoning service.

pub mod models;

pub use models::*;
