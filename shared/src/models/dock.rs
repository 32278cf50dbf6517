//! Dock registry models

use serde::{Deserialize, Serialize};

/// A named, fixed geographic point vessels are expected to approach.
///
/// The registry is populated once at process start and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DockLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl DockLocation {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}
