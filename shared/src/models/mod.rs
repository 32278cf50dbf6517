//! Domain models for the Ferry ETA Service

mod dock;
mod eta;
mod vessel;
mod weather;

pub use dock::*;
pub use eta::*;
pub use vessel::*;
pub use weather::*;
