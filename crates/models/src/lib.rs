//! Value types shared by the persistence layer and the HTTP API.

#[cfg(feature = "database")]
#[macro_use]
mod column;

pub mod fees;
pub mod gender;
pub mod status;
