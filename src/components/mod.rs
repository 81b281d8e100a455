//! The two visualization components.

pub mod globe;
pub mod network;
