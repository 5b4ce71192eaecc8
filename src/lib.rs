//! One-click application onboarding — terminal wizard client.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod status;
pub mod term;
pub mod token;
pub mod wizard;
