pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod report;

pub use error::PartnerModelError;
