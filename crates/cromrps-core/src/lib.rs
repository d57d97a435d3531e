//! CromRPS Core Library
//!
//! This crate provides shared types, errors, and configuration for CromRPS.

pub mod config;
pub mod error;
pub mod types;

pub use config::BrowserConfig;
pub use error::{CromError, CromResult};
pub use types::LinkId;

/// Text shown by the "About" action.
pub const ABOUT: &str = "CromRPS\n\
An extremely barebones web browser using a simple html renderer.\n\
Uses a custom user agent so that certain websites display.\n\
Not intended for anything more than Wikipedia or similar pages.";
