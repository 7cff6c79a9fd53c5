//! Client core for Style Sage
//!
//! # Modules
//!
//! - `api`: Backend trait and endpoint paths
//! - `config`: Start-up configuration
//! - `dashboard`: Dashboard state and the operations that change it
//! - `display`: Label fallbacks for partially described records
//! - `error`: Error types and Result alias
//! - `http`: reqwest backend (feature `http`)
//! - `types`: Records exchanged with the backend
//! - `view`: Landing/dashboard selector

pub mod api;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod types;
pub mod view;

// Re-exports
pub use api::Backend;
pub use config::{ClientConfig, RecommendationOrdering};
pub use dashboard::{Dashboard, DashboardState, DashboardStats};
pub use error::{Error, ErrorKind, Result};
#[cfg(feature = "http")]
pub use http::HttpBackend;
pub use types::*;
pub use view::{View, ViewSelector};
