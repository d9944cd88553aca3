//! Core library for the `weather` forecast viewer.
//!
//! This crate defines:
//! - Configuration & backend URL resolution
//! - Fetching and normalizing the backend's forecast list
//! - The view state (list, loading flag, error, selection) and its text rendering
//!
//! It is used by `weather-cli`, but can also be driven by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod source;
pub mod state;
pub mod view;

pub use config::Config;
pub use error::FetchError;
pub use model::Forecast;
pub use render::{RenderOptions, render_view};
pub use source::{ForecastSource, HttpForecastSource};
pub use state::{ForecastState, LoadTicket};
pub use view::ForecastView;
