//! HTTP front end for `readme-widgets`.
//!
//! Query strings are mapped onto the library's `render_*` functions; the
//! documents come back as `image/svg+xml`.

pub mod config;
pub mod routes;

pub use config::Config;
pub use routes::{AppState, router};
