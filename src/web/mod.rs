//! Local web server for assembled viewer pages.
//!
//! The page produced by [`crate::viewer`] is self-contained; serving it is a
//! convenience for remote machines and for opening it straight in a browser.
//!
//! ## Starting the Server
//!
//! ```text
//! # Serve a figure with its metadata on the default port 8080
//! genomeviz-kit serve --svg figure.svg --features features.json --links links.json
//!
//! # Custom port and auto-open browser
//! genomeviz-kit serve --svg figure.svg --port 3000 --open
//! ```
//!
//! ## Endpoints
//!
//! - `GET /` - The viewer page
//! - `GET /health` - Status and version as JSON

pub mod server;
