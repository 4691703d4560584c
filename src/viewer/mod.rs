//! Standalone HTML viewer assembly.
//!
//! A viewer page is a single HTML file with the SVG figure, stylesheets,
//! scripts and per-group metadata all inlined, so it can be opened from disk
//! or attached to an email without any server.
//!
//! ## Template placeholders
//!
//! | Placeholder | Replaced by |
//! |-------------|-------------|
//! | `$PGV_SVG_FIG` | The SVG figure |
//! | `$VERSION` | Crate version |
//! | `$DATETIME_NOW` | Generation time, `YYYY-MM-DD HH:MM:SS` |
//! | `/*$CSS_CONTENTS*/` | Concatenated stylesheets |
//! | `/*$JS_CONTENTS*/` | Concatenated scripts |
//!
//! Inside the scripts, `FEATURES_JSON = {}` and `LINKS_JSON = {}` receive the
//! feature and link metadata keyed by group id.
//!
//! ## Example
//!
//! ```rust,no_run
//! use genomeviz_kit::viewer::{setup_viewer_html, GidMap};
//!
//! let svg = std::fs::read_to_string("figure.svg").unwrap();
//! let features: GidMap = serde_json::from_str(r#"{"gene-1": {"product": "terminase"}}"#).unwrap();
//! let html = setup_viewer_html(&svg, &features, &GidMap::new()).unwrap();
//! std::fs::write("figure.html", html).unwrap();
//! ```

pub mod assets;
pub mod html;

pub use assets::ViewerAssets;
pub use html::{check_group_ids, setup_viewer_html, write_viewer_html, GidMap, ViewerError};
