//! Parsers for genome-to-genome link files.
//!
//! A link file is tab-separated with one header line followed by one
//! alignment per row. Column roles are fixed:
//!
//! | Column | Contents |
//! |--------|----------|
//! | 0      | Reference start |
//! | 1      | Reference end |
//! | 2      | Query start |
//! | 3      | Query end |
//! | 6      | Percent identity |
//! | 7      | Reference name |
//! | 8      | Query name |
//!
//! Columns 4 and 5 are ignored, as is anything after column 8.
//!
//! ## Example
//!
//! ```rust,no_run
//! use genomeviz_kit::parsing::links::parse_link_file;
//! use std::path::Path;
//!
//! let links = parse_link_file(Path::new("link.tsv")).unwrap();
//! for link in &links {
//!     println!("{} -> {}: {:.1}%", link.ref_name, link.query_name, link.identity);
//! }
//! ```

pub mod links;
