use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::viewer::assets::ViewerAssets;

/// Replaced by the SVG figure
pub const SVG_FIG_PLACEHOLDER: &str = "$PGV_SVG_FIG";
/// Replaced by the crate version
pub const VERSION_PLACEHOLDER: &str = "$VERSION";
/// Replaced by the generation time
pub const DATETIME_PLACEHOLDER: &str = "$DATETIME_NOW";
/// Replaced by the concatenated stylesheets
pub const CSS_PLACEHOLDER: &str = "/*$CSS_CONTENTS*/";
/// Replaced by the concatenated scripts
pub const JS_PLACEHOLDER: &str = "/*$JS_CONTENTS*/";
/// Marker in the scripts replaced by the feature metadata
pub const FEATURES_MARKER: &str = "FEATURES_JSON = {}";
/// Marker in the scripts replaced by the link metadata
pub const LINKS_MARKER: &str = "LINKS_JSON = {}";

/// Format of the embedded generation time
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Version string embedded in generated pages
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Group id -> metadata object of one rendered feature or link.
///
/// Kept in insertion order, so the page lists groups as the caller gave them.
pub type GidMap = serde_json::Map<String, serde_json::Value>;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error(
        "Failed to build HTML viewer: group id '{0}' not found in the figure. \
         Regenerate the figure with fast rendering disabled so group ids are embedded."
    )]
    MissingGroupId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize viewer metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Check that every feature group id is present as an element id in the figure.
///
/// A figure rendered in fast mode carries no per-group ids, so the viewer
/// would have nothing to attach metadata to.
///
/// # Errors
///
/// Returns `ViewerError::MissingGroupId` naming the first missing id.
pub fn check_group_ids(svg_figure: &str, features: &GidMap) -> Result<(), ViewerError> {
    if features.is_empty() {
        return Ok(());
    }

    let ids = svg_element_ids(svg_figure);
    match features.keys().find(|gid| !ids.contains(gid.as_str())) {
        Some(gid) => Err(ViewerError::MissingGroupId(gid.clone())),
        None => Ok(()),
    }
}

/// Collect the values of all `id="..."` / `id='...'` attributes.
///
/// Whitespace is allowed around `=`, as XML permits.
fn svg_element_ids(svg: &str) -> HashSet<&str> {
    let mut ids = HashSet::new();
    let mut rest = svg;

    while let Some(pos) = rest.find("id") {
        let is_attribute = rest[..pos].ends_with(|c: char| c.is_ascii_whitespace());
        let after = &rest[pos + 2..];
        rest = after;

        if !is_attribute {
            continue;
        }
        let Some(value) = after.trim_start().strip_prefix('=') else {
            continue;
        };
        let value = value.trim_start();
        if let Some(quote @ ('"' | '\'')) = value.chars().next() {
            let value = &value[1..];
            if let Some(end) = value.find(quote) {
                ids.insert(&value[..end]);
                rest = &value[end + 1..];
            }
        }
    }

    ids
}

/// Comment out ES module imports, which are invalid in an inline script
fn comment_out_imports(js: &str) -> String {
    js.split('\n')
        .map(|line| {
            if line.starts_with("import ") {
                format!("// {line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize with 4-space indentation.
///
/// `</` is written as `<\/` so a metadata string can never close the
/// surrounding `<script>` element; both spellings decode to the same JSON.
fn to_script_json<T: Serialize>(value: &T) -> Result<String, ViewerError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    let json = String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(json.replace("</", "<\\/"))
}

impl ViewerAssets {
    /// Build a standalone viewer page stamped with the current local time.
    ///
    /// # Errors
    ///
    /// See [`ViewerAssets::assemble_at`].
    pub fn assemble(
        &self,
        svg_figure: &str,
        features: &GidMap,
        links: &GidMap,
    ) -> Result<String, ViewerError> {
        self.assemble_at(svg_figure, features, links, chrono::Local::now().naive_local())
    }

    /// Build a standalone viewer page stamped with `generated_at`.
    ///
    /// Substitution is literal: the figure, version and timestamp replace
    /// their placeholders in the template, then the stylesheets and the
    /// scripts (with both metadata maps inserted as JSON) are inlined.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::MissingGroupId` if a feature group id does not
    /// occur in the figure, or `ViewerError::Json` if metadata cannot be
    /// serialized.
    pub fn assemble_at(
        &self,
        svg_figure: &str,
        features: &GidMap,
        links: &GidMap,
        generated_at: NaiveDateTime,
    ) -> Result<String, ViewerError> {
        check_group_ids(svg_figure, features)?;

        let js = comment_out_imports(&self.js_contents())
            .replace(
                FEATURES_MARKER,
                &format!("FEATURES_JSON = {}", to_script_json(features)?),
            )
            .replace(
                LINKS_MARKER,
                &format!("LINKS_JSON = {}", to_script_json(links)?),
            );

        debug!(
            "Assembling viewer: {} features, {} links, {} bytes of SVG",
            features.len(),
            links.len(),
            svg_figure.len()
        );

        Ok(self
            .template
            .replace(SVG_FIG_PLACEHOLDER, &format!("\n{svg_figure}"))
            .replace(VERSION_PLACEHOLDER, VERSION)
            .replace(
                DATETIME_PLACEHOLDER,
                &generated_at.format(DATETIME_FORMAT).to_string(),
            )
            .replace(CSS_PLACEHOLDER, &self.css_contents())
            .replace(JS_PLACEHOLDER, &js))
    }
}

/// Build a standalone viewer page from the bundled assets.
///
/// # Errors
///
/// See [`ViewerAssets::assemble_at`].
pub fn setup_viewer_html(
    svg_figure: &str,
    features: &GidMap,
    links: &GidMap,
) -> Result<String, ViewerError> {
    ViewerAssets::embedded().assemble(svg_figure, features, links)
}

/// Build a viewer page from the bundled assets and write it to `path`.
///
/// # Errors
///
/// See [`setup_viewer_html`]; also returns `ViewerError::Io` if the file
/// cannot be written.
pub fn write_viewer_html(
    path: &Path,
    svg_figure: &str,
    features: &GidMap,
    links: &GidMap,
) -> Result<(), ViewerError> {
    let html = setup_viewer_html(svg_figure, features, links)?;
    std::fs::write(path, html)?;
    Ok(())
}
