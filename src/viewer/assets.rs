use std::path::{Path, PathBuf};

use crate::viewer::html::ViewerError;

/// File name of the template inside an asset directory
pub const TEMPLATE_FILE: &str = "viewer-template.html";

/// Subdirectory of an asset directory whose files are concatenated first
pub const LIB_DIR: &str = "lib";

/// Template document plus the CSS and JS inlined into it.
///
/// Asset order matters: stylesheets and scripts are concatenated in the order
/// they are listed, so third-party libraries must come before the code that
/// uses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerAssets {
    pub template: String,
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl ViewerAssets {
    pub fn new(template: impl Into<String>, css: Vec<String>, js: Vec<String>) -> Self {
        Self {
            template: template.into(),
            css,
            js,
        }
    }

    /// Assets bundled into the binary at compile time
    pub fn embedded() -> Self {
        // Placeholders checked at compile time by build.rs
        const TEMPLATE: &str = include_str!("../../assets/viewer/viewer-template.html");
        const CSS: &str = include_str!("../../assets/viewer/viewer.css");
        const JS: &str = include_str!("../../assets/viewer/viewer.js");

        Self::new(TEMPLATE, vec![CSS.to_string()], vec![JS.to_string()])
    }

    /// Load assets from a directory laid out like `assets/viewer/`.
    ///
    /// `viewer-template.html` is required. `.css` and `.js` files under `lib/`
    /// come first, then those at the top level; each group is sorted by file
    /// name.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::Io` if the template or any asset cannot be read.
    pub fn from_dir(dir: &Path) -> Result<Self, ViewerError> {
        let template = std::fs::read_to_string(dir.join(TEMPLATE_FILE))?;

        let mut files = Vec::new();
        let lib_dir = dir.join(LIB_DIR);
        if lib_dir.is_dir() {
            files.extend(sorted_files(&lib_dir)?);
        }
        files.extend(sorted_files(dir)?);

        let mut css = Vec::new();
        let mut js = Vec::new();
        for file in files {
            match file.extension().and_then(|e| e.to_str()) {
                Some("css") => css.push(std::fs::read_to_string(&file)?),
                Some("js") => js.push(std::fs::read_to_string(&file)?),
                _ => {}
            }
        }

        Ok(Self::new(template, css, js))
    }

    /// All stylesheets, each followed by a newline, after a leading newline
    pub fn css_contents(&self) -> String {
        concat_contents(&self.css)
    }

    /// All scripts, each followed by a newline, after a leading newline
    pub fn js_contents(&self) -> String {
        concat_contents(&self.js)
    }
}

impl Default for ViewerAssets {
    fn default() -> Self {
        Self::embedded()
    }
}

fn sorted_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn concat_contents(parts: &[String]) -> String {
    let mut contents = String::from("\n");
    for part in parts {
        contents.push_str(part);
        contents.push('\n');
    }
    contents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_assets() {
        let assets = ViewerAssets::embedded();
        assert!(assets.template.contains("$PGV_SVG_FIG"));
        assert!(assets.template.contains("/*$JS_CONTENTS*/"));
        assert_eq!(assets.css.len(), 1);
        assert!(assets.js_contents().contains("FEATURES_JSON = {}"));
        assert!(assets.js_contents().contains("LINKS_JSON = {}"));
    }

    #[test]
    fn test_concat_contents() {
        let assets = ViewerAssets::new(
            "",
            vec!["a{}".to_string(), "b{}".to_string()],
            Vec::new(),
        );
        assert_eq!(assets.css_contents(), "\na{}\nb{}\n");
        assert_eq!(assets.js_contents(), "\n");
    }

    #[test]
    fn test_from_dir_orders_lib_first() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join(LIB_DIR);
        std::fs::create_dir(&lib).unwrap();

        std::fs::write(dir.path().join(TEMPLATE_FILE), "<html>$PGV_SVG_FIG</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "app();").unwrap();
        std::fs::write(dir.path().join("app.css"), ".app{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::write(lib.join("b.min.js"), "b();").unwrap();
        std::fs::write(lib.join("a.min.js"), "a();").unwrap();
        std::fs::write(lib.join("a.min.css"), ".a{}").unwrap();

        let assets = ViewerAssets::from_dir(dir.path()).unwrap();
        assert_eq!(assets.template, "<html>$PGV_SVG_FIG</html>");
        assert_eq!(assets.css, vec![".a{}", ".app{}"]);
        assert_eq!(assets.js, vec!["a();", "b();", "app();"]);
    }

    #[test]
    fn test_from_dir_requires_template() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerAssets::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ViewerError::Io(_)));
    }
}
