use std::collections::HashSet;
use std::path::Path;

const GENBANK_EXTENSIONS: &[&str] = &["gb", "gbk", "gbff"];

const TEMPLATE_PLACEHOLDERS: &[&str] = &[
    "$PGV_SVG_FIG",
    "$VERSION",
    "$DATETIME_NOW",
    "/*$CSS_CONTENTS*/",
    "/*$JS_CONTENTS*/",
];

const SCRIPT_MARKERS: &[&str] = &["FEATURES_JSON = {}", "LINKS_JSON = {}"];

fn main() {
    let registry_path = Path::new("assets/datasets.json");
    validate_registry_file(registry_path);
    validate_viewer_assets(Path::new("assets/viewer"));
    set_build_dependencies();
}

fn read_asset(path: &Path) -> String {
    // Ensure asset exists at build time
    assert!(
        path.exists(),
        "\n\nASSET BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the file before building.\n",
        path.display()
    );

    std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\nASSET BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    })
}

fn validate_registry_file(registry_path: &Path) {
    let contents = read_asset(registry_path);

    // Parse and validate JSON
    let registry: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nREGISTRY BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            registry_path.display()
        );
    });

    assert!(
        registry.is_object(),
        "\n\nREGISTRY BUILD ERROR: Root must be a JSON object\n\
         Got: {registry}\n"
    );

    let datasets = registry
        .get("datasets")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!(
                "\n\nREGISTRY BUILD ERROR: Missing 'datasets' array\n\
                 The registry must have a top-level 'datasets' array.\n"
            );
        });

    let mut names = HashSet::new();
    let mut total_files = 0;
    for (i, dataset) in datasets.iter().enumerate() {
        let name = dataset
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| {
                panic!("\n\nREGISTRY BUILD ERROR: Dataset at index {i} missing 'name' field\n");
            });

        assert!(
            names.insert(name.to_string()),
            "\n\nREGISTRY BUILD ERROR: Dataset '{name}' is listed more than once\n"
        );
        assert_safe_name(name, name);

        total_files += validate_dataset_files(dataset, name);
    }

    println!(
        "cargo:warning=Validated dataset registry: {} datasets, {total_files} files",
        datasets.len()
    );
}

fn validate_dataset_files(dataset: &serde_json::Value, name: &str) -> usize {
    let files = dataset
        .get("files")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!("\n\nREGISTRY BUILD ERROR: Dataset '{name}' missing 'files' array\n");
        });

    assert!(
        !files.is_empty(),
        "\n\nREGISTRY BUILD ERROR: Dataset '{name}' lists no files\n"
    );

    let mut link_files = 0;
    for file in files {
        let file = file.as_str().unwrap_or_else(|| {
            panic!("\n\nREGISTRY BUILD ERROR: Dataset '{name}' has a non-string file entry\n");
        });
        assert_safe_name(name, file);

        let is_genbank = Path::new(file)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| GENBANK_EXTENSIONS.contains(&ext));
        if !is_genbank {
            link_files += 1;
        }
    }

    assert!(
        link_files <= 1,
        "\n\nREGISTRY BUILD ERROR: Dataset '{name}' lists {link_files} link files\n\
         At most one non-GenBank file is allowed per dataset.\n"
    );

    files.len()
}

fn assert_safe_name(dataset: &str, name: &str) {
    let safe = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');

    assert!(
        safe,
        "\n\nREGISTRY BUILD ERROR: Dataset '{dataset}' has unsafe name '{name}'\n\
         Names may only contain [A-Za-z0-9._-] and must not start with '.' or contain '..'.\n"
    );
}

fn validate_viewer_assets(dir: &Path) {
    let template = read_asset(&dir.join("viewer-template.html"));
    for placeholder in TEMPLATE_PLACEHOLDERS {
        assert!(
            template.contains(placeholder),
            "\n\nVIEWER BUILD ERROR: Template missing placeholder '{placeholder}'\n"
        );
    }

    // Exactly one generation timestamp per page
    assert_eq!(
        template.matches("$DATETIME_NOW").count(),
        1,
        "\n\nVIEWER BUILD ERROR: '$DATETIME_NOW' must appear exactly once in the template\n"
    );

    read_asset(&dir.join("viewer.css"));
    let script = read_asset(&dir.join("viewer.js"));
    for marker in SCRIPT_MARKERS {
        assert!(
            script.contains(marker),
            "\n\nVIEWER BUILD ERROR: viewer.js missing marker '{marker}'\n"
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if embedded assets change
    println!("cargo:rerun-if-changed=assets/datasets.json");
    println!("cargo:rerun-if-changed=assets/viewer");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
