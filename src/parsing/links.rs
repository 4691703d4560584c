use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::core::link::Link;

/// Column holding the reference start coordinate
pub const COL_REF_START: usize = 0;
/// Column holding the reference end coordinate
pub const COL_REF_END: usize = 1;
/// Column holding the query start coordinate
pub const COL_QUERY_START: usize = 2;
/// Column holding the query end coordinate
pub const COL_QUERY_END: usize = 3;
/// Column holding the percent identity
pub const COL_IDENTITY: usize = 6;
/// Column holding the reference sequence name
pub const COL_REF_NAME: usize = 7;
/// Column holding the query sequence name
pub const COL_QUERY_NAME: usize = 8;

/// Minimum number of tab-separated columns in a data row
pub const MIN_COLUMNS: usize = COL_QUERY_NAME + 1;

#[derive(Error, Debug)]
pub enum LinkParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Link file is empty, expected a header line")]
    MissingHeader,

    #[error("Line {line} has {found} columns, expected at least {MIN_COLUMNS}")]
    MissingColumn { line: usize, found: usize },

    #[error("Invalid integer in column {column} on line {line}: '{value}'")]
    InvalidInteger {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("Invalid identity in column {column} on line {line}: '{value}'")]
    InvalidFloat {
        line: usize,
        column: usize,
        value: String,
    },
}

/// Parse a genome-to-genome link file.
///
/// Files ending in `.gz` are decompressed on the fly.
///
/// # Errors
///
/// Returns `LinkParseError::Io` if the file cannot be read, or one of the row
/// errors described in [`parse_link_reader`].
pub fn parse_link_file(path: &Path) -> Result<Vec<Link>, LinkParseError> {
    let file = std::fs::File::open(path)?;

    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if is_gzipped {
        parse_link_reader(GzDecoder::new(file))
    } else {
        parse_link_reader(file)
    }
}

/// Parse link text held in memory.
///
/// # Errors
///
/// See [`parse_link_reader`].
pub fn parse_link_text(text: &str) -> Result<Vec<Link>, LinkParseError> {
    parse_link_reader(text.as_bytes())
}

/// Parse tab-separated link rows from a reader.
///
/// The first line is a header and is always skipped. Empty lines are ignored;
/// every other line, including one made only of whitespace, must have at
/// least [`MIN_COLUMNS`] columns.
///
/// # Errors
///
/// Returns `LinkParseError::MissingHeader` if there is not even a header
/// line, `LinkParseError::MissingColumn` for short rows, and
/// `LinkParseError::InvalidInteger` / `LinkParseError::InvalidFloat` when a
/// coordinate or the identity does not parse.
pub fn parse_link_reader<R: Read>(reader: R) -> Result<Vec<Link>, LinkParseError> {
    let mut lines = BufReader::new(reader).lines();
    lines.next().ok_or(LinkParseError::MissingHeader)??;

    let mut links = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        // 1-based, counting the header
        links.push(parse_link_row(line, i + 2)?);
    }

    Ok(links)
}

fn parse_link_row(line: &str, line_num: usize) -> Result<Link, LinkParseError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() < MIN_COLUMNS {
        return Err(LinkParseError::MissingColumn {
            line: line_num,
            found: fields.len(),
        });
    }

    let coord = |column: usize| -> Result<i64, LinkParseError> {
        let value = fields[column].trim();
        value.parse().map_err(|_| LinkParseError::InvalidInteger {
            line: line_num,
            column,
            value: value.to_string(),
        })
    };

    let ref_start = coord(COL_REF_START)?;
    let ref_end = coord(COL_REF_END)?;
    let query_start = coord(COL_QUERY_START)?;
    let query_end = coord(COL_QUERY_END)?;

    let identity_text = fields[COL_IDENTITY].trim();
    let identity: f64 = identity_text
        .parse()
        .map_err(|_| LinkParseError::InvalidFloat {
            line: line_num,
            column: COL_IDENTITY,
            value: identity_text.to_string(),
        })?;

    Ok(Link::new(
        fields[COL_REF_NAME],
        ref_start,
        ref_end,
        fields[COL_QUERY_NAME],
        query_start,
        query_end,
        identity,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "rstart\trend\tqstart\tqend\talnlen\tmismatch\tident\trname\tqname\n";

    #[test]
    fn test_parse_link_text() {
        let text = format!(
            "{HEADER}100\t200\t10\t20\t.\t.\t95.5\trefA\tqueryA\n\
             300\t400\t30\t40\t.\t.\t88.0\trefB\tqueryB\n"
        );

        let links = parse_link_text(&text).unwrap();
        assert_eq!(
            links,
            vec![
                Link::new("refA", 100, 200, "queryA", 10, 20, 95.5),
                Link::new("refB", 300, 400, "queryB", 30, 40, 88.0),
            ]
        );
    }

    #[test]
    fn test_header_only() {
        let links = parse_link_text(HEADER).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_header_is_always_skipped() {
        // A numeric first line is still treated as the header
        let text = "1\t2\t3\t4\t.\t.\t99.0\ta\tb\n5\t6\t7\t8\t.\t.\t90.0\tc\td\n";
        let links = parse_link_text(text).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].ref_name, "c");
    }

    #[test]
    fn test_extra_columns_and_crlf() {
        let text = format!("{HEADER}1\t2\t3\t4\t.\t.\t99.0\ta\tb\textra\r\n\n5\t6\t7\t8\t.\t.\t90\tc\td\r\n");
        let links = parse_link_text(&text).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].query_name, "b");
        assert_eq!(links[1].query_name, "d");
        assert!((links[1].identity - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_numeric_start() {
        let text = format!("{HEADER}abc\t200\t10\t20\t.\t.\t95.5\trefA\tqueryA\n");
        let err = parse_link_text(&text).unwrap_err();
        assert!(matches!(
            err,
            LinkParseError::InvalidInteger {
                line: 2,
                column: COL_REF_START,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_identity() {
        let text = format!("{HEADER}1\t2\t3\t4\t.\t.\thigh\ta\tb\n");
        let err = parse_link_text(&text).unwrap_err();
        assert!(matches!(err, LinkParseError::InvalidFloat { line: 2, .. }));
    }

    #[test]
    fn test_negative_coordinate() {
        let text = format!("{HEADER}-1\t2\t3\t4\t.\t.\t99\ta\tb\n");
        let links = parse_link_text(&text).unwrap();
        assert_eq!(links, vec![Link::new("a", -1, 2, "b", 3, 4, 99.0)]);
    }

    #[test]
    fn test_whitespace_only_row_is_an_error() {
        let text = format!("{HEADER}100\t200\t10\t20\t.\t.\t95.5\tA\tB\n\t\t\t\t\t\t\t\t\n");
        let err = parse_link_text(&text).unwrap_err();
        match err {
            LinkParseError::InvalidInteger {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, COL_REF_START);
                assert_eq!(value, "");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_link_text(&format!("{HEADER}   \n")).unwrap_err();
        assert!(matches!(err, LinkParseError::MissingColumn { line: 2, found: 1 }));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let err = parse_link_text("").unwrap_err();
        assert!(matches!(err, LinkParseError::MissingHeader));
    }

    #[test]
    fn test_short_row() {
        let text = format!("{HEADER}100\t200\t10\t20\t.\t.\t95.5\trefA\n");
        let err = parse_link_text(&text).unwrap_err();
        assert!(matches!(
            err,
            LinkParseError::MissingColumn { line: 2, found: 8 }
        ));
        assert!(err.to_string().contains("expected at least 9"));
    }

    #[test]
    fn test_parse_link_file_plain_and_gzipped() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use tempfile::NamedTempFile;

        let text = format!("{HEADER}100\t200\t10\t20\t.\t.\t95.5\trefA\tqueryA\n");

        let mut plain = NamedTempFile::with_suffix(".tsv").unwrap();
        plain.write_all(text.as_bytes()).unwrap();
        let links = parse_link_file(plain.path()).unwrap();
        assert_eq!(links.len(), 1);

        let gz = NamedTempFile::with_suffix(".tsv.gz").unwrap();
        let mut encoder = GzEncoder::new(gz.as_file(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap();
        let gz_links = parse_link_file(gz.path()).unwrap();
        assert_eq!(gz_links, links);
    }

    #[test]
    fn test_parse_link_file_missing() {
        let err = parse_link_file(Path::new("/nonexistent/link.tsv")).unwrap_err();
        assert!(matches!(err, LinkParseError::Io(_)));
    }
}
