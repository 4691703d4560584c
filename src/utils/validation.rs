//! Centralized validation helpers for names that end up in paths and URLs.

/// Longest file name accepted from a dataset registry
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Longest accession id accepted by the GenBank fetcher
pub const MAX_ACCESSION_LENGTH: usize = 64;

/// Validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename '{0}': contains path traversal or invalid characters")]
    InvalidFilename(String),
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("Invalid accession id '{0}'")]
    InvalidAccession(String),
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'
}

/// Validate a bare file name before it is joined onto a cache directory or a
/// remote URL.
///
/// Unlike an upload sanitizer this never rewrites the name: the registry entry
/// is used verbatim for both the local path and the download URL, so anything
/// outside `[A-Za-z0-9._-]` is rejected.
///
/// # Examples
///
/// ```
/// use genomeviz_kit::utils::validation::validate_filename;
///
/// assert!(validate_filename("JX128258.1.gbk").is_ok());
/// assert!(validate_filename("../etc/passwd").is_err());
/// assert!(validate_filename(".hidden").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the name is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains a separator, `..`, a
/// leading dot, or any other character outside the safe set.
pub fn validate_filename(filename: &str) -> Result<(), ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    // Prevent directory traversal and hidden files
    if filename.contains("..") || filename.starts_with('.') || !filename.chars().all(is_safe_char)
    {
        return Err(ValidationError::InvalidFilename(filename.to_string()));
    }

    Ok(())
}

/// Validate a nucleotide accession id (e.g. `JX128258.1`, `NC_000913.3`).
///
/// Only a single id is accepted; comma-separated id lists are rejected.
///
/// # Errors
///
/// Returns `ValidationError::InvalidAccession` if the id is empty, too long,
/// or contains characters outside `[A-Za-z0-9._-]`.
pub fn validate_accession(accession: &str) -> Result<(), ValidationError> {
    if accession.is_empty()
        || accession.len() > MAX_ACCESSION_LENGTH
        || !accession.chars().all(is_safe_char)
    {
        return Err(ValidationError::InvalidAccession(accession.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("link.tsv").is_ok());
        assert!(validate_filename("MH051335.1.gbk").is_ok());
        assert!(validate_filename("my_file-2.gbff").is_ok());

        assert_eq!(validate_filename(""), Err(ValidationError::EmptyFilename));
        assert_eq!(validate_filename("   "), Err(ValidationError::EmptyFilename));
        assert!(matches!(
            validate_filename("../link.tsv"),
            Err(ValidationError::InvalidFilename(_))
        ));
        assert!(validate_filename("sub/link.tsv").is_err());
        assert!(validate_filename("sub\\link.tsv").is_err());
        assert!(validate_filename(".link.tsv").is_err());
        assert!(validate_filename("link tsv").is_err());
        assert!(validate_filename("link\0.tsv").is_err());
        assert_eq!(
            validate_filename(&"a".repeat(MAX_FILENAME_LENGTH + 1)),
            Err(ValidationError::FilenameTooLong)
        );
    }

    #[test]
    fn test_validate_accession() {
        assert!(validate_accession("JX128258.1").is_ok());
        assert!(validate_accession("NC_000913.3").is_ok());
        assert!(validate_accession("").is_err());
        assert!(validate_accession("JX128258.1,MH051335.1").is_err());
        assert!(validate_accession("JX128258 1").is_err());
        assert!(validate_accession("id&rettype=xml").is_err());
        assert!(validate_accession(&"A".repeat(MAX_ACCESSION_LENGTH + 1)).is_err());
    }
}
