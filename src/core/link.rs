use serde::{Deserialize, Serialize};

/// A genome-to-genome alignment correspondence between a reference region and
/// a query region.
///
/// Coordinates are taken as-is from the link file, signed as written;
/// `start <= end` is not enforced, so inverted alignments keep their
/// orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub ref_name: String,
    pub ref_start: i64,
    pub ref_end: i64,
    pub query_name: String,
    pub query_start: i64,
    pub query_end: i64,
    /// Percent identity as reported by the aligner
    pub identity: f64,
}

impl Link {
    pub fn new(
        ref_name: impl Into<String>,
        ref_start: i64,
        ref_end: i64,
        query_name: impl Into<String>,
        query_start: i64,
        query_end: i64,
        identity: f64,
    ) -> Self {
        Self {
            ref_name: ref_name.into(),
            ref_start,
            ref_end,
            query_name: query_name.into(),
            query_start,
            query_end,
            identity,
        }
    }

    /// Aligned span on the reference sequence
    #[must_use]
    pub fn ref_length(&self) -> u64 {
        self.ref_start.abs_diff(self.ref_end)
    }

    /// Aligned span on the query sequence
    #[must_use]
    pub fn query_length(&self) -> u64 {
        self.query_start.abs_diff(self.query_end)
    }

    /// True when reference and query regions run in opposite directions
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        (self.ref_start > self.ref_end) != (self.query_start > self.query_end)
    }
}
