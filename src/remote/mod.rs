//! Remote record retrieval.
//!
//! - [`entrez`]: GenBank records from the NCBI nucleotide database via efetch

pub mod entrez;

pub use entrez::{fetch_genbank, EfetchRequest, FetchError, GenbankStream};
