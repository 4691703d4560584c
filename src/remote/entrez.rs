use std::io::{BufRead, BufReader, Read};
use thiserror::Error;
use tracing::debug;

use crate::utils::validation::{validate_accession, ValidationError};

/// NCBI E-utilities efetch endpoint
pub const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Value of the `tool` parameter NCBI asks clients to send
pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    InvalidAccession(#[from] ValidationError),

    #[error("GenBank fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One efetch call for a single nucleotide record in GenBank format.
///
/// The contact email travels with the request, so concurrent fetches with
/// different emails never interfere.
///
/// ```rust,no_run
/// use genomeviz_kit::remote::entrez::EfetchRequest;
///
/// let text = EfetchRequest::new("JX128258.1")
///     .with_email("me@example.org")
///     .send()
///     .and_then(|stream| stream.into_string())
///     .unwrap();
/// assert!(text.starts_with("LOCUS"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EfetchRequest {
    accession: String,
    email: Option<String>,
    tool: String,
    endpoint: String,
}

impl EfetchRequest {
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            email: None,
            tool: TOOL_NAME.to_string(),
            endpoint: EFETCH_URL.to_string(),
        }
    }

    /// Contact email NCBI uses to reach heavy users before blocking them.
    /// An empty string is treated as no email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.email = (!email.trim().is_empty()).then_some(email);
        self
    }

    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Query parameters sent to efetch
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("db", "nucleotide"),
            ("id", self.accession.as_str()),
            ("rettype", "gbwithparts"),
            ("retmode", "text"),
            ("tool", self.tool.as_str()),
        ];
        if let Some(email) = &self.email {
            params.push(("email", email.as_str()));
        }
        params
    }

    /// Build the HTTP request without sending it.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidAccession` for a malformed accession, or
    /// `FetchError::Http` if the endpoint is not a valid URL.
    pub fn build(
        &self,
        client: &reqwest::blocking::Client,
    ) -> Result<reqwest::blocking::Request, FetchError> {
        validate_accession(&self.accession)?;
        Ok(client
            .get(&self.endpoint)
            .query(&self.query_params())
            .build()?)
    }

    /// Perform the fetch and return the record as a text stream.
    ///
    /// Nothing is cached; every call goes to the network.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidAccession` before any network access for a
    /// malformed accession, or `FetchError::Http` carrying the underlying
    /// transport or HTTP status error.
    pub fn send(&self) -> Result<GenbankStream, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let request = self.build(&client)?;
        debug!("efetch {}", request.url());

        let response = client.execute(request)?.error_for_status()?;
        Ok(GenbankStream {
            inner: BufReader::new(response),
        })
    }
}

/// Fetch a GenBank record by accession id.
///
/// # Errors
///
/// See [`EfetchRequest::send`].
pub fn fetch_genbank(accession: &str, email: Option<&str>) -> Result<GenbankStream, FetchError> {
    let mut request = EfetchRequest::new(accession);
    if let Some(email) = email {
        request = request.with_email(email);
    }
    request.send()
}

/// Streaming body of an efetch response
pub struct GenbankStream {
    inner: BufReader<reqwest::blocking::Response>,
}

impl GenbankStream {
    /// Read the whole record into a string
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Io` if the body cannot be read or is not UTF-8.
    pub fn into_string(mut self) -> Result<String, FetchError> {
        let mut text = String::new();
        self.inner.read_to_string(&mut text)?;
        Ok(text)
    }
}

impl Read for GenbankStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for GenbankStream {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}
