//! Loopback HTTP responder for download tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Serves a fixed set of paths and records every request it receives.
///
/// Paths match without their query string; the recorded request keeps it.
pub struct FileServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl FileServer {
    /// Start serving `files` (path -> body) on an ephemeral loopback port
    pub fn start(files: &[(&str, &str)]) -> Self {
        let files: HashMap<String, String> = files
            .iter()
            .map(|(path, body)| ((*path).to_string(), (*body).to_string()))
            .collect();

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");

        let hits = Arc::new(AtomicUsize::new(0));
        let paths = Arc::new(Mutex::new(Vec::new()));

        let thread_hits = Arc::clone(&hits);
        let thread_paths = Arc::clone(&paths);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = respond(stream, &files, |path| {
                    thread_hits.fetch_add(1, Ordering::SeqCst);
                    thread_paths.lock().unwrap().push(path.to_string());
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/"),
            hits,
            paths,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

/// Answer one request; `record` runs before the response is written so the
/// client never observes a reply that has not been counted yet
fn respond(
    mut stream: TcpStream,
    files: &HashMap<String, String>,
    record: impl FnOnce(&str),
) -> Option<()> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let path = request_line.split_whitespace().nth(1)?.to_string();

    // Drain headers
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).ok()?;
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    record(&path);

    let route = path.split('?').next().unwrap_or_default();
    let response = match files.get(route) {
        Some(body) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            .to_string(),
    };
    stream.write_all(response.as_bytes()).ok()?;
    stream.flush().ok()?;

    Some(())
}

pub const GENBANK_A: &str = "LOCUS       toy_a  120 bp    DNA     linear   PHG\n//\n";
pub const GENBANK_B: &str = "LOCUS       toy_b  150 bp    DNA     linear   PHG\n//\n";
pub const LINK_TSV: &str = "rstart\trend\tqstart\tqend\talnlen\tmismatch\tident\trname\tqname\n\
                            100\t200\t10\t20\t.\t.\t95.5\trefA\tqueryA\n\
                            300\t400\t30\t40\t.\t.\t88.0\trefB\tqueryB\n";

/// Files of the `toy` dataset as served under `/toy/`
pub fn toy_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/toy/a.gbk", GENBANK_A),
        ("/toy/b.gbk", GENBANK_B),
        ("/toy/link.tsv", LINK_TSV),
    ]
}

pub const TOY_REGISTRY: &str = r#"{
  "version": "1.0.0",
  "datasets": [
    {"name": "toy", "files": ["a.gbk", "b.gbk", "link.tsv"]}
  ]
}"#;
