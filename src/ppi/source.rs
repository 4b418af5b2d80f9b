use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::ppi::LoadError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/jahnaviP05/protein-protein-database/main/cleaned_interactions.csv";

/// Where the interaction table comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    pub(super) fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            Self::Path(path) => fs::read(path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            }),
            Self::Url(url) => fetch_url(url),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

fn fetch_url(url: &str) -> Result<Vec<u8>, LoadError> {
    let fetch_error = |error: reqwest::Error| LoadError::Fetch {
        url: url.to_owned(),
        reason: error.to_string(),
    };

    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_error)?;
    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes())
        .map_err(fetch_error)?;

    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    #[test]
    fn urls_and_paths_are_told_apart() {
        assert_eq!(
            DataSource::parse(" https://example.org/ppi.csv "),
            DataSource::Url("https://example.org/ppi.csv".to_owned())
        );
        assert_eq!(
            DataSource::parse("data/ppi.csv"),
            DataSource::Path(PathBuf::from("data/ppi.csv"))
        );
    }

    /// Serves one canned HTTP response on a loopback port.
    fn serve_once(status: &str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let status = status.to_owned();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0_u8; 1024];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{address}/ppi.csv")
    }

    #[test]
    fn url_source_is_fetched_over_http() {
        let body = "Protein_A,Protein_B,combined_score\nP1,P2,0.9\n";
        let source = DataSource::parse(&serve_once("200 OK", body));

        assert_eq!(source.fetch().unwrap(), body.as_bytes());
    }

    #[test]
    fn http_error_status_is_a_fetch_error() {
        let url = serve_once("404 Not Found", "missing");
        let error = DataSource::parse(&url).fetch().unwrap_err();

        assert!(matches!(&error, LoadError::Fetch { url: failed, .. } if *failed == url));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let source = DataSource::Path(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(source.fetch(), Err(LoadError::Read { .. })));
    }
}
