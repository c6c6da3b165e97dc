//! Standard URL fetcher
//!
//! Handles `http`/`https` with a blocking HTTP client and `file` URLs via
//! the filesystem. Anything else is reported as unsupported; callers with
//! other schemes plug in their own [`UrlFetcher`].

use jsonschema_core::UrlFetcher;
use std::fs::File;
use std::io::{self, Read};
use url::Url;

/// [`UrlFetcher`] over HTTP(S) and local files
pub struct StandardUrlFetcher {
    client: reqwest::blocking::Client,
}

impl StandardUrlFetcher {
    /// Create a fetcher with a default HTTP client
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for StandardUrlFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlFetcher for StandardUrlFetcher {
    fn fetch(&self, url: &Url) -> io::Result<Box<dyn Read + Send>> {
        match url.scheme() {
            "http" | "https" => {
                let response = self
                    .client
                    .get(url.as_str())
                    .send()
                    .and_then(reqwest::blocking::Response::error_for_status)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                Ok(Box::new(response))
            }
            "file" => {
                let path = url.to_file_path().map_err(|()| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("not a local file URL: {url}"),
                    )
                })?;
                Ok(Box::new(File::open(path)?))
            }
            scheme => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("unsupported URL scheme: {scheme}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_url() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{\"type\": \"string\"}").expect("write");

        let url = Url::from_file_path(file.path()).expect("file URL");
        let mut stream = StandardUrlFetcher::new().fetch(&url).expect("fetch");
        let mut text = String::new();
        stream.read_to_string(&mut text).expect("read");
        assert_eq!(text, "{\"type\": \"string\"}");
    }

    #[test]
    fn test_unsupported_scheme() {
        let url = Url::parse("ftp://example.com/schema.json").expect("valid URL");
        let err = match StandardUrlFetcher::new().fetch(&url) {
            Err(e) => e,
            Ok(_) => panic!("must fail"),
        };
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_missing_file() {
        let url = Url::parse("file:///no/such/schema.json").expect("valid URL");
        assert!(StandardUrlFetcher::new().fetch(&url).is_err());
    }
}
