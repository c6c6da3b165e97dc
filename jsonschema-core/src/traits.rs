//! Traits consumed by the validation engine

use std::io::Read;
use url::Url;

/// Strategy for turning an absolute URL into a byte stream
///
/// The engine calls this while compiling schemas that carry remote `$ref`
/// targets. Implementations decide which schemes they support and how
/// fetching is performed; the engine only reads the returned stream to the
/// end and parses it as JSON.
///
/// Fetching happens during schema compilation, never during validation, so a
/// blocking implementation is acceptable. Implementations must be shareable
/// across threads; whether two concurrent fetches of the same URL are
/// coalesced is the implementation's own contract.
pub trait UrlFetcher: Send + Sync {
    /// Fetch the resource at `url`
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` when the scheme is unsupported, the resource
    /// does not exist, or transport fails.
    fn fetch(&self, url: &Url) -> std::io::Result<Box<dyn Read + Send>>;
}
