//! Content digests used as HTTP entity tags.

use sha2::{Digest, Sha256};

/// Compute a strong entity tag for rendered page content.
///
/// The tag covers the rendered HTML and the summary, so attaching a summary
/// in the background produces a new tag.
pub fn content_etag(html: &str, summary: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    hasher.update(b"\n");
    hasher.update(summary.unwrap_or_default().as_bytes());
    format!("\"{}\"", hex::encode(hasher.finalize()))
}
