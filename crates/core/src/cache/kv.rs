//! Key-value operations.
//!
//! Page records are stored under their request path; the repository tree is
//! stored under [`TREE_KEY`], which is never a valid page path. Values are
//! opaque strings, usually JSON.

use super::connection::CacheDb;
use crate::{Content, Error};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// Fixed key holding the raw JSON of the last repository tree refresh.
pub const TREE_KEY: &str = "TREE";

impl CacheDb {
    /// Get the raw value stored under `key`.
    ///
    /// Returns None if the key doesn't exist in the cache.
    pub async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;

                match stmt.query_row(params![key], |row| row.get(0)) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> Result<(), Error> {
        if key.is_empty() {
            return Err(Error::InvalidInput("cache key cannot be empty".into()));
        }

        let key = key.to_string();
        let value = value.to_string();
        let updated_at = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    params![key, value, updated_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored entries.
    pub async fn count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Get and decode a JSON value.
    ///
    /// A value that fails to decode is reported as [`Error::Malformed`].
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), Error> {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw).await
    }

    /// Get the content record cached for a request path.
    pub async fn get_content(&self, path: &str) -> Result<Option<Content>, Error> {
        check_page_key(path)?;
        self.get_json(path).await
    }

    /// Cache the content record for a request path.
    pub async fn put_content(&self, path: &str, content: &Content) -> Result<(), Error> {
        check_page_key(path)?;
        self.put_json(path, content).await
    }

    /// Get the raw JSON of the cached repository tree.
    pub async fn get_tree(&self) -> Result<Option<String>, Error> {
        self.get(TREE_KEY).await
    }

    /// Replace the cached repository tree.
    pub async fn put_tree(&self, json: &str) -> Result<(), Error> {
        self.put(TREE_KEY, json).await
    }
}

fn check_page_key(path: &str) -> Result<(), Error> {
    if path == TREE_KEY {
        return Err(Error::InvalidInput(format!("{TREE_KEY} is reserved for the repository tree")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_test_content(html: &str) -> Content {
        let mut content = Content::new(200, html);
        content.attrs.insert("title".into(), json!("Test"));
        content
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put("about", r#"{"html":"<p>x</p>"}"#).await.unwrap();

        let retrieved = db.get("about").await.unwrap().unwrap();
        assert_eq!(retrieved, r#"{"html":"<p>x</p>"}"#);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put("about", "old").await.unwrap();
        db.put("about", "new").await.unwrap();

        assert_eq!(db.get("about").await.unwrap().as_deref(), Some("new"));
        assert_eq!(db.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_put_empty_key_rejected() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.put("", "value").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_nested_path_keys() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put("docs/guide", "a").await.unwrap();
        db.put("docs", "b").await.unwrap();

        assert_eq!(db.get("docs/guide").await.unwrap().as_deref(), Some("a"));
        assert_eq!(db.get("docs").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_content_roundtrip_preserves_summary() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let mut content = make_test_content("<h1>Test</h1>");
        content.summary = Some("A test page.".into());

        db.put_content("test", &content).await.unwrap();

        let retrieved = db.get_content("test").await.unwrap().unwrap();
        assert_eq!(retrieved, content);
    }

    #[tokio::test]
    async fn test_get_content_malformed() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put("broken", "not json").await.unwrap();

        let result = db.get_content("broken").await;
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[tokio::test]
    async fn test_tree_key() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.get_tree().await.unwrap().is_none());

        db.put_tree(r#"{"sha":"abc","tree":[]}"#).await.unwrap();

        assert_eq!(db.get(TREE_KEY).await.unwrap().as_deref(), Some(r#"{"sha":"abc","tree":[]}"#));
        assert!(matches!(db.get_content(TREE_KEY).await, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_put_content_cannot_overwrite_tree() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_tree(r#"{"sha":"abc","tree":[],"truncated":false}"#).await.unwrap();

        let result = db.put_content(TREE_KEY, &make_test_content("<p>page</p>")).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(db.get_tree().await.unwrap().as_deref(), Some(r#"{"sha":"abc","tree":[],"truncated":false}"#));
    }
}
