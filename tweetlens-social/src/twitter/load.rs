//! Reads tweet fixtures: a JSON array of `{ id, author, text, timestamp }`
//! objects with RFC 3339 timestamps.
use std::path::Path;

use tweetlens_common::{Result, TweetlensError};

use crate::twitter::types::Tweet;

pub fn tweets_from_json(json: &str) -> Result<Vec<Tweet>> {
    let tweets: Vec<Tweet> = serde_json::from_str(json)?;
    tracing::debug!(count = tweets.len(), "parsed tweets");
    Ok(tweets)
}

pub fn tweets_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Tweet>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| TweetlensError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "read tweet fixture");
    tweets_from_json(&raw)
}
