use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tweetlens_common::{Result, TweetlensError};

use crate::twitter::extract::mentions_in;

/// A single post. Immutable once built; fields are only reachable through getters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    id: u64,
    author: String,
    text: String,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
}

impl Tweet {
    pub fn new(
        id: u64,
        author: impl Into<String>,
        text: impl Into<String>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            text: text.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Username of the poster, case-insensitive by convention.
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Usernames mentioned in this tweet's text, in order and with their original case.
    pub fn mentions(&self) -> impl Iterator<Item = &str> {
        mentions_in(&self.text)
    }
}

/// Closed interval `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Timespan {
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
}

impl Timespan {
    /// Build a timespan, rejecting `start > end`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self> {
        if start > end {
            return Err(TweetlensError::InvalidArgument(format!(
                "timespan start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Zero-length timespan at `at`.
    pub fn instant(at: OffsetDateTime) -> Self {
        Self { start: at, end: at }
    }

    /// Smallest timespan containing every tweet's timestamp, or `None` when
    /// `tweets` is empty.
    ///
    /// On ties the first-seen extreme is kept.
    ///
    /// ```
    /// use time::macros::datetime;
    /// use tweetlens_social::twitter::{Timespan, Tweet};
    ///
    /// let tweets = [
    ///     Tweet::new(1, "alyssa", "late", datetime!(2016-02-17 12:00 UTC)),
    ///     Tweet::new(2, "ben", "early", datetime!(2016-02-17 10:00 UTC)),
    /// ];
    /// let span = Timespan::covering(&tweets).unwrap();
    /// assert_eq!(span.start(), datetime!(2016-02-17 10:00 UTC));
    /// assert_eq!(span.end(), datetime!(2016-02-17 12:00 UTC));
    /// assert!(Timespan::covering(&[]).is_none());
    /// ```
    pub fn covering(tweets: &[Tweet]) -> Option<Self> {
        let (first, rest) = tweets.split_first()?;
        let mut start = first.timestamp;
        let mut end = start;

        for tweet in rest {
            if tweet.timestamp < start {
                start = tweet.timestamp;
            }
            if tweet.timestamp > end {
                end = tweet.timestamp;
            }
        }

        Some(Self { start, end })
    }

    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, at: OffsetDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}
