//! Facts derived from a list of tweets.
//!
//! Both queries are single linear scans over borrowed input. They never mutate
//! the tweets and can be called concurrently on the same slice.
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;
use tweetlens_common::{Result, TweetlensError};

use crate::twitter::types::{Timespan, Tweet};

/// `@` followed by a greedy run of username characters. The boundary checks
/// on either side are done by hand in [`mentions_in`].
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("mention pattern compiles"));

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Minimal time interval containing every tweet's timestamp.
///
/// `None` is a caller bug and fails with [`TweetlensError::InvalidArgument`].
///
/// An empty slice has no timestamps to report, so the result is a zero-length
/// timespan at the current wall-clock time. That value depends on when the call
/// happens and is not reproducible; use [`Timespan::covering`] to handle the
/// empty case explicitly.
pub fn get_timespan(tweets: Option<&[Tweet]>) -> Result<Timespan> {
    let tweets = tweets.ok_or_else(|| {
        TweetlensError::InvalidArgument("tweet list must not be null".to_string())
    })?;

    match Timespan::covering(tweets) {
        Some(span) => {
            tracing::debug!(
                tweets = tweets.len(),
                start = %span.start(),
                end = %span.end(),
                "computed timespan"
            );
            Ok(span)
        }
        None => {
            let now = OffsetDateTime::now_utc();
            tracing::debug!(%now, "no tweets, returning zero-length timespan at call time");
            Ok(Timespan::instant(now))
        }
    }
}

/// Distinct usernames mentioned across all tweets, lowercased.
///
/// `None` is treated as "no data" and yields an empty set.
///
/// ```
/// use time::macros::datetime;
/// use tweetlens_social::twitter::{Tweet, get_mentioned_users};
///
/// let at = datetime!(2016-02-17 10:00 UTC);
/// let tweets = [
///     Tweet::new(1, "charlie", "hey @Alyssa, check this out!", at),
///     Tweet::new(2, "david", "email me at test@mit.edu", at),
/// ];
/// let users = get_mentioned_users(Some(&tweets[..]));
/// assert_eq!(users.len(), 1);
/// assert!(users.contains("alyssa"));
/// ```
pub fn get_mentioned_users(tweets: Option<&[Tweet]>) -> HashSet<String> {
    let Some(tweets) = tweets else {
        return HashSet::new();
    };

    let users: HashSet<String> = tweets
        .iter()
        .flat_map(|tweet| mentions_in(tweet.text()))
        .map(str::to_ascii_lowercase)
        .collect();

    tracing::debug!(
        tweets = tweets.len(),
        users = users.len(),
        "collected mentioned users"
    );
    users
}

/// Usernames mentioned in `text`, left to right, in their original case.
///
/// A candidate `@name` only counts when the characters directly before the `@`
/// and directly after the name are not username characters (or do not exist),
/// so `bitdiddle@mit.edu` mentions nobody.
pub fn mentions_in(text: &str) -> impl Iterator<Item = &str> {
    MENTION.find_iter(text).filter_map(move |m| {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if before.is_some_and(is_username_char) || after.is_some_and(is_username_char) {
            tracing::trace!(
                candidate = m.as_str(),
                "skipping mention glued to a username character"
            );
            return None;
        }
        Some(&m.as_str()[1..])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn tweet(id: u64, text: &str, timestamp: OffsetDateTime) -> Tweet {
        Tweet::new(id, "author", text, timestamp)
    }

    fn users(texts: &[&str]) -> HashSet<String> {
        let at = datetime!(2016-02-17 10:00 UTC);
        let tweets: Vec<Tweet> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| tweet(i as u64, text, at))
            .collect();
        get_mentioned_users(Some(&tweets[..]))
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn timespan_rejects_missing_list() {
        let err = get_timespan(None).unwrap_err();
        match err {
            TweetlensError::InvalidArgument(msg) => {
                assert_eq!(msg, "tweet list must not be null")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn timespan_of_two_tweets() {
        let d1 = datetime!(2016-02-17 10:00 UTC);
        let d2 = datetime!(2016-02-17 11:00 UTC);
        let tweets = [tweet(1, "a", d1), tweet(2, "b", d2)];
        let span = get_timespan(Some(&tweets[..])).unwrap();
        assert_eq!(span.start(), d1);
        assert_eq!(span.end(), d2);
    }

    #[test]
    fn timespan_out_of_order() {
        let d1 = datetime!(2016-02-17 10:00 UTC);
        let d2 = datetime!(2016-02-17 11:00 UTC);
        let d3 = datetime!(2016-02-17 12:00 UTC);
        let tweets = [tweet(3, "c", d3), tweet(1, "a", d1), tweet(2, "b", d2)];
        let span = get_timespan(Some(&tweets[..])).unwrap();
        assert_eq!(span, Timespan::new(d1, d3).unwrap());
    }

    #[test]
    fn timespan_with_identical_timestamps() {
        let d = datetime!(2016-02-17 10:00 UTC);
        let tweets = [tweet(1, "a", d), tweet(2, "b", d), tweet(3, "c", d)];
        assert_eq!(
            get_timespan(Some(&tweets[..])).unwrap(),
            Timespan::instant(d)
        );
    }

    #[test]
    fn timespan_of_empty_list_is_now() {
        let before = OffsetDateTime::now_utc();
        let empty: &[Tweet] = &[];
        let span = get_timespan(Some(empty)).unwrap();
        let after = OffsetDateTime::now_utc();
        assert_eq!(span.start(), span.end());
        assert!(before <= span.start() && span.start() <= after);
    }

    #[test]
    fn mentions_of_missing_list_is_empty() {
        assert!(get_mentioned_users(None).is_empty());
        let empty: &[Tweet] = &[];
        assert!(get_mentioned_users(Some(empty)).is_empty());
    }

    #[test]
    fn no_mentions() {
        assert!(users(&[
            "is it reasonable to talk about rivest so much?",
            "rivest talk in 30 minutes #hype",
        ])
        .is_empty());
    }

    #[test]
    fn single_mention_with_trailing_punctuation() {
        assert_eq!(users(&["hey @Alyssa, check this out!"]), set(&["alyssa"]));
    }

    #[test]
    fn mention_at_start_of_text() {
        assert_eq!(users(&["@charlie hello"]), set(&["charlie"]));
    }

    #[test]
    fn mention_at_end_of_text() {
        assert_eq!(users(&["thanks @dana_99"]), set(&["dana_99"]));
    }

    #[test]
    fn mentions_are_case_folded() {
        assert_eq!(
            users(&["Multiple mentions: @Bob @bob @CAROL"]),
            set(&["bob", "carol"])
        );
        assert_eq!(users(&["@Bob @bob @BOB"]), set(&["bob"]));
    }

    #[test]
    fn email_addresses_are_not_mentions() {
        assert!(users(&["email me at test@mit.edu, not a mention"]).is_empty());
        assert!(users(&["bitdiddle@mit.edu"]).is_empty());
        assert!(users(&["under_score@host"]).is_empty());
    }

    #[test]
    fn non_username_characters_before_at_are_fine() {
        assert_eq!(
            users(&["(@alpha) \"@beta\" .@gamma -@delta @@eps"]),
            set(&["alpha", "beta", "gamma", "delta", "eps"])
        );
    }

    #[test]
    fn bare_at_sign_is_ignored() {
        assert!(users(&["meet @ noon", "@", "@!"]).is_empty());
    }

    #[test]
    fn chained_at_signs_do_not_mention() {
        // Each '@' is preceded by a username character.
        assert!(users(&["a@b@c"]).is_empty());
    }

    #[test]
    fn non_ascii_neighbours_do_not_block_mentions() {
        assert_eq!(users(&["café@bob", "@émile"]), set(&["bob"]));
    }

    #[test]
    fn mentions_combined_across_tweets() {
        assert_eq!(
            users(&[
                "hey @Alyssa, check this out!",
                "Multiple mentions: @Bob @bob @CAROL",
            ]),
            set(&["alyssa", "bob", "carol"])
        );
    }

    #[test]
    fn mentions_in_preserves_order_and_case() {
        let found: Vec<&str> = mentions_in("@Zed then @amy then x@no then @Zed").collect();
        assert_eq!(found, ["Zed", "amy", "Zed"]);
    }
}
