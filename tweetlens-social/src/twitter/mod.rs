//! Twitter/X tweet handling.
//!
//! [`types`] holds the immutable [`Tweet`] and [`Timespan`] values, [`extract`]
//! the timespan and mention queries, and [`load`] reads tweet fixtures from JSON.
pub mod extract;
pub mod load;
pub mod types;

pub use extract::{get_mentioned_users, get_timespan, mentions_in};
pub use types::{Timespan, Tweet};
