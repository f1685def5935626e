//! Tweet models and the extractors that derive facts from them.
//!
//! Only the Twitter/X shape is modelled today. Everything in here is pure and
//! synchronous: callers hand in borrowed tweets and get owned results back.
pub mod twitter;
