//! # Presentation Selector
//!
//! Maps the combined widget state to exactly one [`View`]. The decision order is fixed:
//!
//! 1. No configured products: a "no products configured" notice.
//! 2. First batch still loading: a loading notice.
//! 3. Neither add nor remove allowed: a "cart cannot be modified" notice.
//! 4. Otherwise: the heading and one [`Row`] per record.

pub mod selector;

pub use selector::*;
