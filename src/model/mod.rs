//! Pure data structures shared by every component: settings, records, cart lines
//! and catalog payloads.

pub mod cart;
pub mod catalog;
pub mod record;
pub mod settings;

pub use cart::*;
pub use catalog::*;
pub use record::*;
pub use settings::*;
