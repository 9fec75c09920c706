//! Closed string-valued enumerations of the Notion wire format.

mod colors;
mod formats;
mod tag;
mod tags;

pub use colors::*;
pub use formats::*;
pub use tag::WireTag;
pub use tags::*;
