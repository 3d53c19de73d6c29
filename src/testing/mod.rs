//! Headless testing utilities: the [`Pilot`] app driver and snapshot
//! string rendering.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{buffer_to_string, row_to_string};
