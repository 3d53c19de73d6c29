//! Drawable-surface layer: cell buffers, styles, and the terminal driver.
//!
//! Everything above this module draws into [`Buffer`]s; only the
//! [`Driver`] talks to the terminal.

pub mod buffer;
pub mod driver;
pub mod style;

pub use buffer::Buffer;
pub use driver::Driver;
pub use style::{parse_color, CellStyle, StyledCell};
