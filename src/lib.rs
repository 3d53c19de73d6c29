//! # evalpad
//!
//! A terminal scripting pad: type code into an input line, press Enter,
//! and the embedded [rhai](https://crates.io/crates/rhai) engine
//! evaluates it and shows the result, all rendered through a
//! retained-mode widget compositor over a single blocking event loop.
//!
//! ## Core Systems
//!
//! - **[`geometry`]** — Offset, Size, Region cell-space primitives
//! - **[`surface`]** — Offscreen cell buffers, styles, crossterm driver
//! - **[`event`]** — Input events, key bindings, blocking event sources
//! - **[`widget`]** — Widget trait: invalidation, buffered rendering, compositing
//! - **[`widgets`]** — Built-in widgets: Label
//! - **[`selection`]** — Shared pointer-selection tracking across widgets
//! - **[`script`]** — Script bridge trait and the embedded rhai engine
//! - **[`app`]** — Application struct tying everything together
//! - **[`testing`]** — Headless pilot and snapshot helpers

// Foundation
pub mod error;
pub mod geometry;

// Surface and events
pub mod event;
pub mod surface;

// Widget system
pub mod selection;
pub mod widget;
pub mod widgets;

// Scripting
pub mod script;

// Application
pub mod app;

// Test utilities
pub mod testing;

pub use app::{App, AppConfig};
pub use error::{Error, Result};
