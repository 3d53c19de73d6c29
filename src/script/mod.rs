//! Script execution boundary.
//!
//! The event loop talks to the scripting engine only through
//! [`ScriptBridge`]: text in, text out. Failures come back as
//! human-readable strings prefixed with `"Error: "`. A script error
//! is content to display, never an `Err` crossing into loop control
//! flow.

use std::path::Path;

pub mod engine;

pub use engine::RhaiEngine;

/// Prefix applied to every failure string crossing this boundary.
pub const ERROR_PREFIX: &str = "Error: ";

/// Executes submitted source text and returns a display string.
pub trait ScriptBridge {
    /// Execute `code` and return its result rendered as text.
    ///
    /// Blocks until the script completes; the caller accepts that a
    /// long-running script stalls the loop.
    fn execute(&mut self, code: &str) -> String;

    /// Read `path` and execute its contents.
    ///
    /// Read failures are reported the same way as execution failures.
    fn load_file(&mut self, path: &Path) -> String;
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Bridge implementations must be usable as trait objects.
    struct Canned;

    impl ScriptBridge for Canned {
        fn execute(&mut self, code: &str) -> String {
            format!("got {code}")
        }

        fn load_file(&mut self, _path: &Path) -> String {
            "file".to_owned()
        }
    }

    #[test]
    fn bridge_is_object_safe() {
        let mut bridge: Box<dyn ScriptBridge> = Box::new(Canned);
        assert_eq!(bridge.execute("x"), "got x");
        assert_eq!(bridge.load_file(Path::new("p")), "file");
    }
}
