//! Embedded rhai engine behind the script bridge.

use std::fs;
use std::path::Path;

use log::{debug, info};
use rhai::{Dynamic, Engine};

use super::{ScriptBridge, ERROR_PREFIX};

/// A [`ScriptBridge`] backed by an embedded [`rhai::Engine`].
///
/// The engine is created once and reused, so state registered on it
/// (functions, modules) persists across submissions. Evaluation errors
/// and unreadable files are rendered into the `"Error: "`-prefixed
/// form instead of propagating.
pub struct RhaiEngine {
    engine: Engine,
}

impl RhaiEngine {
    /// Create an engine with rhai's default feature set.
    pub fn new() -> Self {
        Self { engine: Engine::new() }
    }

    fn render(result: Dynamic) -> String {
        if result.is_unit() {
            "()".to_owned()
        } else {
            result.to_string()
        }
    }
}

impl Default for RhaiEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBridge for RhaiEngine {
    fn execute(&mut self, code: &str) -> String {
        debug!("executing script: {code}");
        match self.engine.eval::<Dynamic>(code) {
            Ok(result) => {
                let rendered = Self::render(result);
                info!("script ok: {rendered}");
                rendered
            }
            Err(err) => {
                info!("script failed: {err}");
                format!("{ERROR_PREFIX}{err}")
            }
        }
    }

    fn load_file(&mut self, path: &Path) -> String {
        info!("loading script file {}", path.display());
        match fs::read_to_string(path) {
            Ok(source) => self.execute(&source),
            Err(err) => format!("{ERROR_PREFIX}{}: {err}", path.display()),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
