//! The environment that loads the vendor script

use std::fmt;
use std::sync::Arc;

/// Invoked by the host once the vendor script finished loading
pub type ReadyCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle for an injected script element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptId(u64);

impl ScriptId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script-{}", self.0)
    }
}

/// Script loading and the well-known SDK-ready hook
pub trait SdkHost: Send + Sync {
    /// Append a script element loading `src`
    fn inject_script(&self, src: &str) -> ScriptId;

    fn remove_script(&self, id: ScriptId);

    /// Install `callback` as the single global SDK-ready callback
    ///
    /// Installing a new callback replaces the previous one. The vendor script
    /// calls it once, without arguments, after it loaded.
    fn on_sdk_ready(&self, callback: ReadyCallback);
}
