//! The seam between the transcoder and its emulator host.

use std::path::PathBuf;

use super::types::models::DEFAULT_CODE_PAGE;

/// What the transcoder needs to know about the environment it runs in.
///
/// An emulator implements this against its resource layout and machine
/// state; tests and tools use [`FixedHost`].
pub trait HostContext {
    /// Resolves a named resource directory (for example `"mapping"`) to a
    /// filesystem path.
    fn resource_path(&self, dir_name: &str) -> PathBuf;

    /// The DOS code page currently loaded by the emulated machine.
    fn loaded_code_page(&self) -> u16;

    /// Whether the emulated video adapter can change its character set.
    /// Below EGA this was not possible, so the active code page is always
    /// the default one.
    fn can_switch_character_set(&self) -> bool;
}

/// A host with a fixed resource root and machine state.
#[derive(Debug, Clone)]
pub struct FixedHost {
    root: PathBuf,
    code_page: u16,
    charset_switching: bool,
}

impl FixedHost {
    /// A host rooted at `root`, reporting the default code page and a
    /// character-set-capable adapter.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            code_page: DEFAULT_CODE_PAGE,
            charset_switching: true,
        }
    }

    pub fn with_code_page(mut self, code_page: u16) -> Self {
        self.code_page = code_page;
        self
    }

    pub fn with_charset_switching(mut self, enabled: bool) -> Self {
        self.charset_switching = enabled;
        self
    }
}

impl HostContext for FixedHost {
    fn resource_path(&self, dir_name: &str) -> PathBuf {
        self.root.join(dir_name)
    }

    fn loaded_code_page(&self) -> u16 {
        self.code_page
    }

    fn can_switch_character_set(&self) -> bool {
        self.charset_switching
    }
}
