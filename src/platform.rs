//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the save and test call shortcuts
/// - macOS: SUPER (Cmd key), Ctrl also accepted
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display for help text
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Test call shortcut display for help text
pub const TEST_CALL_SHORTCUT: &str = "Ctrl+T";

/// Whether `modifiers` hold the shortcut modifier
pub fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(SHORTCUT_MODIFIER)
}
