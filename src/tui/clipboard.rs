//! System clipboard access for the `y` (copy message) key
//!
//! A fresh `arboard::Clipboard` is opened per copy; on Linux the handle
//! would otherwise pin the X11/Wayland connection for the whole session.

use anyhow::{bail, Context, Result};
use arboard::Clipboard;

/// Put `text` on the system clipboard
///
/// Fails on headless systems (no display server) and for blank text.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Nothing to copy");
    }
    Clipboard::new()
        .context("Failed to access clipboard")?
        .set_text(text)
        .context("Failed to set clipboard text")
}
