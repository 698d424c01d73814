//! Output layer shared by CLI commands: plain text or JSON.

use serde::Serialize;
use std::io::{self, Write};

/// The output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One entry per line, suitable for pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render `items` to `w`: a JSON array in JSON mode, otherwise one
/// `Display` line per item.
pub fn render_list<T>(w: &mut dyn Write, items: &[T], mode: OutputMode) -> io::Result<()>
where
    T: Serialize + std::fmt::Display,
{
    if mode.is_json() {
        serde_json::to_writer(&mut *w, items).map_err(io::Error::other)?;
        writeln!(w)
    } else {
        for item in items {
            writeln!(w, "{item}")?;
        }
        Ok(())
    }
}
