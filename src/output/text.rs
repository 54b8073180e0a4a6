//! Plain text listing.
//!
//! Each group prints its short hash (last seven characters) and file count,
//! followed by the paths indented underneath:
//!
//! ```text
//! 3f9a1c2 (2 files)
//!    /a/x.txt
//!    /b/x.txt
//! ```

use std::io::{self, Write};

use yansi::Paint;

use crate::report::ReportEntry;

/// Text output formatter.
#[derive(Debug, Clone, Copy)]
pub struct TextOutput<'a> {
    entries: &'a [&'a ReportEntry],
    color: bool,
}

impl<'a> TextOutput<'a> {
    /// Create a formatter over the rows to write, without color.
    #[must_use]
    pub fn new(entries: &'a [&'a ReportEntry]) -> Self {
        Self {
            entries,
            color: false,
        }
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Write the listing.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for entry in self.entries {
            let count = format!("({} files)", entry.file_count());
            if self.color {
                writeln!(writer, "{} {}", entry.short_hash().green().bold(), count.dim())?;
            } else {
                writeln!(writer, "{} {}", entry.short_hash(), count)?;
            }
            for file in &entry.files {
                writeln!(writer, "   {}", file)?;
            }
        }
        Ok(())
    }
}
