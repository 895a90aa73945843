//! Reading scripts and locating the cursor in them.

use std::io::Read;
use std::path::Path;

use crate::args::CommandLineArgs;
use crate::error::ShellError;

/// A script with the cursor placed in it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CursorInput {
    /// The script, without any cursor marker.
    pub source: String,
    /// Byte offset of the cursor in `source`.
    pub index: usize,
}

impl CursorInput {
    /// Places the cursor in `text`.
    ///
    /// An explicit `index` is used as is. Otherwise the first `marker` in the text gives the
    /// cursor and is removed; without one, the cursor is at the end of the text.
    ///
    /// # Arguments
    ///
    /// * `text` - The script, possibly containing a marker.
    /// * `index` - Explicit cursor offset.
    /// * `marker` - Character marking the cursor.
    pub fn new(text: String, index: Option<usize>, marker: char) -> Self {
        if let Some(index) = index {
            return Self {
                source: text,
                index,
            };
        }

        match text.find(marker) {
            Some(index) => Self {
                source: text.replacen(marker, "", 1),
                index,
            },
            None => Self {
                index: text.len(),
                source: text,
            },
        }
    }
}

/// Reads the script selected by the command-line arguments: the `-c` text, the named file, or
/// standard input.
///
/// A single line terminator ending a file or standard input is dropped, so that the default
/// cursor lands at the end of the last line.
pub fn read_script(args: &CommandLineArgs) -> Result<String, ShellError> {
    if let Some(command) = &args.command {
        return Ok(command.clone());
    }

    let mut text = match &args.script_path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(ShellError::ReadScript)?
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(ShellError::ReadScript)?;
            text
        }
    };

    trim_final_newline(&mut text);
    Ok(text)
}

fn trim_final_newline(text: &mut String) {
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    } else if text.ends_with('\n') {
        text.truncate(text.len() - 1);
    }
}
