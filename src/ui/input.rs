use anyhow::{bail, Context, Result};

/// Input action produced from raw input (mouse buttons, arrow keys, window
/// resizes) or from a scripted command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Left click: select the leaf under the cursor, or deselect it if it is
    /// already selected
    Select { x: u32, y: u32 },
    /// Right click: delete the leaf under the cursor
    Delete { x: u32, y: u32 },
    /// Up arrow: grow the selected leaf
    Grow,
    /// Down arrow: shrink the selected leaf
    Shrink,
    /// Window resized
    Resize { width: u32, height: u32 },
    /// No action
    None,
}

/// Parse one scripted command.
///
/// `click X Y`, `delete X Y`, `up`, `down` and `resize W H`; a blank line is
/// [`InputAction::None`].
pub fn parse_action(line: &str) -> Result<InputAction> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(InputAction::None);
    };

    let mut number = |what: &str| -> Result<u32> {
        let word = words
            .next()
            .with_context(|| format!("'{command}' needs {what}"))?;
        word.parse()
            .with_context(|| format!("'{word}' is not a valid {what}"))
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "click" | "select" => InputAction::Select {
            x: number("x")?,
            y: number("y")?,
        },
        "delete" | "right" => InputAction::Delete {
            x: number("x")?,
            y: number("y")?,
        },
        "up" | "grow" => InputAction::Grow,
        "down" | "shrink" => InputAction::Shrink,
        "resize" => InputAction::Resize {
            width: number("width")?,
            height: number("height")?,
        },
        other => bail!("unknown action '{other}'"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected '{extra}' after '{command}'");
    }
    Ok(action)
}
