//! Line-oriented input.
//!
//! Anything that is not a `:` command is the form's text field being
//! submitted.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Submit the form with this text.
    Add(String),
    /// Delete the item at this 1-based position.
    Delete(usize),
    Refresh,
    Quit,
    /// A `:` command that could not be understood.
    Invalid(String),
}

pub const HELP: &str =
    "type text + Enter to add, :d N to delete, :r to refresh, :q to quit (add and delete wait while loading)";

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Input::Add(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("q" | "quit"), None, None) => Input::Quit,
            (Some("r" | "refresh"), None, None) => Input::Refresh,
            (Some("d" | "delete"), Some(n), None) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Input::Delete(n),
                _ => Input::Invalid(format!("not a list position: {n}")),
            },
            _ => Input::Invalid(format!("unknown command `{trimmed}` ({HELP})")),
        }
    }

    /// Why this input cannot run while the list is loading, if it cannot.
    ///
    /// The list is hidden behind the loading indicator, so neither the form
    /// nor a position in the list is available.
    pub fn refused_while_loading(&self) -> Option<&'static str> {
        match self {
            Input::Add(_) => Some("still loading, try again in a moment"),
            Input::Delete(_) => Some("still loading, the list is not shown yet"),
            _ => None,
        }
    }
}
