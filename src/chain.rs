use crate::{
    auxiliary::constants::general::{MAX_COMMANDS, SEPARATOR},
    errors::{Error, Result},
};

/// One `name [args...]` unit of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandGroup<'a> {
    tokens: &'a [String],
}

impl<'a> CommandGroup<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self { tokens }
    }

    pub fn name(&self) -> Option<&'a str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn arguments(&self) -> &'a [String] {
        self.tokens.get(1..).unwrap_or_default()
    }
}

/// Splits `tokens` on standalone separators.
///
/// A trailing separator closes the last command without opening a new one,
/// anything else between two separators (including nothing) is a command.
pub fn split(tokens: &[String]) -> Result<Vec<CommandGroup<'_>>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let mut groups: Vec<CommandGroup<'_>> = tokens
        .split(|token| token == SEPARATOR)
        .map(CommandGroup::new)
        .collect();
    if tokens.last().is_some_and(|token| token == SEPARATOR) {
        groups.pop();
    }
    if groups.len() > MAX_COMMANDS {
        return Err(Error::TooManyCommands {
            count: groups.len(),
        });
    }
    Ok(groups)
}
