use thiserror::Error;

use crate::auxiliary::constants::general::{MAX_ARGUMENTS, MAX_COMMANDS};

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a chain can fail. None of these are recoverable: the first one
/// aborts the rest of the chain.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown system call: {0}")]
    UnknownCall(String),

    #[error("{call}: argument '{argument}' is out of range")]
    ArgumentOutOfRange { call: String, argument: String },

    #[error("{call}: argument '{argument}' contains a NUL byte")]
    InteriorNul { call: String, argument: String },

    #[error("too many arguments for {call} ({count} > {max})", max = MAX_ARGUMENTS)]
    TooManyArguments { call: String, count: usize },

    #[error("too many commands ({count} > {max})", max = MAX_COMMANDS)]
    TooManyCommands { count: usize },

    #[error("command {position} has no system call name")]
    MissingCallName { position: usize },

    #[error("{call} failed: {errno}")]
    UnderlyingCallFailed { call: String, errno: errno::Errno },

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("option -<n> must be between 1 and {max}, got {0}", max = i64::MAX)]
    InvalidRepeatCount(i64),
}
