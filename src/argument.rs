//! The argument mini-language.
//!
//! A token is read as the first of these that applies:
//!
//! - `#text`: the length of `text`
//! - `$N`: the result of the command at position `N`
//! - an integer literal (decimal, `0x` hex, leading-`0` octal, optional sign)
//! - anything else: a string, passed by address, whose trailing `\n` escapes
//!   become real newlines
//!
//! An out of range `$N` is not an error: the token is re-read as a literal,
//! and since `$` never starts a literal, as a string.

use std::{borrow::Cow, ffi::CString};

use tracing::trace;

use crate::{
    auxiliary::constants::{
        general::MAX_COMMANDS,
        sigils::{ESCAPED_NEWLINE, LENGTH, PRIOR_RESULT},
    },
    errors::{Error, Result},
    register::ResultRegister,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Argument<'a> {
    Length(usize),
    PriorResult(usize),
    Literal(u64),
    Text(&'a str),
}

impl<'a> Argument<'a> {
    /// Classifies `token`. `call` is only used to name the culprit in errors.
    pub fn parse(call: &str, token: &'a str) -> Result<Self> {
        if let Some(text) = token.strip_prefix(LENGTH) {
            // lengths are what calls like write(2) consume, so count bytes
            return Ok(Argument::Length(text.len()));
        }
        if let Some(index) = token.strip_prefix(PRIOR_RESULT).and_then(prior_result_index) {
            return Ok(Argument::PriorResult(index));
        }
        match parse_literal(token) {
            Ok(Some(value)) => Ok(Argument::Literal(value)),
            Ok(None) => Ok(Argument::Text(token)),
            Err(LiteralOutOfRange) => Err(Error::ArgumentOutOfRange {
                call: call.to_owned(),
                argument: token.to_owned(),
            }),
        }
    }

    /// The machine word handed to the call for this argument.
    ///
    /// Strings are copied into `texts`, which must outlive the call.
    pub fn to_word(
        &self,
        call: &str,
        register: &ResultRegister,
        texts: &mut TextArena,
    ) -> Result<u64> {
        let word = match *self {
            Argument::Length(length) => length as u64,
            Argument::PriorResult(index) => register_value(register, index) as u64,
            Argument::Literal(value) => value,
            Argument::Text(token) => texts.intern(call, token)?,
        };
        trace!(argument = ?self, word, "evaluated");
        Ok(word)
    }
}

/// Owns the NUL-terminated copies of string arguments for as long as the
/// call reading them runs.
#[derive(Debug, Default)]
pub struct TextArena {
    texts: Vec<CString>,
}

impl TextArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unescapes `token`, stores it, and returns its address.
    pub fn intern(&mut self, call: &str, token: &str) -> Result<u64> {
        let text = CString::new(unescape_trailing_newlines(token).into_owned()).map_err(|_| {
            Error::InteriorNul {
                call: call.to_owned(),
                argument: token.to_owned(),
            }
        })?;
        // the heap buffer does not move when the CString itself does
        let address = text.as_ptr() as u64;
        self.texts.push(text);
        Ok(address)
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&CString> {
        self.texts.last()
    }
}

/// Rewrites every `\n` escape at the very end of `text` into a newline.
/// Escapes anywhere else are left alone.
pub fn unescape_trailing_newlines(text: &str) -> Cow<'_, str> {
    let mut stem = text;
    let mut newlines = 0;
    while let Some(shorter) = stem.strip_suffix(ESCAPED_NEWLINE) {
        stem = shorter;
        newlines += 1;
    }
    if newlines == 0 {
        return Cow::Borrowed(text);
    }
    let mut unescaped = String::with_capacity(stem.len() + newlines);
    unescaped.push_str(stem);
    unescaped.extend(std::iter::repeat('\n').take(newlines));
    Cow::Owned(unescaped)
}

pub(crate) fn register_value(register: &ResultRegister, index: usize) -> i64 {
    // prior_result_index only yields indexes below the capacity
    register.get(index).unwrap_or_default()
}

// read the way strtoul(3) reads base 10: leading blanks, an optional sign,
// then as many digits as there are. No digits at all means slot 0, a
// negated index wraps around and so lands out of range.
fn prior_result_index(text: &str) -> Option<usize> {
    let (negative, unsigned) = split_sign(text.trim_start_matches(is_c_space));
    let end = unsigned
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return Some(0);
    }
    let index = digits.parse::<usize>().ok()?;
    let index = if negative { index.wrapping_neg() } else { index };
    (index < MAX_COMMANDS).then_some(index)
}

fn is_c_space(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct LiteralOutOfRange;

fn parse_literal(token: &str) -> std::result::Result<Option<u64>, LiteralOutOfRange> {
    if token.is_empty() {
        return Ok(Some(0));
    }
    let (negative, unsigned) = split_sign(token.trim_start_matches(is_c_space));
    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };
    if digits.is_empty() || !digits.chars().all(|digit| digit.is_digit(radix)) {
        return Ok(None);
    }
    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| LiteralOutOfRange)?;
    Ok(Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }))
}
