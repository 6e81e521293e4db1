use nix::libc::{self, c_long};

use crate::{
    auxiliary::constants::general::{CALL_FAILED, MAX_ARGUMENTS},
    errors::{Error, Result},
};

/// The machine words of one call, never more than the widest supported call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallArgs {
    words: [u64; MAX_ARGUMENTS],
    len: usize,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: &str, word: u64) -> Result<()> {
        if self.len == MAX_ARGUMENTS {
            return Err(Error::TooManyArguments {
                call: call.to_owned(),
                count: self.len + 1,
            });
        }
        self.words[self.len] = word;
        self.len += 1;
        Ok(())
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.words[..self.len]
    }

    pub fn arity(&self) -> usize {
        self.len
    }
}

/// Something that can run a call by code. The host kernel in production, a
/// recording fake in tests.
pub trait Kernel {
    /// Runs call `code` with exactly the words in `args` and returns its raw
    /// result, or the platform error when that result is the failure value.
    fn invoke(&mut self, code: i64, args: &CallArgs) -> std::result::Result<i64, errno::Errno>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HostKernel;

impl Kernel for HostKernel {
    fn invoke(&mut self, code: i64, args: &CallArgs) -> std::result::Result<i64, errno::Errno> {
        let code = code as c_long;
        let word = |word: u64| word as c_long;
        // each arity gets its own call site so the callee sees exactly the
        // words it was given
        let result = unsafe {
            match *args.as_slice() {
                [] => libc::syscall(code),
                [a] => libc::syscall(code, word(a)),
                [a, b] => libc::syscall(code, word(a), word(b)),
                [a, b, c] => libc::syscall(code, word(a), word(b), word(c)),
                [a, b, c, d] => libc::syscall(code, word(a), word(b), word(c), word(d)),
                [a, b, c, d, e] => {
                    libc::syscall(code, word(a), word(b), word(c), word(d), word(e))
                }
                ref more => unreachable!("CallArgs holds {} words", more.len()),
            }
        };
        // errno has to be read before anything else can overwrite it
        if i64::from(result) == CALL_FAILED {
            return Err(errno::errno());
        }
        Ok(i64::from(result))
    }
}
