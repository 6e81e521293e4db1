use std::io::Write;

use tracing::{debug, info};

use crate::{
    argument::{register_value, unescape_trailing_newlines, Argument, TextArena},
    auxiliary::constants::{
        general::MAX_ARGUMENTS,
        pseudo_calls::ECHO,
        sigils::{LENGTH, PRIOR_RESULT},
    },
    call_table::CallTable,
    chain::{split, CommandGroup},
    errors::{Error, Result},
    kernel::{CallArgs, Kernel},
    register::ResultRegister,
};

/// Runs command groups against a kernel, writing echo output to `out`.
///
/// The dispatcher keeps no results of its own, every command reads from and
/// writes to the register it is handed.
pub struct Dispatcher<'t, K, W> {
    table: &'t CallTable,
    kernel: K,
    out: W,
}

impl<'t, K: Kernel, W: Write> Dispatcher<'t, K, W> {
    pub fn new(table: &'t CallTable, kernel: K, out: W) -> Self {
        Self { table, kernel, out }
    }

    /// Runs the whole chain `repeat_count` times. The register is shared by
    /// every pass and never cleared in between.
    pub fn run(
        &mut self,
        tokens: &[String],
        repeat_count: i64,
        register: &mut ResultRegister,
    ) -> Result<()> {
        if repeat_count < 1 {
            return Err(Error::InvalidRepeatCount(repeat_count));
        }
        let groups = split(tokens)?;
        for pass in 0..repeat_count {
            info!(pass, commands = groups.len(), "starting pass");
            for (position, group) in groups.iter().enumerate() {
                self.dispatch(position, *group, register)?;
            }
        }
        Ok(())
    }

    /// Runs the command at `position` of the chain and records its result
    /// in the register slot of the same index.
    pub fn dispatch(
        &mut self,
        position: usize,
        group: CommandGroup<'_>,
        register: &mut ResultRegister,
    ) -> Result<()> {
        let call = group
            .name()
            .ok_or(Error::MissingCallName { position })?;
        if call == ECHO {
            self.echo(group, register)?;
            register.record(position, 0);
            return Ok(());
        }

        let code = self.table.resolve(call)?;
        let arguments = group.arguments();
        if arguments.len() > MAX_ARGUMENTS {
            return Err(Error::TooManyArguments {
                call: call.to_owned(),
                count: arguments.len(),
            });
        }

        let mut texts = TextArena::new();
        let mut args = CallArgs::new();
        for token in arguments {
            let word = Argument::parse(call, token)?.to_word(call, register, &mut texts)?;
            args.push(call, word)?;
        }

        debug!(position, call, code, arity = args.arity(), words = ?args.as_slice(), "dispatching");
        let result = self
            .kernel
            .invoke(code, &args)
            .map_err(|errno| Error::UnderlyingCallFailed {
                call: call.to_owned(),
                errno,
            })?;
        debug!(position, call, result, "returned");
        register.record(position, result);
        // string arguments stay alive until the call has returned
        drop(texts);
        Ok(())
    }

    // prints one line per argument, evaluating only `#` and `$` tokens
    fn echo(&mut self, group: CommandGroup<'_>, register: &ResultRegister) -> Result<()> {
        for token in group.arguments() {
            if !(token.starts_with(LENGTH) || token.starts_with(PRIOR_RESULT)) {
                writeln!(self.out, "{token}")?;
                continue;
            }
            match Argument::parse(ECHO, token)? {
                Argument::Length(length) => writeln!(self.out, "{length}")?,
                Argument::PriorResult(index) => {
                    writeln!(self.out, "{}", register_value(register, index))?
                }
                // an out of range `$N`, there is no address worth printing
                Argument::Literal(_) | Argument::Text(_) => {
                    writeln!(self.out, "{}", unescape_trailing_newlines(token))?
                }
            }
        }
        // keep echo lines ahead of whatever the next call writes
        self.out.flush()?;
        Ok(())
    }
}
