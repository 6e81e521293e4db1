use std::process::ExitCode;

use call_table::HOST_CALL_TABLE;
use cli::SyscallArgs;
use dispatcher::Dispatcher;
use kernel::HostKernel;
use logging::init_logging;
use register::ResultRegister;
use tracing::debug;
use writer::{write_call_list, write_error, write_results_table, write_usage};

mod argument;
mod auxiliary;
mod call_table;
mod chain;
mod cli;
mod dispatcher;
mod errors;
mod kernel;
mod logging;
mod register;
mod writer;

fn main() -> ExitCode {
    let args = match SyscallArgs::from_command_line(std::env::args()) {
        Ok(args) => args,
        Err(error) => {
            // help and version come through here too
            let failed = error.use_stderr();
            let _ = error.print();
            return if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging();
    match runner(args) {
        Ok(exit_code) => exit_code,
        Err(error) => {
            write_error(&error);
            ExitCode::FAILURE
        }
    }
}

fn runner(args: SyscallArgs) -> anyhow::Result<ExitCode> {
    let mut stdout = std::io::stdout();
    if args.list {
        write_call_list(&HOST_CALL_TABLE, &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }
    if args.chain.is_empty() {
        write_usage(&mut stdout)?;
        // a bare invocation asks for usage, a repeat count without a chain is a mistake
        return Ok(if args.repeat.is_some() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    debug!(calls = HOST_CALL_TABLE.len(), "call table ready");
    let mut register = ResultRegister::new();
    let mut dispatcher = Dispatcher::new(&HOST_CALL_TABLE, HostKernel, std::io::stdout());
    dispatcher.run(&args.chain, args.repeat_count(), &mut register)?;

    if args.dump_results {
        write_results_table(&register, &mut stdout)?;
    }
    Ok(ExitCode::SUCCESS)
}
