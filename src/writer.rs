use std::io::Write;

use colored::Colorize;
use tabled::{builder::Builder, settings::Style};

use crate::{call_table::CallTable, register::ResultRegister};

pub const USAGE: &str = "usage: syscall [-<n>] name [args...] [, name [args...]]...";

pub fn write_usage(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{USAGE}")
}

/// One line on stderr, the way err(3) would print it.
pub fn write_error(error: &anyhow::Error) {
    // colored drops the escapes by itself when output is not a terminal
    eprintln!("{}: {}", "syscall".bold().red(), error);
}

/// Every register slot with what the last pass left in it.
pub fn write_results_table(register: &ResultRegister, out: &mut impl Write) -> std::io::Result<()> {
    let mut builder = Builder::new();
    builder.push_record(["command", "result"]);
    builder.push_record([""]);
    for (index, value) in register.iter() {
        builder.push_record([index.to_string(), value.to_string()]);
    }
    let table = builder.build().with(Style::ascii_rounded()).to_string();
    writeln!(out, "\n{}", table)
}

/// Names and codes of the calls on this architecture, in name order.
pub fn write_call_list(table: &CallTable, out: &mut impl Write) -> std::io::Result<()> {
    for entry in table.entries() {
        writeln!(out, "{:<24} {}", entry.name, entry.code)?;
    }
    out.flush()
}
