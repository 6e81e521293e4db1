use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "syscall",
    about = "syscall launches system calls from your shell.",
    long_about = "syscall launches system calls from your shell.\n\n\
        Commands are separated by a standalone `,`. Arguments are integers \
        (decimal, 0x hex, 0 octal), strings (passed by address, a trailing \\n \
        becomes a newline), `#text` for the length of text, or `$N` for the \
        result of the Nth command (counting from 0). The `echo` pseudo call \
        prints its arguments.",
    override_usage = "syscall [-<n>] name [args...] [, name [args...]]...",
    version
)]
pub struct SyscallArgs {
    /// run the whole chain this many times, `-<n>` works too
    #[arg(short = 'n', long = "repeat", allow_negative_numbers = true)]
    pub repeat: Option<i64>,

    /// print the result of every command once the last pass is done
    #[arg(short = 'd', long = "dump-results")]
    pub dump_results: bool,

    /// list the system calls known on this architecture and exit
    #[arg(short = 'l', long = "list", conflicts_with = "chain")]
    pub list: bool,

    #[arg(
        value_name = "CHAIN",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub chain: Vec<String>,
}

impl SyscallArgs {
    pub fn from_command_line<I>(arguments: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = String>,
    {
        Self::try_parse_from(normalize_legacy_flags(arguments))
    }

    pub fn repeat_count(&self) -> i64 {
        self.repeat.unwrap_or(1)
    }
}

/// Rewrites the short forms clap cannot express, `-<n>` and `-v`, as long
/// options. Only the leading options are touched, the chain is left as is.
pub fn normalize_legacy_flags<I>(arguments: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut arguments = arguments.into_iter();
    let mut normalized: Vec<String> = arguments.next().into_iter().collect();
    let mut in_options = true;
    let mut value_expected = false;
    for argument in arguments {
        // the value of `-n`/`--repeat` is clap's to read, even when it is `-2`
        if std::mem::take(&mut value_expected) {
            normalized.push(argument);
            continue;
        }
        if in_options {
            if argument == "-n" || argument == "--repeat" {
                value_expected = true;
                normalized.push(argument);
                continue;
            }
            if let Some(count) = argument
                .strip_prefix('-')
                .filter(|count| !count.is_empty() && count.bytes().all(|byte| byte.is_ascii_digit()))
            {
                normalized.push("--repeat".to_owned());
                normalized.push(count.to_owned());
                continue;
            }
            if argument == "-v" {
                normalized.push("--version".to_owned());
                continue;
            }
            in_options = argument.starts_with('-');
        }
        normalized.push(argument);
    }
    normalized
}
