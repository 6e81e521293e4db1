pub mod constants {
    pub mod general {
        // maximum number of commands per invocation
        pub const MAX_COMMANDS: usize = 20;
        // the widest call a command may issue
        pub const MAX_ARGUMENTS: usize = 5;
        // standalone token separating two commands of a chain
        pub const SEPARATOR: &str = ",";
        // register slots hold this until a command writes them
        pub const NO_RESULT: i64 = -1;
        // raw return value that marks a failed call
        pub const CALL_FAILED: i64 = -1;
    }
    pub mod sigils {
        pub const LENGTH: char = '#';
        pub const PRIOR_RESULT: char = '$';
        pub const ESCAPED_NEWLINE: &str = "\\n";
    }
    pub mod pseudo_calls {
        pub const ECHO: &str = "echo";
    }
}
