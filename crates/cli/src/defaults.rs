//! Shared default values for the command line.
//! Library-level defaults live in the `Default` impls of `strand_sim`'s
//! configuration types; these only cover what the CLI adds on top.

/// File written by `strand init` when no path is given.
pub const CONFIG_FILE: &str = "strand.toml";

/// Input name that means "read standard input".
pub const STDIN: &str = "-";

/// Label used for a sequence given directly on the command line.
pub const ARGUMENT_SOURCE: &str = "<argument>";

/// Label used for standard input in diagnostics.
pub const STDIN_SOURCE: &str = "<stdin>";

/// Output shape of `run` and `batch`.
pub const FORMAT: &str = "final";
