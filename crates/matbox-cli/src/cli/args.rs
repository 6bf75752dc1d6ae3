//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Persisted compiled material (positional).
pub fn material_path_arg() -> Arg {
    Arg::new("material_path")
        .value_name("MATERIAL")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Compiled material file")
}

/// Dotted sub-expression path (positional).
pub fn expression_path_arg() -> Arg {
    Arg::new("expression_path")
        .value_name("PATH")
        .default_value("")
        .help("Dotted path into the material body, e.g. surface.scattering")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Pack strings as table indices (--mapped-strings).
pub fn mapped_strings_arg() -> Arg {
    Arg::new("mapped_strings")
        .long("mapped-strings")
        .action(ArgAction::SetTrue)
        .help("Lay out strings as 32-bit string table indices")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}
