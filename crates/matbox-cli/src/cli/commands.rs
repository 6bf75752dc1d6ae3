//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("matbox")
        .about("Inspect persisted compiled materials")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(dump_command())
        .subcommand(hashes_command())
        .subcommand(lookup_command())
        .subcommand(layout_command())
}

/// Full text trace of a compiled material.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show arguments, temporaries, body and hashes")
        .after_help(
            r#"EXAMPLES:
  matbox dump wood.cmat
  matbox dump wood.cmat --color never"#,
        )
        .arg(material_path_arg())
        .arg(color_arg())
}

pub fn hashes_command() -> Command {
    Command::new("hashes")
        .about("Show the content hash and one hash per material slot")
        .arg(material_path_arg())
}

pub fn lookup_command() -> Command {
    Command::new("lookup")
        .about("Show the sub-expression at a dotted path")
        .after_help(
            r#"EXAMPLES:
  matbox lookup wood.cmat surface.scattering
  matbox lookup wood.cmat ior"#,
        )
        .arg(material_path_arg())
        .arg(expression_path_arg())
        .arg(color_arg())
}

pub fn layout_command() -> Command {
    Command::new("layout")
        .about("Show the argument block layout of the material's parameters")
        .arg(material_path_arg())
        .arg(mapped_strings_arg())
}
