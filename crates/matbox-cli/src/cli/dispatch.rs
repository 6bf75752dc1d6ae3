//! Extract params from `ArgMatches` and convert them to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::hashes::HashesArgs;
use crate::commands::layout::LayoutArgs;
use crate::commands::lookup::LookupArgs;

pub struct DumpParams {
    pub material_path: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            material_path: material_path(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            material_path: p.material_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct HashesParams {
    pub material_path: PathBuf,
}

impl HashesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            material_path: material_path(m),
        }
    }
}

impl From<HashesParams> for HashesArgs {
    fn from(p: HashesParams) -> Self {
        Self {
            material_path: p.material_path,
        }
    }
}

pub struct LookupParams {
    pub material_path: PathBuf,
    pub expression_path: String,
    pub color: ColorChoice,
}

impl LookupParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            material_path: material_path(m),
            expression_path: m
                .get_one::<String>("expression_path")
                .cloned()
                .unwrap_or_default(),
            color: parse_color(m),
        }
    }
}

impl From<LookupParams> for LookupArgs {
    fn from(p: LookupParams) -> Self {
        Self {
            material_path: p.material_path,
            expression_path: p.expression_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct LayoutParams {
    pub material_path: PathBuf,
    pub mapped_strings: bool,
}

impl LayoutParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            material_path: material_path(m),
            mapped_strings: m.get_flag("mapped_strings"),
        }
    }
}

impl From<LayoutParams> for LayoutArgs {
    fn from(p: LayoutParams) -> Self {
        Self {
            material_path: p.material_path,
            mapped_strings: p.mapped_strings,
        }
    }
}

fn material_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("material_path")
        .cloned()
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
