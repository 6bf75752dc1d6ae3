use std::fmt::Write as _;
use std::path::PathBuf;

use matbox_core::Type;
use matbox_target::{LayoutBuilder, StringMode};

use super::CommandError;
use super::load::load_material;

pub struct LayoutArgs {
    pub material_path: PathBuf,
    pub mapped_strings: bool,
}

pub fn run(args: LayoutArgs) -> Result<String, CommandError> {
    let material = load_material(&args.material_path)?;
    let arguments = material.arguments();
    let types: Vec<Type> = arguments.iter().map(|(_, v)| v.ty()).collect();

    let strings = if args.mapped_strings {
        StringMode::Mapped
    } else {
        StringMode::Unmapped
    };
    let layout = LayoutBuilder::new().string_mode(strings).build(&types)?;

    let mut out = String::new();
    writeln!(out, "size: {} bytes", layout.size()).unwrap();
    let root = layout.root();
    for (i, (name, ty)) in arguments.iter().map(|(n, _)| n).zip(&types).enumerate() {
        let Some(state) = layout.nested_state(i, root) else {
            break;
        };
        writeln!(
            out,
            "{i}: {name}: {ty} @{} ({} bytes)",
            layout.offset(state),
            layout.entry_size(state)
        )
        .unwrap();
    }
    Ok(out)
}
