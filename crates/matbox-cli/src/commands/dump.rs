use std::path::PathBuf;

use matbox_core::Colors;

use super::CommandError;
use super::load::load_material;

pub struct DumpArgs {
    pub material_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) -> Result<String, CommandError> {
    let material = load_material(&args.material_path)?;
    // No store at hand: resources print their tags only.
    Ok(material.dump(None, Colors::new(args.color)))
}
