use std::fmt::Write as _;
use std::path::PathBuf;

use matbox_material::Slot;

use super::CommandError;
use super::load::load_material;

pub struct HashesArgs {
    pub material_path: PathBuf,
}

pub fn run(args: HashesArgs) -> Result<String, CommandError> {
    let material = load_material(&args.material_path)?;

    let width = Slot::ALL.iter().map(|s| s.path().len()).max().unwrap_or(0);
    let mut out = String::new();
    writeln!(out, "{:width$}  {}", "material", material.hash()).unwrap();
    for slot in Slot::ALL {
        writeln!(out, "{:width$}  {}", slot.path(), material.slot_hash(slot)).unwrap();
    }
    writeln!(out, "properties: {}", material.properties()).unwrap();
    Ok(out)
}
