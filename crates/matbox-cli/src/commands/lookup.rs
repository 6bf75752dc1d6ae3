use std::path::PathBuf;

use matbox_core::{Colors, Dumper, TypeFactory};

use super::CommandError;
use super::load::load_material;

pub struct LookupArgs {
    pub material_path: PathBuf,
    pub expression_path: String,
    pub color: bool,
}

pub fn run(args: LookupArgs) -> Result<String, CommandError> {
    let material = load_material(&args.material_path)?;
    let types = TypeFactory::new();

    let (expr, ty) = material
        .lookup_sub_expression_typed(&args.expression_path, &types)
        .ok_or_else(|| CommandError::NoSuchPath(args.expression_path.clone()))?;

    let dumper = Dumper::new(None, Colors::new(args.color));
    Ok(format!("type: {ty}\n{}\n", dumper.expression(&expr)))
}
