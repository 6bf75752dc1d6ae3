use std::path::PathBuf;

use super::*;
use crate::cli::commands::{dump_command, hashes_command, layout_command, lookup_command};

#[test]
fn dump_params() {
    let m = dump_command()
        .try_get_matches_from(["dump", "wood.cmat", "--color", "always"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.material_path, PathBuf::from("wood.cmat"));
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn color_defaults_to_auto() {
    let m = dump_command()
        .try_get_matches_from(["dump", "wood.cmat"])
        .unwrap();

    assert_eq!(DumpParams::from_matches(&m).color, ColorChoice::Auto);
}

#[test]
fn material_path_is_required() {
    assert!(hashes_command().try_get_matches_from(["hashes"]).is_err());
}

#[test]
fn unknown_color_is_rejected() {
    let result = dump_command().try_get_matches_from(["dump", "wood.cmat", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn lookup_path_defaults_to_body() {
    let m = lookup_command()
        .try_get_matches_from(["lookup", "wood.cmat"])
        .unwrap();
    assert_eq!(LookupParams::from_matches(&m).expression_path, "");

    let m = lookup_command()
        .try_get_matches_from(["lookup", "wood.cmat", "surface.scattering"])
        .unwrap();
    assert_eq!(
        LookupParams::from_matches(&m).expression_path,
        "surface.scattering"
    );
}

#[test]
fn layout_mapped_strings_flag() {
    let m = layout_command()
        .try_get_matches_from(["layout", "wood.cmat", "--mapped-strings"])
        .unwrap();
    assert!(LayoutParams::from_matches(&m).mapped_strings);

    let m = layout_command()
        .try_get_matches_from(["layout", "wood.cmat"])
        .unwrap();
    assert!(!LayoutParams::from_matches(&m).mapped_strings);
}

#[test]
fn verbosity_is_global() {
    let m = build_cli()
        .try_get_matches_from(["matbox", "hashes", "wood.cmat", "-vv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);
}
