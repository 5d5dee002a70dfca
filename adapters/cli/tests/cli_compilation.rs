use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "warren"])
        .status()
        .expect("failed to invoke cargo check for the warren binary");

    assert!(
        status.success(),
        "warren binary with --capacity/--seed/--bounds/--config/--summary should type-check"
    );
}

#[test]
fn single_cell_area_prints_map_and_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_warren"))
        .args(["--capacity", "1", "--seed", "3", "--bounds", "inclusive", "--summary"])
        .output()
        .expect("failed to run the warren binary");

    assert!(output.status.success(), "warren exited with {}", output.status);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "@\nstart: 0,0\nend: 0,0\n0,0: \n"
    );
}

#[test]
fn zero_capacity_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_warren"))
        .args(["--capacity", "0", "--seed", "3"])
        .output()
        .expect("failed to run the warren binary");

    assert!(!output.status.success(), "--capacity 0 must fail");
    assert!(output.stdout.is_empty(), "no map is drawn for a rejected capacity");
}
