use assert_cmd::Command;

/// Helper to get a Command for the sectionguard binary.
#[allow(deprecated)]
fn sectionguard_cmd() -> Command {
    Command::cargo_bin("sectionguard").unwrap()
}

#[test]
fn help_works() {
    sectionguard_cmd().arg("--help").assert().success();
}

#[test]
fn every_subcommand_has_help() {
    for sub in [
        "extract",
        "validate",
        "fix",
        "analyze",
        "calc",
        "info",
        "md",
        "annotations",
        "explain",
    ] {
        sectionguard_cmd().args([sub, "--help"]).assert().success();
    }
}
