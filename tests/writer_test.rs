use pomgen::{
    catalog,
    composer::{ComposeReport, Composer},
    error::Error,
    matrix::MatrixOptions,
    writer::{CheckSink, FileSink, WriteOutcome},
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn compose() -> ComposeReport {
    let spec = catalog::matrix();
    let matrix = spec.enumerate(&MatrixOptions::default()).unwrap();
    Composer::new(catalog::skeleton().unwrap(), catalog::library(&spec.bundles).unwrap())
        .compose_all(&matrix)
}

fn generate(root: &Path) -> Vec<WriteOutcome> {
    compose().persist(&mut FileSink::new(root, false))
}

#[test]
fn test_generate_writes_every_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let outcomes = generate(temp_dir.path());

    assert_eq!(outcomes.len(), 9);
    assert!(outcomes.iter().all(|o| o.action() == "written"));
    for module in ["core", "sparksql", "bokeh"] {
        for file in ["pom.xml", "deploy-scala-2.10.xml", "deploy-scala-2.11.xml"] {
            assert!(temp_dir.path().join(module).join(file).is_file());
        }
    }
}

#[test]
fn test_regeneration_is_byte_identical() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    generate(first.path());
    generate(second.path());

    assert!(!dir_diff::is_different(first.path(), second.path()).unwrap());

    let rerun = generate(first.path());
    assert!(rerun.iter().all(|o| o.action() == "unchanged"));
    assert!(!dir_diff::is_different(first.path(), second.path()).unwrap());
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let outcomes = compose().persist(&mut FileSink::new(temp_dir.path(), true));

    assert!(outcomes.iter().all(|o| o.action() == "would write"));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_check_detects_hand_edited_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    generate(temp_dir.path());

    let clean = compose().persist(&mut CheckSink::new(temp_dir.path()));
    assert!(clean.iter().all(|o| o.action() == "unchanged"));

    let edited = temp_dir.path().join("sparksql/deploy-scala-2.11.xml");
    let content = fs::read_to_string(&edited).unwrap();
    fs::write(&edited, content.replace("<version>2.0.0</version>", "<version>1.6.2</version>"))
        .unwrap();

    let outcomes = compose().persist(&mut CheckSink::new(temp_dir.path()));
    let stale: Vec<&WriteOutcome> = outcomes.iter().filter(|o| o.action() == "stale").collect();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].path(), edited.as_path());
    match stale[0] {
        WriteOutcome::Stale { unified_diff, .. } => {
            assert!(unified_diff.contains("-      <version>1.6.2</version>"));
            assert!(unified_diff.contains("+      <version>2.0.0</version>"));
        }
        other => panic!("Expected Stale, got {other:?}"),
    }
}

#[test]
fn test_write_failure_is_recorded_against_its_target() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("core"), "not a directory").unwrap();

    let mut report = compose();
    let outcomes = report.persist(&mut FileSink::new(temp_dir.path(), false));

    assert_eq!(outcomes.len(), 6);
    assert!(outcomes.iter().all(|o| o.action() == "written"));
    assert_eq!(report.failures.len(), 3);
    for failure in &report.failures {
        assert_eq!(failure.target.module, "core");
        assert!(matches!(failure.error, Error::IoError(_)));
    }
    for module in ["sparksql", "bokeh"] {
        assert!(temp_dir.path().join(module).join("pom.xml").is_file());
    }
    assert!(matches!(report.ensure_success(), Err(Error::BatchError { failed: 3, total: 9 })));
}
