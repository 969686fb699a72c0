use pomgen::{
    catalog,
    composer::{ComposeReport, Composer},
    error::Error,
    fragment::FragmentLibrary,
    matrix::{MatrixOptions, MatrixSpec},
    placeholder,
    target::{DeploymentContext, TargetId},
};

fn compose(options: &MatrixOptions) -> (MatrixSpec, ComposeReport) {
    let spec = catalog::matrix();
    let matrix = spec.enumerate(options).unwrap();
    let composer =
        Composer::new(catalog::skeleton().unwrap(), catalog::library(&spec.bundles).unwrap());
    let report = composer.compose_all(&matrix);
    (spec, report)
}

fn id(module: &str, variant: &str, context: DeploymentContext) -> TargetId {
    TargetId { module: module.to_string(), variant: variant.to_string(), context }
}

fn document<'a>(report: &'a ComposeReport, target: &TargetId) -> &'a str {
    &report.document(target).unwrap_or_else(|| panic!("no document for {target}")).content
}

fn body(library: &FragmentLibrary, name: &str) -> String {
    library.lookup("test", name).unwrap().body().to_string()
}

#[test]
fn test_full_matrix_renders() {
    let (_, report) = compose(&MatrixOptions::default());

    assert!(report.is_success(), "failures: {:?}", report.failures);
    let paths: Vec<String> =
        report.documents.iter().map(|d| d.output_path.display().to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "core/pom.xml",
            "core/deploy-scala-2.10.xml",
            "core/deploy-scala-2.11.xml",
            "sparksql/pom.xml",
            "sparksql/deploy-scala-2.10.xml",
            "sparksql/deploy-scala-2.11.xml",
            "bokeh/pom.xml",
            "bokeh/deploy-scala-2.10.xml",
            "bokeh/deploy-scala-2.11.xml",
        ]
    );
}

#[test]
fn test_no_placeholder_survives() {
    let (_, report) = compose(&MatrixOptions::default());
    for doc in &report.documents {
        assert!(
            placeholder::leftover_markers(&doc.content).is_empty(),
            "{} still has markers",
            doc.target
        );
        assert!(doc.content.starts_with("<project xmlns="));
        assert!(doc.content.ends_with("</project>\n"));
    }
}

#[test]
fn test_core_runtime_variants_differ_only_where_they_must() {
    let (_, report) = compose(&MatrixOptions::default());
    let v210 = document(&report, &id("core", "2.10", DeploymentContext::Release));
    let v211 = document(&report, &id("core", "2.11", DeploymentContext::Release));

    for doc in [v210, v211] {
        assert!(doc.contains("<version>1.0.4</version>\n  <packaging>jar</packaging>"));
    }

    assert!(v210.contains("<artifactId>histogrammar_2.10</artifactId>"));
    assert!(v210.contains("<artifactId>scalatest_2.10</artifactId>"));
    assert!(v210.contains("<version>2.10.6</version>"));
    assert!(v210.contains(
        "    <maven.compiler.source>1.7</maven.compiler.source>\n    <maven.compiler.target>1.7</maven.compiler.target>\n"
    ));
    assert!(!v210.contains("_2.11"));

    assert!(v211.contains("<artifactId>histogrammar_2.11</artifactId>"));
    assert!(v211.contains("<artifactId>scalatest_2.11</artifactId>"));
    assert!(v211.contains("<version>2.11.8</version>"));
    assert!(v211.contains(
        "    <maven.compiler.source>1.8</maven.compiler.source>\n    <maven.compiler.target>1.8</maven.compiler.target>\n"
    ));
    assert!(!v211.contains("_2.10"));
}

#[test]
fn test_project_version_identical_across_module_targets() {
    let (spec, report) = compose(&MatrixOptions::default());
    for module in &spec.modules {
        let docs: Vec<&str> = report
            .documents
            .iter()
            .filter(|d| d.target.module == module.id)
            .map(|d| d.content.as_str())
            .collect();
        assert_eq!(docs.len(), 3);
        for doc in docs {
            assert!(doc.contains("</artifactId>\n  <version>1.0.4</version>\n"));
        }
    }
}

#[test]
fn test_companion_versions_follow_variant_bundle() {
    let (spec, report) = compose(&MatrixOptions::default());
    for bundle in &spec.bundles {
        let doc = document(&report, &id("sparksql", bundle.id(), DeploymentContext::Release));
        assert!(doc.contains(&format!(
            "<artifactId>spark-sql_{}</artifactId>\n      <version>{}</version>",
            bundle.binary_version, bundle.spark_version
        )));
        for other in spec.bundles.iter().filter(|b| *b != bundle) {
            assert!(!doc.contains(&format!("<version>{}</version>", other.spark_version)));
            assert!(!doc.contains(&format!("<version>{}</version>", other.runtime_version)));
            assert!(!doc.contains(&format!("_{}</artifactId>", other.binary_version)));
        }
    }
}

#[test]
fn test_local_descriptor_defers_to_profiles() {
    let (_, report) = compose(&MatrixOptions::default());
    let doc = document(&report, &id("sparksql", "profiles", DeploymentContext::Local));

    assert!(doc.contains("<artifactId>histogrammar-sparksql_${scala.binary.version}</artifactId>"));
    assert!(doc.contains("<artifactId>spark-sql_${scala.binary.version}</artifactId>\n      <version>${spark.version}</version>"));
    assert!(doc.contains("<id>scala-2.10</id>"));
    assert!(doc.contains("<id>scala-2.11</id>"));
    assert!(doc.contains("<artifactId>maven-dependency-plugin</artifactId>"));
    assert!(!doc.contains("maven-gpg-plugin"));
    assert!(!doc.contains("<distributionManagement>"));
    assert!(!doc.contains("<maven.compiler.source>${"));
}

#[test]
fn test_release_descriptor_includes_signing_and_staging() {
    let (_, report) = compose(&MatrixOptions::default());
    let doc = document(&report, &id("bokeh", "2.11", DeploymentContext::Release));

    assert!(doc.contains("<artifactId>maven-gpg-plugin</artifactId>"));
    assert!(doc.contains("<artifactId>nexus-staging-maven-plugin</artifactId>"));
    assert!(doc.contains("<pluginManagement>"));
    assert!(doc.contains("<distributionManagement>"));
    assert!(doc.contains("<artifactId>bokeh_2.11</artifactId>\n      <version>0.7</version>"));
    assert!(!doc.contains("<profiles>"));
    assert!(!doc.contains("maven-dependency-plugin"));
    assert!(!doc.contains("scalatest-maven-plugin"));
}

#[test]
fn test_fragment_order_is_preserved_and_contiguous() {
    let spec = catalog::matrix();
    let library = catalog::library(&spec.bundles).unwrap();
    let (_, report) = compose(&MatrixOptions::default());

    let local = document(&report, &id("core", "profiles", DeploymentContext::Local));
    let plugins = body(&library, "scalatest") + &body(&library, "copydependencies");
    assert!(local.contains(&plugins));

    let release = document(&report, &id("core", "2.10", DeploymentContext::Release));
    let executions = body(&library, "sourcejar") + &body(&library, "javadocjar");
    assert!(release.contains(&executions));
    let signing = body(&library, "gpgplugin") + &body(&library, "stagingplugin");
    assert!(release.contains(&signing));
}

#[test]
fn test_rendering_is_idempotent() {
    let (_, first) = compose(&MatrixOptions::default());
    let (_, second) = compose(&MatrixOptions::default());
    assert_eq!(first.documents, second.documents);
}

#[test]
fn test_version_override_reaches_cross_module_dependency() {
    let options = MatrixOptions {
        modules: vec!["bokeh".to_string()],
        contexts: vec![DeploymentContext::Release],
        version: Some("1.1.0".to_string()),
    };
    let (_, report) = compose(&options);

    assert_eq!(report.documents.len(), 2);
    for doc in &report.documents {
        assert!(doc.content.contains("<artifactId>histogrammar-bokeh_"));
        assert!(doc.content.contains("</artifactId>\n      <version>1.1.0</version>"));
        assert!(!doc.content.contains("1.0.4"));
    }
}

#[test]
fn test_missing_fragment_fails_only_affected_targets() {
    let spec = catalog::matrix();
    let full = catalog::library(&spec.bundles).unwrap();
    let mut library = FragmentLibrary::new();
    for name in full.names().filter(|name| *name != "gpgplugin") {
        library.define(name, body(&full, name)).unwrap();
    }

    let matrix = spec.enumerate(&MatrixOptions::default()).unwrap();
    let report = Composer::new(catalog::skeleton().unwrap(), library).compose_all(&matrix);

    assert_eq!(report.documents.len(), 3);
    assert!(report.documents.iter().all(|d| d.target.context == DeploymentContext::Local));
    assert_eq!(report.failures.len(), 6);
    for failure in &report.failures {
        match &failure.error {
            Error::FragmentNotFoundError { target, fragment } => {
                assert_eq!(target, &failure.target.to_string());
                assert_eq!(fragment, "gpgplugin");
            }
            other => panic!("Expected FragmentNotFoundError, got {other:?}"),
        }
    }
    assert!(matches!(report.ensure_success(), Err(Error::BatchError { failed: 6, total: 9 })));
}
