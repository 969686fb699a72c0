//! pomgen's main application entry point.
//! Parses arguments, enumerates the target matrix, composes every target and
//! hands the documents to the selected sink.

use std::path::PathBuf;

use pomgen::{
    catalog,
    cli::{get_args, Args},
    composer::Composer,
    config::load_settings,
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    writer::{CheckSink, DocumentSink, FileSink, WriteOutcome},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads settings and merges command line overrides
/// 2. Enumerates the target matrix
/// 3. Composes every target, collecting failures
/// 4. Persists (or checks) each rendered document
/// 5. Reports all failures together
fn run(args: Args) -> Result<()> {
    let settings = load_settings(args.config.as_deref(), ".")?;
    let mut options = settings.matrix_options();
    if !args.modules.is_empty() {
        options.modules = args.modules;
    }
    if !args.contexts.is_empty() {
        options.contexts = args.contexts;
    }
    if args.project_version.is_some() {
        options.version = args.project_version;
    }
    let output_root =
        args.output_dir.or(settings.output_dir).unwrap_or_else(|| PathBuf::from("."));

    let spec = catalog::matrix();
    let matrix = spec.enumerate(&options)?;

    if args.list {
        for target in &matrix.targets {
            println!("{}: '{}'", target.id, output_root.join(&target.output_path).display());
        }
        return Ok(());
    }

    let composer = Composer::new(catalog::skeleton()?, catalog::library(&spec.bundles)?);
    let mut report = composer.compose_all(&matrix);

    let mut sink: Box<dyn DocumentSink> = if args.check {
        Box::new(CheckSink::new(&output_root))
    } else {
        Box::new(FileSink::new(&output_root, args.dry_run))
    };
    let outcomes = report.persist(&mut *sink);

    let mut stale = 0;
    for outcome in &outcomes {
        println!("{}: '{}'", outcome.action(), outcome.path().display());
        if let WriteOutcome::Stale { unified_diff, .. } = outcome {
            stale += 1;
            print!("{unified_diff}");
        }
    }

    for failure in &report.failures {
        eprintln!("{}", failure.error);
    }
    report.ensure_success()?;

    if stale > 0 {
        return Err(Error::StaleDocumentsError { count: stale });
    }

    println!(
        "Generated {} documents under {}.",
        report.documents.len(),
        output_root.display()
    );
    Ok(())
}
