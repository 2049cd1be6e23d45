use license_reconciler::adapters::outbound::console::{
    QuietProgressReporter, StderrProgressReporter,
};
use license_reconciler::adapters::outbound::filesystem::SnapshotRepository;
use license_reconciler::application::dto::{ScanRequest, ScanResponse};
use license_reconciler::application::factories::{
    FormatterFactory, PresenterFactory, PresenterType,
};
use license_reconciler::application::use_cases::ScanLicensesUseCase;
use license_reconciler::cli::{Args, ScanOptions};
use license_reconciler::config::{self, ConfigFile};
use license_reconciler::license_analysis::policies::CompatibilityRuleset;
use license_reconciler::ports::outbound::ProgressReporter;
use license_reconciler::shared::error::ExitCode;
use license_reconciler::shared::security::{read_checked_file, MAX_CONFIG_SIZE};
use license_reconciler::shared::Result;
use owo_colors::OwoColorize;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                ExitCode::ScanFailed.as_i32()
            } else {
                ExitCode::Success.as_i32()
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ScanFailed.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let options = args.command.options();
    let view = args.command.view();

    let response = if options.quiet {
        scan::<QuietProgressReporter>(options).await?
    } else {
        scan::<StderrProgressReporter>(options).await?
    };

    if !options.quiet {
        eprintln!("{}", FormatterFactory::progress_message(options.format, view));
    }

    let formatter = FormatterFactory::create(options.format);
    let output = formatter.format(&response, view)?;

    PresenterFactory::create(PresenterType::from_output(options.output.clone()))
        .present(&output)?;

    if !options.quiet {
        print_summary(&response);
    }

    Ok(response.exit_code)
}

/// Loads inputs, wires the adapters into the use case and runs it
async fn scan<PR>(options: &ScanOptions) -> Result<ScanResponse>
where
    PR: ProgressReporter + Default,
{
    let reporter = PR::default();

    let repository = SnapshotRepository::load(&options.snapshot)?;
    reporter.report(&format!(
        "📦 Loaded snapshot of {} ({} package(s))",
        repository.root(),
        repository.package_count()
    ));

    let config = load_config(options, &reporter)?;
    for field in config.unknown_field_names() {
        reporter.report_error(&format!(
            "⚠️  Warning: Unknown field '{}' in config file, ignored",
            field
        ));
    }

    let policy = config.to_policy(&options.allow, &options.ignore)?;
    let max_depth = options.max_depth.or(config.max_depth);
    let ruleset = load_ruleset(options.ruleset.as_deref())?;

    // Create use case with injected dependencies
    let use_case = ScanLicensesUseCase::new(
        repository.clone(),
        repository.clone(),
        PR::default(),
        ruleset,
    );
    let request = ScanRequest::new(repository.root().clone(), policy, max_depth);

    use_case.execute(request).await
}

/// Explicit `--config` wins; otherwise a config next to the snapshot is used if present
fn load_config<PR: ProgressReporter>(options: &ScanOptions, reporter: &PR) -> Result<ConfigFile> {
    if let Some(path) = &options.config {
        let config = config::load_config_from_path(path)?;
        reporter.report(&format!("⚙️  Using config file {}", path.display()));
        return Ok(config);
    }

    let snapshot_dir = options
        .snapshot
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    match config::discover_config(snapshot_dir)? {
        Some((path, config)) => {
            reporter.report(&format!("⚙️  Using config file {}", path.display()));
            Ok(config)
        }
        None => Ok(ConfigFile::default()),
    }
}

fn load_ruleset(path: Option<&Path>) -> Result<CompatibilityRuleset> {
    match path {
        Some(path) => {
            let content = read_checked_file(path, "compatibility ruleset", MAX_CONFIG_SIZE)?;
            CompatibilityRuleset::from_json(&content)
        }
        None => CompatibilityRuleset::builtin(),
    }
}

fn print_summary(response: &ScanResponse) {
    let summary = format!(
        "{} package(s) scanned, {} issue(s), project compatibility: {}",
        response.determinations.len(),
        response.issues.len(),
        response.compatibility.project_compatible()
    );

    if response.has_issues() {
        eprintln!("{} {}", "✗".red().bold(), summary.yellow());
    } else {
        eprintln!("{} {}", "✓".green().bold(), summary.green());
    }
}
