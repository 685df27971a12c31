//! TestRail automation coverage CLI
//!
//! The `testrail-coverage` command fetches cases for a project/suite pair,
//! classifies them by automation status and writes the resulting reports.
//!
//! ## Commands
//!
//! - `status`: JSON summary, optional grouped dump and SQL inserts
//! - `count`: per-status counts on stdout
//! - `cases`: raw case dump
//! - `sections`: section dump (records or bare names)
//! - `projects` / `suites`: id and name listings

use anyhow::{Context, Result};
use clap::{
    ArgGroup, ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum,
};
use coverage_core::{
    classify, coverage_inserts, emit_artifact_written, emit_cases_fetched, emit_classified,
    emit_summarized, render_counts, section_names, sections_dump_file_name, select,
    status_dump_file_name, strip_sections, summarize, summary_insert, write_json_pretty,
    write_summary_json, AutomationStatus, Placeholder, ReportSpan, Summary, DEFAULT_CASES_PATH,
    DEFAULT_COVERAGE_TABLE, DEFAULT_SUMMARY_PATH, DEFAULT_SUMMARY_TABLE,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use testrail_client::{CaseSource, Project, Suite, TestRailClient};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "testrail-coverage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Gets automation coverage data for mobile projects on TestRail", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize automation status counts and optionally dump cases / SQL
    Status(StatusArgs),

    /// Print per-status counts
    Count {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        types: TypeArgs,
    },

    /// Dump the raw case records of a suite
    Cases {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        types: TypeArgs,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_CASES_PATH)]
        output: PathBuf,
    },

    /// Dump the sections of a suite
    Sections {
        #[command(flatten)]
        target: TargetArgs,

        /// Write only the section names
        #[arg(long)]
        names_only: bool,

        /// Directory for sections-from-suite-<suite>.json
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// List projects
    Projects,

    /// List the suites of a project
    Suites {
        /// Project id
        #[arg(long)]
        project: u64,
    },
}

#[derive(Args, Debug, Clone)]
struct TargetArgs {
    /// Use selected project
    #[arg(long)]
    project: u64,

    /// Use selected suite
    #[arg(long)]
    suite: u64,
}

#[derive(Args, Debug, Clone)]
struct TypeArgs {
    /// Case types to filter on (default: all types)
    #[arg(long = "type", num_args = 1.., value_parser = clap::value_parser!(u8).range(1..=14))]
    types: Vec<u8>,
}

#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("statuses")
        .required(true)
        .multiple(true)
        .args(["status", "automation_status"])
))]
struct StatusArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Custom automation status codes (1-5)
    #[arg(long, num_args = 1.., value_parser = clap::value_parser!(u8).range(1..=5))]
    status: Vec<u8>,

    /// Custom automation status names (untriaged, suitable, ...)
    #[arg(long, num_args = 1.., value_parser = parse_status)]
    automation_status: Vec<AutomationStatus>,

    #[command(flatten)]
    types: TypeArgs,

    /// Strip dumped cases down to title and automation status
    #[arg(long, value_enum, num_args = 0..=1, default_value_t = YesNo::No, default_missing_value = "no")]
    stripped: YesNo,

    /// Output file for the JSON summary
    #[arg(short, long, default_value = DEFAULT_SUMMARY_PATH)]
    output: PathBuf,

    /// Also write custom-automation-status-<suite>-<STATUS>.json
    #[arg(long)]
    dump: bool,

    /// Directory for the grouped dump
    #[arg(long, default_value = ".")]
    dump_dir: PathBuf,

    /// Print a parameterized summary INSERT
    #[arg(long)]
    sql: bool,

    /// Table for the summary INSERT
    #[arg(long, default_value = DEFAULT_SUMMARY_TABLE)]
    sql_table: String,

    /// Print one parameterized coverage INSERT per requested status
    #[arg(long)]
    per_state_sql: bool,

    /// Table for the per-status INSERTs
    #[arg(long, default_value = DEFAULT_COVERAGE_TABLE)]
    coverage_table: String,

    /// Bind-parameter style
    #[arg(long, value_enum, default_value_t = PlaceholderArg::Dollar)]
    placeholders: PlaceholderArg,

    /// Codes and names interleaved as typed, filled in by [`parse_cli`].
    #[arg(skip)]
    order: Vec<AutomationStatus>,
}

impl StatusArgs {
    /// Requested statuses in command-line order, across both flags.
    ///
    /// Without recorded argument positions, codes come before names.
    fn requested(&self) -> Vec<AutomationStatus> {
        if !self.order.is_empty() {
            return self.order.clone();
        }
        self.status
            .iter()
            .filter_map(|code| AutomationStatus::from_code(i64::from(*code)))
            .chain(self.automation_status.iter().copied())
            .collect()
    }

    /// Record the interleaved order of `--status` and `--automation-status`
    /// values using the argument indices clap assigned while parsing.
    fn record_order(&mut self, matches: &ArgMatches) {
        let mut positioned: Vec<(usize, AutomationStatus)> = Vec::new();
        if let (Some(indices), Some(codes)) = (
            matches.indices_of("status"),
            matches.get_many::<u8>("status"),
        ) {
            positioned.extend(indices.zip(codes).filter_map(|(index, code)| {
                AutomationStatus::from_code(i64::from(*code)).map(|status| (index, status))
            }));
        }
        if let (Some(indices), Some(names)) = (
            matches.indices_of("automation_status"),
            matches.get_many::<AutomationStatus>("automation_status"),
        ) {
            positioned.extend(indices.zip(names.copied()));
        }
        positioned.sort_by_key(|(index, _)| *index);
        self.order = positioned.into_iter().map(|(_, status)| status).collect();
    }
}

/// Parse the command line, keeping the relative order of status flags.
fn parse_cli<I, T>(argv: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = Cli::command().try_get_matches_from(argv)?;
    let mut cli = Cli::from_arg_matches(&matches)?;
    if let (Commands::Status(args), Some(("status", sub))) =
        (&mut cli.command, matches.subcommand())
    {
        args.record_order(sub);
    }
    Ok(cli)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum YesNo {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlaceholderArg {
    Dollar,
    Question,
}

impl From<PlaceholderArg> for Placeholder {
    fn from(arg: PlaceholderArg) -> Self {
        match arg {
            PlaceholderArg::Dollar => Placeholder::Dollar,
            PlaceholderArg::Question => Placeholder::Question,
        }
    }
}

fn parse_status(raw: &str) -> std::result::Result<AutomationStatus, String> {
    raw.parse::<AutomationStatus>().map_err(|e| e.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = parse_cli(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    coverage_core::init_tracing(cli.json, level);

    // Credentials are checked here, before any request is made.
    let client = TestRailClient::from_env().context("Failed to configure TestRail client")?;
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Status(args) => cmd_status(&client, &args, &mut out).await.map(|_| ()),
        Commands::Count { target, types } => {
            cmd_count(&client, &target, &types.types, &mut out)
                .await
                .map(|_| ())
        }
        Commands::Cases {
            target,
            types,
            output,
        } => cmd_cases(&client, &target, &types.types, &output).await,
        Commands::Sections {
            target,
            names_only,
            output_dir,
        } => cmd_sections(&client, &target, names_only, &output_dir)
            .await
            .map(|_| ()),
        Commands::Projects => cmd_projects(&client, &mut out).await,
        Commands::Suites { project } => cmd_suites(&client, project, &mut out).await,
    }
}

/// Fetch the project, suite and cases for a report.
///
/// Everything is fetched before anything is written, so a failed request
/// leaves no partial artifacts behind.
async fn fetch_report_inputs(
    source: &dyn CaseSource,
    target: &TargetArgs,
    types: &[u8],
) -> Result<(Project, Suite, Vec<coverage_core::Case>)> {
    info!("Fetching project data from TestRail...");
    let project = source
        .project(target.project)
        .await
        .with_context(|| format!("Failed to fetch project {}", target.project))?;

    info!("Fetching suite data from TestRail...");
    let suite = source
        .suite(target.suite)
        .await
        .with_context(|| format!("Failed to fetch suite {}", target.suite))?;

    info!("Fetching cases data from TestRail...");
    let cases = source
        .cases(target.project, target.suite, types)
        .await
        .with_context(|| {
            format!(
                "Failed to fetch cases for project {} suite {}",
                target.project, target.suite
            )
        })?;
    emit_cases_fetched(cases.len());

    Ok((project, suite, cases))
}

/// Classify cases and write the summary, grouped dump and SQL output.
async fn cmd_status(
    source: &dyn CaseSource,
    args: &StatusArgs,
    out: &mut dyn Write,
) -> Result<Summary> {
    let _span = ReportSpan::enter(args.target.project, args.target.suite);
    let requested = args.requested();

    let (project, suite, cases) =
        fetch_report_inputs(source, &args.target, &args.types.types).await?;

    let buckets = classify(cases);
    emit_classified(&buckets);
    let summary = summarize(&buckets, &project.name, &suite.name);
    emit_summarized(&summary);

    // Statements are built before any file is touched so a rejected table
    // name leaves no artifacts behind.
    let style = Placeholder::from(args.placeholders);
    let mut statements = Vec::new();
    if args.sql {
        statements.push(
            summary_insert(&args.sql_table, &summary, style)
                .context("Failed to build summary INSERT")?,
        );
    }
    if args.per_state_sql {
        statements.extend(
            coverage_inserts(&args.coverage_table, &summary, &requested, style)
                .context("Failed to build coverage INSERTs")?,
        );
    }

    info!("Writing case automation status to JSON...");
    write_summary_json(&args.output, &summary)?;
    emit_artifact_written(&args.output);

    if args.dump {
        let groups = select(&buckets, &requested, args.stripped == YesNo::Yes);
        let path = args
            .dump_dir
            .join(status_dump_file_name(args.target.suite, &requested));
        write_json_pretty(&path, &groups)?;
        emit_artifact_written(&path);
    }

    if !statements.is_empty() {
        info!("Writing SQL inserts...");
    }
    for stmt in &statements {
        writeln!(out, "{}", serde_json::to_string(stmt)?)?;
    }

    Ok(summary)
}

/// Print the five bucket sizes without writing any file.
async fn cmd_count(
    source: &dyn CaseSource,
    target: &TargetArgs,
    types: &[u8],
    out: &mut dyn Write,
) -> Result<Summary> {
    let _span = ReportSpan::enter(target.project, target.suite);
    let (project, suite, cases) = fetch_report_inputs(source, target, types).await?;

    let buckets = classify(cases);
    emit_classified(&buckets);
    let summary = summarize(&buckets, &project.name, &suite.name);

    write!(out, "{}", render_counts(&summary))?;
    Ok(summary)
}

/// Dump the raw case records.
async fn cmd_cases(
    source: &dyn CaseSource,
    target: &TargetArgs,
    types: &[u8],
    output: &Path,
) -> Result<()> {
    info!("Fetching cases data from TestRail...");
    let cases = source
        .cases(target.project, target.suite, types)
        .await
        .with_context(|| {
            format!(
                "Failed to fetch cases for project {} suite {}",
                target.project, target.suite
            )
        })?;
    emit_cases_fetched(cases.len());

    write_json_pretty(output, &cases)?;
    emit_artifact_written(output);
    Ok(())
}

/// Write sections-from-suite-<suite>.json and return its path.
async fn cmd_sections(
    source: &dyn CaseSource,
    target: &TargetArgs,
    names_only: bool,
    output_dir: &Path,
) -> Result<PathBuf> {
    info!("Fetching section data from TestRail...");
    let sections = source
        .sections(target.project, target.suite)
        .await
        .with_context(|| {
            format!(
                "Failed to fetch sections for project {} suite {}",
                target.project, target.suite
            )
        })?;

    let path = output_dir.join(sections_dump_file_name(target.suite));
    if names_only {
        write_json_pretty(&path, &section_names(&sections))?;
    } else {
        write_json_pretty(&path, &strip_sections(&sections))?;
    }
    emit_artifact_written(&path);
    Ok(path)
}

/// List projects as `<id>\t<name>` lines.
async fn cmd_projects(source: &dyn CaseSource, out: &mut dyn Write) -> Result<()> {
    let projects = source
        .projects()
        .await
        .context("Failed to fetch projects")?;
    for project in projects {
        writeln!(out, "{}\t{}", project.id, project.name)?;
    }
    Ok(())
}

/// List the suites of a project as `<id>\t<name>` lines.
async fn cmd_suites(source: &dyn CaseSource, project_id: u64, out: &mut dyn Write) -> Result<()> {
    let suites = source
        .suites(project_id)
        .await
        .with_context(|| format!("Failed to fetch suites for project {}", project_id))?;
    for suite in suites {
        writeln!(out, "{}\t{}", suite.id, suite.name)?;
    }
    Ok(())
}
