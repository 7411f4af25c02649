use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use roimodel_cli::config::{self, ConfigMerger, ExportOverrides, parse_field_values};
use roimodel_core::adapters::{FsKvStore, FsLogoSource, FsWritePort};
use roimodel_core::pipeline::{run_export, write_export_artifacts};
use roimodel_core::ports::LogoSource;
use roimodel_core::scenarios::{ScenarioBook, ScenarioError, ScenarioListing};
use roimodel_core::settings::LogoFailurePolicy;
use roimodel_core::{CostModel, ExportFormat, InputStore};
use roimodel_domain::sensitivity::{self, SensitivityAxis};
use roimodel_domain::templates::all_templates;
use roimodel_domain::{
    DegenerateInput, DegenerateKind, degenerate_inputs, department_result_keys, get_template,
    registry_version,
};
use roimodel_render::render_json;
use roimodel_types::{Department, DepartmentResult, UnitMode};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Longest wait for background work once the export has finished.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(
    name = "roimodel",
    version,
    about = "Department ROI models for AI automation: calculate, compare, and export."
)]
struct Cli {
    /// Working root; roimodel.toml and relative paths resolve here.
    #[arg(long, global = true, default_value = ".")]
    root: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List department templates with their benchmark values.
    Templates(TemplatesArgs),
    /// Calculate ROI for one department.
    Calc(CalcArgs),
    /// Sweep one input across its range and report ROI at each step.
    Sensitivity(SensitivityArgs),
    /// Save, load, delete, list, and compare named scenarios.
    Scenario(ScenarioArgs),
    /// Write JSON, CSV, PDF, and email-share exports.
    Export(ExportArgs),
}

#[derive(Debug, Parser)]
struct TemplatesArgs {
    /// Only show this department.
    #[arg(long)]
    department: Option<Department>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Where the inputs come from and how they are adjusted.
#[derive(Debug, clap::Args)]
struct InputArgs {
    /// Department template (support, hr, finance, sales, mortgage, custom).
    #[arg(long, conflicts_with = "scenario")]
    department: Option<Department>,

    /// Start from a saved scenario instead of template benchmarks.
    #[arg(long)]
    scenario: Option<String>,

    /// Field value in its display unit, e.g. `--set ticketsPerMonth=1500`. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Enter and display this cost field per month. Repeatable.
    #[arg(long, value_name = "KEY")]
    monthly: Vec<String>,

    /// How implementation cost enters the AI total.
    #[arg(long, value_enum)]
    cost_model: Option<CostModelArg>,

    /// Scenario store directory (default: <root>/.roimodel/scenarios).
    #[arg(long)]
    store_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct CalcArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct SensitivityArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Input to vary.
    #[arg(long, value_enum)]
    axis: AxisArg,

    /// First value, in the field's display unit. Clamped to the axis range.
    #[arg(long)]
    from: f64,

    /// Last value, in the field's display unit. Clamped to the axis range.
    #[arg(long)]
    to: f64,

    #[arg(long, default_value_t = 5)]
    steps: usize,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ScenarioArgs {
    /// Scenario store directory (default: <root>/.roimodel/scenarios).
    #[arg(long, global = true)]
    store_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: ScenarioCommand,
}

#[derive(Debug, Subcommand)]
enum ScenarioCommand {
    /// Save inputs under a name, replacing any scenario with that name.
    Save {
        name: String,

        /// Department template.
        #[arg(long, default_value = "support")]
        department: Department,

        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        #[arg(long, value_name = "KEY")]
        monthly: Vec<String>,
    },
    /// Print a saved scenario's inputs.
    Load {
        name: String,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Delete a saved scenario.
    Delete { name: String },
    /// List saved scenarios.
    List {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Recalculate every saved scenario with one department's formula.
    Compare {
        #[arg(long, default_value = "support")]
        department: Department,

        #[arg(long, value_enum)]
        cost_model: Option<CostModelArg>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Parser)]
struct ExportArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Formats to write (default: all). Repeatable.
    #[arg(long = "format", value_enum)]
    formats: Vec<FormatArg>,

    /// Output directory (default: <root>/artifacts/roimodel).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// JPEG logo for the PDF report.
    #[arg(long)]
    logo: Option<Utf8PathBuf>,

    /// Longest wait for the logo, in milliseconds.
    #[arg(long)]
    logo_timeout_ms: Option<u64>,

    /// What to do when the logo cannot be loaded.
    #[arg(long, value_enum)]
    on_logo_failure: Option<LogoPolicyArg>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CostModelArg {
    Compatible,
    Corrected,
}

impl From<CostModelArg> for CostModel {
    fn from(arg: CostModelArg) -> Self {
        match arg {
            CostModelArg::Compatible => CostModel::Compatible,
            CostModelArg::Corrected => CostModel::Corrected,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum AxisArg {
    ImplementationCost,
    HumanCost,
    Volume,
}

impl From<AxisArg> for SensitivityAxis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::ImplementationCost => SensitivityAxis::ImplementationCost,
            AxisArg::HumanCost => SensitivityAxis::HumanCost,
            AxisArg::Volume => SensitivityAxis::Volume,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Json,
    Csv,
    Pdf,
    Email,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Email => ExportFormat::Email,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LogoPolicyArg {
    Skip,
    Fail,
}

impl From<LogoPolicyArg> for LogoFailurePolicy {
    fn from(arg: LogoPolicyArg) -> Self {
        match arg {
            LogoPolicyArg::Skip => LogoFailurePolicy::Skip,
            LogoPolicyArg::Fail => LogoFailurePolicy::Fail,
        }
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(exit_code_for(&e));
    }
    ExitCode::from(0)
}

/// Exit 2 when a named scenario does not exist, 1 for everything else.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ScenarioError>())
        .map(ScenarioError::exit_code)
        .unwrap_or(1)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file_config = config::load_or_default(&cli.root).context("load roimodel.toml config")?;
    let merger = ConfigMerger::new(file_config, &cli.root);

    match cli.cmd {
        Command::Templates(args) => cmd_templates(args),
        Command::Calc(args) => cmd_calc(args, &merger),
        Command::Sensitivity(args) => cmd_sensitivity(args, &merger),
        Command::Scenario(args) => cmd_scenario(args, &merger),
        Command::Export(args) => cmd_export(args, &merger),
    }
}

fn open_book(merger: &ConfigMerger, store_dir: Option<&Utf8Path>) -> ScenarioBook<FsKvStore> {
    let settings = merger.merge_store_args(store_dir);
    debug!("scenario store at {}", settings.dir);
    ScenarioBook::new(FsKvStore::new(settings.dir))
}

fn build_inputs(args: &InputArgs, merger: &ConfigMerger) -> anyhow::Result<InputStore> {
    let options = merger.calc_options(args.cost_model.map(CostModel::from));
    let mut store = match &args.scenario {
        Some(name) => {
            let snapshot = open_book(merger, args.store_dir.as_deref())
                .load(name)
                .with_context(|| format!("load scenario '{}'", name))?;
            InputStore::from_snapshot(snapshot, options)
        }
        None => InputStore::with_options(args.department.unwrap_or(Department::Support), options),
    };
    adjust_inputs(&mut store, &args.monthly, &args.set)?;
    Ok(store)
}

// Unit modes first so `--set` values are read in the chosen unit.
fn adjust_inputs(store: &mut InputStore, monthly: &[String], set: &[String]) -> anyhow::Result<()> {
    for key in monthly {
        store.set_unit_mode(key, UnitMode::Monthly)?;
    }
    for (key, value) in parse_field_values(set)? {
        store.set_field(&key, value)?;
    }
    Ok(())
}

fn input_warnings(store: &InputStore) -> Vec<DegenerateInput> {
    degenerate_inputs(get_template(store.department()), store.snapshot())
}

fn print_warnings(warnings: &[DegenerateInput]) {
    for w in warnings {
        let kind = match w.kind {
            DegenerateKind::Zero => "zero",
            DegenerateKind::Negative => "negative",
        };
        eprintln!("warning: {} ({}) is {}", w.label, w.key, kind);
    }
}

fn print_result(result: &DepartmentResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Text => {
            let department = result.department();
            let values = result.to_map();
            println!("{} ROI", get_template(department).display_name);
            if values.is_empty() {
                println!("  (no calculated fields)");
            }
            for key in department_result_keys(department) {
                let value = values.get(*key).map(|v| v.to_string()).unwrap_or_default();
                println!("  {:<28} {}", key, value);
            }
        }
    }
    Ok(())
}

fn cmd_templates(args: TemplatesArgs) -> anyhow::Result<()> {
    let templates: Vec<_> = all_templates()
        .iter()
        .filter(|t| args.department.is_none_or(|d| d == t.department))
        .collect();

    match args.format {
        OutputFormat::Text => {
            println!("Template registry {}\n", registry_version());
            for t in templates {
                println!("{} ({})", t.display_name, t.department);
                println!("  {}", t.description);
                println!("  {:<24} {:<12} SOURCE", "KEY", "BENCHMARK");
                for f in t.fields {
                    let benchmark = f
                        .benchmark_value
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "  {:<24} {:<12} {}",
                        f.key,
                        benchmark,
                        f.benchmark_source.unwrap_or("")
                    );
                }
                println!();
            }
        }
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "version": registry_version(),
                "templates": templates,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn cmd_calc(args: CalcArgs, merger: &ConfigMerger) -> anyhow::Result<()> {
    let store = build_inputs(&args.inputs, merger)?;
    print_warnings(&input_warnings(&store));
    print_result(&store.calculate(), args.format)
}

fn cmd_sensitivity(args: SensitivityArgs, merger: &ConfigMerger) -> anyhow::Result<()> {
    let store = build_inputs(&args.inputs, merger)?;
    let axis = SensitivityAxis::from(args.axis);
    let field = sensitivity::axis_field(store.department(), axis)?;
    let points = sensitivity::sweep(&store, axis, args.from, args.to, args.steps)?;

    match args.format {
        OutputFormat::Text => {
            println!("{} ({}) for {}", axis, field, store.department());
            println!("  {:>14} {:>14} {:>12}", "VALUE", "SAVINGS", "ROI %");
            for p in &points {
                println!(
                    "  {:>14.2} {:>14.2} {:>12.2}",
                    p.value,
                    p.result.savings().unwrap_or(0.0),
                    p.result.roi().unwrap_or(0.0)
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = points
                .iter()
                .map(|p| serde_json::json!({ "value": p.value, "result": p.result }))
                .collect();
            let doc = serde_json::json!({
                "department": store.department(),
                "axis": axis,
                "field": field,
                "points": rows,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn cmd_scenario(args: ScenarioArgs, merger: &ConfigMerger) -> anyhow::Result<()> {
    let book = open_book(merger, args.store_dir.as_deref());

    match args.cmd {
        ScenarioCommand::Save {
            name,
            department,
            set,
            monthly,
        } => {
            let mut store = InputStore::new(department);
            adjust_inputs(&mut store, &monthly, &set)?;
            print_warnings(&input_warnings(&store));
            let scenario = book.save(&name, store.snapshot())?;
            info!("saved scenario {} ({})", scenario.name, scenario.department);
            println!("saved {}", scenario.name);
        }
        ScenarioCommand::Load { name, format } => {
            let snapshot = book.load(&name)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                OutputFormat::Text => {
                    let template = get_template(snapshot.department);
                    println!("{} ({})", name, snapshot.department);
                    for f in template.fields {
                        let value = snapshot.display_value(f.key).unwrap_or(0.0);
                        let unit = match snapshot.unit(f.key) {
                            UnitMode::Monthly => " /month",
                            UnitMode::Annual => "",
                        };
                        println!("  {:<24} {}{}", f.key, value, unit);
                    }
                }
            }
        }
        ScenarioCommand::Delete { name } => {
            book.delete(&name)?;
            println!("deleted {}", name);
        }
        ScenarioCommand::List { format } => {
            let ScenarioListing { scenarios, skipped } = book.list_all()?;
            for err in &skipped {
                eprintln!("warning: {err}");
            }
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scenarios)?),
                OutputFormat::Text => {
                    if scenarios.is_empty() {
                        println!("No saved scenarios.");
                    }
                    for s in &scenarios {
                        println!(
                            "  {:<24} {:<10} {}",
                            s.name,
                            s.department,
                            s.saved_at.to_rfc3339()
                        );
                    }
                }
            }
        }
        ScenarioCommand::Compare {
            department,
            cost_model,
            format,
        } => {
            let options = merger.calc_options(cost_model.map(CostModel::from));
            let comparisons = book.compare(department, &options)?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&comparisons)?)
                }
                OutputFormat::Text => {
                    println!("Scenarios recalculated as {}", department);
                    println!(
                        "  {:<24} {:<10} {:>14} {:>12}",
                        "NAME", "SAVED AS", "SAVINGS", "ROI %"
                    );
                    for c in &comparisons {
                        println!(
                            "  {:<24} {:<10} {:>14.2} {:>12.2}",
                            c.scenario.name,
                            c.scenario.department,
                            c.result.savings().unwrap_or(0.0),
                            c.result.roi().unwrap_or(0.0)
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs, merger: &ConfigMerger) -> anyhow::Result<()> {
    let store = build_inputs(&args.inputs, merger)?;

    let mut settings = merger.merge_export_args(
        ExportOverrides {
            out_dir: args.out_dir,
            logo: args.logo,
            logo_timeout_ms: args.logo_timeout_ms,
            on_logo_failure: args.on_logo_failure.map(LogoFailurePolicy::from),
        },
        args.inputs.cost_model.map(CostModel::from),
    );
    if !args.formats.is_empty() {
        settings.formats = args.formats.into_iter().map(ExportFormat::from).collect();
    }

    let logo_source = settings.logo_path.clone().map(FsLogoSource::new);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let outcome = runtime.block_on(run_export(
        &settings,
        store.snapshot(),
        logo_source.as_ref().map(|s| s as &dyn LogoSource),
    ));
    // A timed-out logo read may still hold a blocking-pool thread; do not wait for it.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    let outcome = outcome?;
    print_warnings(&outcome.warnings);

    let written = write_export_artifacts(&outcome, &settings.out_dir, &FsWritePort)
        .with_context(|| format!("write exports to {}", settings.out_dir))?;
    if logo_source.is_some()
        && settings.formats.contains(&ExportFormat::Pdf)
        && !outcome.logo_embedded
    {
        eprintln!("warning: PDF report written without logo");
    }
    for path in written {
        println!("{}", path);
    }
    Ok(())
}
