//! CLI entry point for sectionguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and
//! exit codes. All business logic lives in the `sectionguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use sectionguard_app::{
    AnalyzeInput, CalcInput, ExplainOutput, ExtractInput, FixInput, InfoInput, ValidateInput,
    WriteTarget, format_extract_summary, format_info, format_score, parse_fix_report, parse_validation_report,
    render_annotations, render_balance, render_fix_markdown, render_fix_text, render_markdown,
    render_text, run_analyze, run_calc, run_explain, run_extract, run_fix, run_info, run_validate,
    runtime_error_fix_report, runtime_error_report, serialize_report, to_renderable,
    to_renderable_fix, verdict_exit_code,
};
use sectionguard_settings::Overrides;
use sectionguard_types::SCHEMA_FIX_V1;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sectionguard",
    version,
    about = "Reference validation and repair for ship-section template mods"
)]
struct Cli {
    /// Mod root. Template, reference and config paths are resolved against it.
    #[arg(long, default_value = ".")]
    mod_root: Utf8PathBuf,

    /// Path to sectionguard config TOML (a missing file means defaults).
    #[arg(long, default_value = "sectionguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|lenient).
    #[arg(long)]
    profile: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Markdown,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the reference document from a game installation.
    Extract {
        /// Game installation directory (contains common/section_templates).
        #[arg(long)]
        game_dir: Utf8PathBuf,

        /// Where to write the reference JSON.
        #[arg(long, default_value = "reference/vanilla_ship_data.json")]
        out: Utf8PathBuf,
    },

    /// Validate mod section templates against the reference and write a report.
    Validate {
        /// Reference JSON produced by `extract`.
        #[arg(long, default_value = "reference/vanilla_ship_data.json")]
        reference: Utf8PathBuf,

        /// Directory holding the mod's section template files.
        #[arg(long, default_value = "src/common/section_templates")]
        templates: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/sectionguard/report.json")]
        report_out: Utf8PathBuf,

        /// What to print on stdout.
        #[arg(long, value_enum, default_value = "text")]
        format: Format,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/sectionguard/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Override fail_on (error|warning).
        #[arg(long)]
        fail_on: Option<String>,

        /// Override maximum issues to emit.
        #[arg(long)]
        max_issues: Option<u32>,
    },

    /// Repair what can be repaired and report the rest.
    Fix {
        /// Reference JSON produced by `extract`.
        #[arg(long, default_value = "reference/vanilla_ship_data.json")]
        reference: Utf8PathBuf,

        /// Directory holding the mod's section template files.
        #[arg(long, default_value = "src/common/section_templates")]
        templates: Utf8PathBuf,

        /// Write a fixed copy of the templates directory here.
        #[arg(long, conflicts_with = "in_place")]
        out_dir: Option<Utf8PathBuf>,

        /// Rewrite changed template files where they are.
        #[arg(long)]
        in_place: bool,

        /// Compute fixes without writing any template file.
        #[arg(long)]
        dry_run: bool,

        /// Also rename keys whose declared tier disagrees with their points.
        #[arg(long)]
        rename_tiers: bool,

        /// Where to write the JSON fix report.
        #[arg(long, default_value = "artifacts/sectionguard/fix.json")]
        report_out: Utf8PathBuf,

        /// What to print on stdout.
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Score every mod template against the point budget of its declared tier.
    Analyze {
        /// Directory holding the mod's section template files.
        #[arg(long, default_value = "src/common/section_templates")]
        templates: Utf8PathBuf,

        /// Only list templates whose declared tier disagrees with their points.
        #[arg(long)]
        mismatches_only: bool,

        /// Print the table as text or the report as JSON.
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Score a design notation such as `T2X1UL2`.
    Calc {
        /// Design notation: weapon codes and utility counts.
        notation: String,

        /// Ship type whose multiplier applies.
        #[arg(long, default_value = "battleship")]
        ship: String,
    },

    /// List the slots of a ship type and the entities and locators each slot accepts.
    Info {
        /// Ship type as named in the reference document (`cruiser`, `titan`, ...).
        ship_type: String,

        /// Reference JSON produced by `extract`.
        #[arg(long, default_value = "reference/vanilla_ship_data.json")]
        reference: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report (validation or fix).
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/sectionguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/sectionguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "section.entity_context") or code (e.g., "invalid_slot").
        identifier: String,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sectionguard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.cmd {
        Commands::Extract { game_dir, out } => cmd_extract(&cli, game_dir, out),
        Commands::Validate {
            reference,
            templates,
            report_out,
            format,
            write_markdown,
            markdown_out,
            fail_on,
            max_issues,
        } => cmd_validate(
            &cli,
            ValidateArgs {
                reference,
                templates,
                report_out,
                format: *format,
                markdown_out: write_markdown.then_some(markdown_out.as_path()),
                fail_on: fail_on.clone(),
                max_issues: *max_issues,
            },
        ),
        Commands::Fix {
            reference,
            templates,
            out_dir,
            in_place,
            dry_run,
            rename_tiers,
            report_out,
            format,
        } => cmd_fix(
            &cli,
            FixArgs {
                reference,
                templates,
                out_dir: out_dir.as_deref(),
                in_place: *in_place,
                dry_run: *dry_run,
                rename_tiers: *rename_tiers,
                report_out,
                format: *format,
            },
        ),
        Commands::Analyze {
            templates,
            mismatches_only,
            format,
        } => cmd_analyze(&cli, templates, *mismatches_only, *format),
        Commands::Calc { notation, ship } => cmd_calc(&cli, notation, ship),
        Commands::Info {
            ship_type,
            reference,
        } => cmd_info(&cli, ship_type, reference),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

impl Cli {
    fn mod_root(&self) -> Utf8PathBuf {
        self.mod_root
            .canonicalize_utf8()
            .unwrap_or_else(|_| self.mod_root.clone())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            profile: self.profile.clone(),
            ..Overrides::default()
        }
    }
}

/// Load config if present; a missing file is allowed (defaults apply).
fn read_config(mod_root: &Utf8Path, config: &Utf8Path) -> anyhow::Result<String> {
    let path = mod_root.join(config);
    if !path.exists() {
        tracing::debug!(path = %path, "no config file; using defaults");
        return Ok(String::new());
    }
    std::fs::read_to_string(&path).with_context(|| format!("read config: {}", path))
}

fn cmd_extract(cli: &Cli, game_dir: &Utf8Path, out: &Utf8Path) -> anyhow::Result<()> {
    let mod_root = cli.mod_root();
    let cfg_text = read_config(&mod_root, &cli.config)?;
    let output = run_extract(ExtractInput {
        game_dir,
        config_text: &cfg_text,
        overrides: cli.overrides(),
    })?;

    let out_path = mod_root.join(out);
    write_json_file(&out_path, &output.reference).context("write reference json")?;
    print!("{}", format_extract_summary(&output.reference));
    println!("reference written to {}", out_path);
    Ok(())
}

struct ValidateArgs<'a> {
    reference: &'a Utf8Path,
    templates: &'a Utf8Path,
    report_out: &'a Utf8Path,
    format: Format,
    markdown_out: Option<&'a Utf8Path>,
    fail_on: Option<String>,
    max_issues: Option<u32>,
}

fn cmd_validate(cli: &Cli, args: ValidateArgs<'_>) -> anyhow::Result<()> {
    let mod_root = cli.mod_root();

    let result = (|| -> anyhow::Result<i32> {
        if !mod_root.exists() {
            anyhow::bail!("mod root does not exist: {}", mod_root);
        }
        let cfg_text = read_config(&mod_root, &cli.config)?;
        let overrides = Overrides {
            profile: cli.profile.clone(),
            max_issues: args.max_issues,
            fail_on: args.fail_on.clone(),
            ..Overrides::default()
        };

        let templates_dir = mod_root.join(args.templates);
        let reference_path = mod_root.join(args.reference);
        let output = run_validate(ValidateInput {
            mod_root: &mod_root,
            templates_dir: &templates_dir,
            reference_path: &reference_path,
            config_text: &cfg_text,
            overrides,
        })?;

        write_json_file(args.report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if let Some(markdown_out) = args.markdown_out {
            write_text_file(markdown_out, &render_markdown(&renderable))
                .context("write markdown")?;
        }
        match args.format {
            Format::Text => print!("{}", render_text(&renderable)),
            Format::Markdown => print!("{}", render_markdown(&renderable)),
            Format::Json => print_json(&output.report)?,
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_json_file(args.report_out, &report);
            eprintln!("sectionguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

struct FixArgs<'a> {
    reference: &'a Utf8Path,
    templates: &'a Utf8Path,
    out_dir: Option<&'a Utf8Path>,
    in_place: bool,
    dry_run: bool,
    rename_tiers: bool,
    report_out: &'a Utf8Path,
    format: Format,
}

fn write_target(args: &FixArgs<'_>) -> anyhow::Result<Option<WriteTarget>> {
    if args.dry_run {
        return Ok(None);
    }
    match (args.out_dir, args.in_place) {
        (Some(dir), false) => Ok(Some(WriteTarget::OutDir(dir.to_path_buf()))),
        (None, true) => Ok(Some(WriteTarget::InPlace)),
        (None, false) => anyhow::bail!("fix needs --out-dir <dir>, --in-place or --dry-run"),
        (Some(_), true) => anyhow::bail!("--out-dir and --in-place are mutually exclusive"),
    }
}

fn cmd_fix(cli: &Cli, args: FixArgs<'_>) -> anyhow::Result<()> {
    let mod_root = cli.mod_root();

    let result = (|| -> anyhow::Result<()> {
        if !mod_root.exists() {
            anyhow::bail!("mod root does not exist: {}", mod_root);
        }
        let target = write_target(&args)?;
        let cfg_text = read_config(&mod_root, &cli.config)?;

        let templates_dir = mod_root.join(args.templates);
        let reference_path = mod_root.join(args.reference);
        let output = run_fix(FixInput {
            mod_root: &mod_root,
            templates_dir: &templates_dir,
            reference_path: &reference_path,
            config_text: &cfg_text,
            overrides: Overrides {
                rename_tiers: args.rename_tiers.then_some(true),
                ..cli.overrides()
            },
            target,
        })?;

        write_json_file(args.report_out, &output.report).context("write fix report json")?;

        let renderable = to_renderable_fix(&output.report);
        match args.format {
            Format::Text => print!("{}", render_fix_text(&renderable)),
            Format::Markdown => print!("{}", render_fix_markdown(&renderable)),
            Format::Json => print_json(&output.report)?,
        }
        Ok(())
    })();

    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            let report = runtime_error_fix_report(&format!("{err:#}"), args.dry_run);
            let _ = write_json_file(args.report_out, &report);
            eprintln!("sectionguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_analyze(
    cli: &Cli,
    templates: &Utf8Path,
    mismatches_only: bool,
    format: Format,
) -> anyhow::Result<()> {
    let mod_root = cli.mod_root();
    let cfg_text = read_config(&mod_root, &cli.config)?;
    let templates_dir = mod_root.join(templates);
    let report = run_analyze(AnalyzeInput {
        mod_root: &mod_root,
        templates_dir: &templates_dir,
        config_text: &cfg_text,
        overrides: cli.overrides(),
        mismatches_only,
    })?;

    match format {
        Format::Json => print_json(&report)?,
        Format::Text | Format::Markdown => print!("{}", render_balance(&report)),
    }
    Ok(())
}

fn cmd_calc(cli: &Cli, notation: &str, ship: &str) -> anyhow::Result<()> {
    let mod_root = cli.mod_root();
    let cfg_text = read_config(&mod_root, &cli.config)?;
    let score = run_calc(CalcInput {
        notation,
        ship_type: ship,
        config_text: &cfg_text,
        overrides: cli.overrides(),
    })?;
    print!("{}", format_score(&score));
    Ok(())
}

fn cmd_info(cli: &Cli, ship_type: &str, reference: &Utf8Path) -> anyhow::Result<()> {
    let mod_root = cli.mod_root();
    let cfg_text = read_config(&mod_root, &cli.config)?;
    let reference_path = mod_root.join(reference);
    let info = run_info(InfoInput {
        reference_path: &reference_path,
        ship_type,
        config_text: &cfg_text,
        overrides: cli.overrides(),
    })?;
    print!("{}", format_info(&info));
    Ok(())
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write: {}", path))?;
    Ok(())
}

fn write_json_file<T: serde::Serialize>(path: &Utf8Path, report: &T) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    write_bytes(path, &data)
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let data = serialize_report(value)?;
    print!("{}", String::from_utf8_lossy(&data));
    Ok(())
}

fn report_schema(text: &str) -> anyhow::Result<String> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;
    Ok(value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;

    let md = if report_schema(&report_text)? == SCHEMA_FIX_V1 {
        let report = parse_fix_report(&report_text)?;
        render_fix_markdown(&to_renderable_fix(&report))
    } else {
        let report = parse_validation_report(&report_text)?;
        render_markdown(&to_renderable(&report))
    };

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }
    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_validation_report(&report_text)?;
    let renderable = to_renderable(&report);

    for annotation in render_annotations(&renderable, max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", sectionguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                sectionguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
