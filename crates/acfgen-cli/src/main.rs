use acfgen_core::report::{ConversionLog, LogLevel};
use acfgen_core::template::Template;
use acfgen_extract::{Converter, ExtractConfig};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "acfgen")]
#[command(about = "OBJ mesh to X-Plane ACF flight-model parameter blocks.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Convert {
        /// Source OBJ mesh.
        input: PathBuf,
        /// Existing .acf to modify (backed up first).
        #[arg(long)]
        acf: Option<PathBuf>,
        /// Path for a brand-new .acf (refuses to overwrite).
        #[arg(long)]
        new_acf: Option<PathBuf>,
        /// Aircraft name for --new-acf (defaults to the file stem).
        #[arg(long)]
        name: Option<String>,
        /// Override the bundled body block template.
        #[arg(long)]
        body_template: Option<PathBuf>,
        /// Override the bundled wing block template.
        #[arg(long)]
        wing_template: Option<PathBuf>,
        /// Write the rendered body block to this file.
        #[arg(long)]
        emit_body: Option<PathBuf>,
        /// Write the rendered wing block to this file.
        #[arg(long)]
        emit_wing: Option<PathBuf>,
        /// Write the JSON conversion report here instead of stdout.
        #[arg(long)]
        report: Option<PathBuf>,
        #[arg(long, default_value_t = 5.0)]
        cowl_offset_deg: f64,
        #[arg(long, default_value_t = 1e-4)]
        station_tolerance: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert {
            input,
            acf,
            new_acf,
            name,
            body_template,
            wing_template,
            emit_body,
            emit_wing,
            report,
            cowl_offset_deg,
            station_tolerance,
        } => convert(ConvertArgs {
            input,
            acf,
            new_acf,
            name,
            body_template,
            wing_template,
            emit_body,
            emit_wing,
            report,
            cowl_offset_deg,
            station_tolerance,
        }),
    }
}

struct ConvertArgs {
    input: PathBuf,
    acf: Option<PathBuf>,
    new_acf: Option<PathBuf>,
    name: Option<String>,
    body_template: Option<PathBuf>,
    wing_template: Option<PathBuf>,
    emit_body: Option<PathBuf>,
    emit_wing: Option<PathBuf>,
    report: Option<PathBuf>,
    cowl_offset_deg: f64,
    station_tolerance: f64,
}

fn convert(args: ConvertArgs) -> Result<()> {
    ensure_input_file(&args.input)?;
    if args.acf.is_some() && args.new_acf.is_some() {
        bail!("--acf and --new-acf are mutually exclusive.");
    }

    let body_template = load_template(args.body_template.as_deref(), acfgen_acf::templates::BODY_BLOCK)?;
    let wing_template = load_template(args.wing_template.as_deref(), acfgen_acf::templates::WING_BLOCK)?;

    let mut log = ConversionLog::new();
    let doc = acfgen_import_obj::import_obj(&args.input, &mut log)?;

    let cfg = ExtractConfig {
        cowl_offset_deg: args.cowl_offset_deg,
        station_tolerance: args.station_tolerance,
        ..ExtractConfig::default()
    };
    let converter = Converter::new(cfg);
    let conversion = converter
        .convert(&doc, &body_template, &wing_template, &mut log)
        .with_context(|| format!("convert {:?}", args.input))?;

    for msg in &conversion.report.log.messages {
        let tag = match msg.level {
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        };
        eprintln!("[{tag}] {}: {}", msg.code, msg.message);
    }

    if let Some(path) = &args.emit_body {
        write_text(path, &conversion.body_block)?;
    }
    if let Some(path) = &args.emit_wing {
        write_text(path, &conversion.wing_block)?;
    }

    if let Some(target) = &args.acf {
        ensure_input_file(target)?;
        let mut patcher = acfgen_acf::AcfPatcher::new(target);
        let backup = patcher
            .back_up()
            .with_context(|| format!("back up {target:?}"))?
            .to_path_buf();
        eprintln!("[info] backup: backed up to {}", backup.display());
        let spliced = patcher
            .write(&conversion.body_block, &conversion.wing_block)
            .with_context(|| format!("patch {target:?}"))?;
        eprintln!(
            "[info] patch: replaced {} line(s) with {} in {}",
            spliced.removed_lines,
            spliced.inserted_lines,
            target.display()
        );
    } else if let Some(path) = &args.new_acf {
        let name = args.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("NewAircraft")
                .to_string()
        });
        acfgen_acf::write_new_acf(path, &name, &conversion.body_block, &conversion.wing_block)
            .with_context(|| format!("write new acf {path:?}"))?;
        eprintln!("[info] new_acf: wrote {}", path.display());
    }

    let json =
        serde_json::to_string_pretty(&conversion.report).context("serialize report")?;
    if let Some(path) = &args.report {
        write_text(path, &json)?;
    } else {
        println!("{json}");
    }

    Ok(())
}

fn load_template(path: Option<&Path>, bundled: &str) -> Result<Template> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("read template: {p:?}"))?,
        None => bundled.to_string(),
    };
    Template::parse(&text).context("parse template")
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::write(path, text).with_context(|| format!("write: {path:?}"))
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}
