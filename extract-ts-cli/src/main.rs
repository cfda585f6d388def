use clap::{Args, Parser, Subcommand};
use extract_ts::memory::MemoryProgram;
use extract_ts::{extract, ExtractOptions, RawOptions};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(author, version, about = "TypeScript documentation extraction CLI")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Extract documentation documents for one or more files of a program.
  Extract(ExtractArgs),
}

#[derive(Args)]
struct ExtractArgs {
  /// Files to document, in output order.
  #[arg(required = true)]
  files: Vec<String>,

  /// Semantic program snapshot (JSON) to extract from.
  #[arg(long)]
  program: PathBuf,

  /// Extraction options (JSON). Flags below add to or override it.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Skip exports whose name matches this pattern. May be repeated.
  #[arg(long = "ignore-exports", value_name = "PATTERN")]
  ignore_exports: Vec<String>,

  /// Keep namespace qualifiers matching this pattern in rendered types. May
  /// be repeated.
  #[arg(long = "keep-namespace", value_name = "PATTERN")]
  keep_namespace: Vec<String>,

  /// Keep parameter properties after all declared members.
  #[arg(long)]
  no_sort_class_members: bool,

  /// Omit private members and members whose name starts with `_`.
  #[arg(long)]
  hide_private_members: bool,

  /// Pretty-print the JSON output.
  #[arg(long)]
  pretty: bool,

  /// Emit tracing spans (JSON) for debugging.
  #[arg(long)]
  trace: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  match cli.command {
    Commands::Extract(args) => run_extract(args),
  }
}

fn run_extract(args: ExtractArgs) -> ExitCode {
  init_tracing(args.trace);

  let program = match load_program(&args.program) {
    Ok(program) => program,
    Err(err) => {
      eprintln!("{err}");
      return ExitCode::FAILURE;
    }
  };

  let options = match build_options(&args) {
    Ok(options) => options,
    Err(err) => {
      eprintln!("{err}");
      return ExitCode::FAILURE;
    }
  };

  let files: Vec<&str> = args.files.iter().map(String::as_str).collect();
  let docs = match extract(&program, &files, &options) {
    Ok(docs) => docs,
    Err(err) => {
      eprintln!("{err}");
      return ExitCode::FAILURE;
    }
  };

  match docs.to_json(args.pretty) {
    Ok(json) => {
      println!("{json}");
      ExitCode::SUCCESS
    }
    Err(err) => {
      eprintln!("failed to serialize JSON: {err}");
      ExitCode::FAILURE
    }
  }
}

fn load_program(path: &Path) -> Result<MemoryProgram, String> {
  let source = fs::read_to_string(path)
    .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
  MemoryProgram::from_json(&source)
    .map_err(|err| format!("failed to load {}: {err}", path.display()))
}

fn build_options(args: &ExtractArgs) -> Result<ExtractOptions, String> {
  let mut raw = match &args.config {
    Some(path) => {
      let source = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
      serde_json::from_str::<RawOptions>(&source)
        .map_err(|err| format!("invalid config {}: {err}", path.display()))?
    }
    None => RawOptions::default(),
  };
  raw
    .ignore_exports_matching
    .extend(args.ignore_exports.iter().cloned());
  raw
    .ignore_namespaces
    .extend(args.keep_namespace.iter().cloned());
  if args.no_sort_class_members {
    raw.sort_class_members = false;
  }
  if args.hide_private_members {
    raw.hide_private_members = true;
  }
  ExtractOptions::try_from(raw).map_err(|err| err.to_string())
}

fn init_tracing(enabled: bool) {
  if !enabled {
    return;
  }
  let _ = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(Level::DEBUG)
    .json()
    .with_ansi(false)
    .with_writer(std::io::stderr)
    .try_init();
}
