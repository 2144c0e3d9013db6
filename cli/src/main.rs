//! unlayout CLI - rebuild document text from layout analysis JSON

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use unlayout::{
    AnalyzeResult, JsonFormat, ReconstructOptions, ReconstructStats, Reconstruction, RoleSet,
};

#[derive(Parser)]
#[command(name = "unlayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Rebuild readable text and Markdown tables from layout analysis results", long_about = None)]
struct Cli {
    /// Input analysis result JSON files ("-" for stdin)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output file (one input) or directory (several inputs)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    #[command(flatten)]
    reconstruct: ReconstructArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct text from one or more analysis results
    #[command(alias = "txt")]
    Text {
        /// Input analysis result JSON files ("-" for stdin)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (one input) or directory (several inputs)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        reconstruct: ReconstructArgs,
    },

    /// Reconstruct and emit text plus statistics as JSON
    Json {
        /// Input analysis result JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        reconstruct: ReconstructArgs,
    },

    /// Show analysis result information
    Info {
        /// Input analysis result JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct ReconstructArgs {
    /// Comma-separated paragraph roles to drop (e.g., "pageHeader,footnote")
    #[arg(long, value_name = "ROLES")]
    discard: Option<String>,

    /// Drop page headers, footers and page numbers
    #[arg(short, long)]
    boilerplate: bool,

    /// Table rendering mode
    #[arg(long, value_enum, default_value = "github")]
    table_format: TableMode,

    /// Keep numeric columns left-aligned
    #[arg(long)]
    no_align_numbers: bool,

    /// Print reconstruction statistics to stderr
    #[arg(long)]
    stats: bool,
}

impl ReconstructArgs {
    fn to_options(&self) -> Result<ReconstructOptions, Box<dyn std::error::Error>> {
        let mut roles = match self.discard.as_deref() {
            Some(list) => RoleSet::parse(list)?,
            None => RoleSet::new(),
        };
        if self.boilerplate {
            roles.extend(RoleSet::boilerplate().iter());
        }

        Ok(ReconstructOptions::new()
            .with_discard_roles(roles)
            .with_table_format(self.table_format.into())
            .with_number_alignment(!self.no_align_numbers)
            .with_stats(self.stats))
    }
}

#[derive(Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// GitHub-flavored Markdown tables
    #[default]
    Github,
    /// HTML tables
    Html,
}

impl From<TableMode> for unlayout::TableFormat {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Github => unlayout::TableFormat::Github,
            TableMode::Html => unlayout::TableFormat::Html,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text {
            inputs,
            output,
            reconstruct,
        }) => cmd_text(&inputs, output.as_deref(), &reconstruct),
        Some(Commands::Json {
            input,
            output,
            compact,
            reconstruct,
        }) => cmd_json(&input, output.as_deref(), compact, &reconstruct),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: reconstruct text if inputs are provided
            if cli.inputs.is_empty() {
                println!("{}", "Usage: unlayout <FILE>... [-o OUTPUT]".yellow());
                println!("       unlayout --help for more information");
                Ok(())
            } else {
                cmd_text(&cli.inputs, cli.output.as_deref(), &cli.reconstruct)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load an analysis result from a path, or stdin for "-".
fn load(input: &Path) -> Result<AnalyzeResult, Box<dyn std::error::Error>> {
    if input.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(AnalyzeResult::from_json_str(&buffer)?);
    }

    log::debug!("Loading {}", input.display());
    AnalyzeResult::from_path(input).map_err(|e| format!("{}: {}", input.display(), e).into())
}

/// Output paths for a batch, in input order. Two inputs mapping to the same
/// file (e.g., `a/x.json` and `b/x.json` with one output directory) are an
/// error.
fn batch_output_paths(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(inputs.len());
    for input in inputs {
        let path = batch_output_path(input, output_dir);
        if let Some(previous) = seen.insert(path.clone(), input) {
            return Err(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                path.display()
            )
            .into());
        }
        paths.push(path);
    }
    Ok(paths)
}

/// Where the text for `input` goes when several inputs are reconstructed.
fn batch_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = format!("{}.txt", stem);
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

fn cmd_text(
    inputs: &[PathBuf],
    output: Option<&Path>,
    args: &ReconstructArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;

    if let [input] = inputs {
        let result = load(input)?;
        let reconstruction = unlayout::Linearizer::new(&options).run_result(&result);
        if args.stats {
            print_stats(input, &reconstruction.stats);
        }

        if let Some(path) = output {
            fs::write(path, &reconstruction.content)?;
            println!("{} {}", "Saved to".green(), path.display());
        } else {
            println!("{}", reconstruction.content);
        }
        return Ok(());
    }

    if inputs.iter().any(|p| p.as_os_str() == "-") {
        return Err("stdin input cannot be combined with other inputs".into());
    }

    let paths = batch_output_paths(inputs, output)?;

    let results = inputs
        .iter()
        .map(|input| load(input))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let reconstructions: Vec<Reconstruction> = unlayout::reconstruct_batch(&results, &options);
    for ((input, path), reconstruction) in inputs.iter().zip(&paths).zip(&reconstructions) {
        if args.stats {
            print_stats(input, &reconstruction.stats);
        }
        fs::write(path, &reconstruction.content)?;
        println!("{} {}", "Saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &ReconstructArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;
    let result = load(input)?;
    let reconstruction = unlayout::reconstruct_with_stats(&result, &options);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unlayout::render::to_json(&reconstruction, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = load(input)?;

    println!("{}", "Analysis Result".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref model_id) = result.model_id {
        println!("{}: {}", "Model".bold(), model_id);
    }
    println!("{}: {}", "Pages".bold(), result.page_count());
    println!("{}: {}", "Paragraphs".bold(), result.paragraphs.len());
    println!("{}: {}", "Tables".bold(), result.tables.len());

    if !result.tables.is_empty() {
        println!();
        println!("{}", "Tables".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (i, table) in result.tables.iter().enumerate() {
            println!(
                "  {} #{}: {} x {} ({} cells)",
                "├─".dimmed(),
                i,
                table.row_count,
                table.column_count,
                table.cells.len()
            );
        }
    }

    println!();
    println!("{}", "Paragraph Roles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (role, count) in result.role_histogram() {
        let name = role.map(|r| r.to_string()).unwrap_or_else(|| "(body)".to_string());
        println!("  {}: {}", name.bold(), count);
    }

    Ok(())
}

fn print_stats(input: &Path, stats: &ReconstructStats) {
    eprintln!("{} {}", "Statistics for".cyan().bold(), input.display());
    eprintln!("  {}: {}", "Paragraphs".bold(), stats.paragraph_count);
    eprintln!("  {}: {}", "Discarded".bold(), stats.discarded_count);
    eprintln!("  {}: {}", "Tables".bold(), stats.table_count);
    eprintln!("  {}: {}", "Table paragraphs".bold(), stats.table_paragraph_count);
    eprintln!("  {}: {}", "Unanchored".bold(), stats.unanchored_count);
    eprintln!("  {}: {}", "Words".bold(), stats.word_count);
    eprintln!("  {}: {}", "Characters".bold(), stats.char_count);
}

fn cmd_version() {
    println!("{} {}", "unlayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout analysis text reconstruction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unlayout".dimmed());
    println!("License: MIT");
}
