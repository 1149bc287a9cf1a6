use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use ristretto_core::{Invocation, Pipeline, Registry, parse_pipeline};

#[derive(Parser, Debug)]
#[command(name = "ristretto", version, about)]
pub struct Cli {
    /// Worker threads for per-channel filtering (defaults to one per core).
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every registered step and its parameter schema as JSON.
    Steps(StepsArgs),
    /// Run a pipeline over an image file.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct StepsArgs {
    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input image (JPEG, PNG or TIFF).
    input: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(long, short)]
    output: PathBuf,

    /// Pipeline document: a JSON list of {"step", "params"} entries, or an
    /// object with a "pipeline" list.
    #[arg(long, short, required_unless_present = "steps", conflicts_with = "steps")]
    pipeline: Option<PathBuf>,

    /// Inline pipeline document, same format as --pipeline.
    #[arg(long)]
    steps: Option<String>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let Some(threads) = self.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("failed to configure worker threads")?;
        }

        match self.cmd {
            Command::Steps(args) => print_steps(&args),
            Command::Run(args) => run_pipeline(&args),
        }
    }
}

fn print_steps(args: &StepsArgs) -> Result<()> {
    let json = Registry::global().describe_json()?;
    let text = if args.compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };
    println!("{text}");
    Ok(())
}

fn run_pipeline(args: &RunArgs) -> Result<()> {
    let steps = load_steps(args)?;
    info!(steps = steps.len(), input = ?args.input, "running pipeline");

    let result = Pipeline::default()
        .process_file(&args.input, &steps, Some(&args.output))
        .with_context(|| format!("pipeline failed for {}", args.input.display()))?;

    info!(
        output = ?args.output,
        width = result.width,
        height = result.height,
        "wrote result"
    );
    Ok(())
}

fn load_steps(args: &RunArgs) -> Result<Vec<Invocation>> {
    let text = match (&args.pipeline, &args.steps) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pipeline: {}", path.display()))?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => anyhow::bail!("either --pipeline or --steps is required"),
    };
    parse_pipeline(&text).context("invalid pipeline document")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn run_requires_a_pipeline() {
        let parsed = Cli::try_parse_from(["ristretto", "run", "in.png", "-o", "out.png"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn pipeline_and_steps_conflict() {
        let parsed = Cli::try_parse_from([
            "ristretto", "run", "in.png", "-o", "out.png", "-p", "p.json", "--steps", "[]",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn inline_steps_parse() {
        let cli = Cli::try_parse_from([
            "ristretto",
            "run",
            "in.png",
            "-o",
            "out.png",
            "--steps",
            r#"[{"step": "rotate", "params": {"angle": 90}}]"#,
        ])
        .unwrap();
        let Command::Run(args) = cli.cmd else {
            panic!("expected run command");
        };
        let steps = load_steps(&args).unwrap();
        assert_eq!(steps, vec![Invocation::new("rotate").param("angle", 90)]);
    }
}
