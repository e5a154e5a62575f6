// ABOUTME: CLI for decorating CMS-rendered HTML fragments with veneer.
// ABOUTME: Reads fragments from files or stdin and prints decorated HTML or JSON.

use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use veneer::Decorator;

/// Decorate one or more rendered HTML fragments and output markup or JSON.
#[derive(Parser, Debug)]
#[command(name = "veneer-cli")]
#[command(about = "Decorate CMS fragments with veneer and print HTML or JSON", long_about = None)]
struct Args {
    /// Fragment file path(s). Use "-" to read one fragment from stdin.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Base URL local asset paths resolve against.
    #[arg(long)]
    base_url: Option<String>,

    /// Decorate a single block fragment instead of a full page fragment.
    #[arg(long, default_value_t = false)]
    block: bool,

    /// Print the first block's key/value config as JSON instead of markup.
    #[arg(long, default_value_t = false)]
    config: bool,

    /// Character budget for card body copy.
    #[arg(long)]
    summary_char_limit: Option<usize>,

    /// Disable hero auto-building.
    #[arg(long, default_value_t = false)]
    no_auto_hero: bool,

    /// Output a JSON envelope instead of raw HTML.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.block && args.config {
        bail!("--block and --config are mutually exclusive");
    }

    let mut builder = Decorator::builder();
    if let Some(base) = &args.base_url {
        builder = builder.base_url(base);
    }
    if let Some(limit) = args.summary_char_limit {
        builder = builder.summary_char_limit(limit);
    }
    if args.no_auto_hero {
        builder = builder.auto_hero(false);
    }
    let decorator = builder.build();

    let mut results = Vec::new();
    for target in &args.targets {
        let outcome = load_fragment(target).and_then(|fragment| run(&decorator, &args, &fragment));
        match outcome {
            Ok(output) => results.push(json!({
                "target": target,
                "ok": true,
                "output": output,
                "error": null
            })),
            Err(err) => results.push(json!({
                "target": target,
                "ok": false,
                "output": null,
                "error": format!("{:#}", err)
            })),
        }
    }

    if args.json {
        let decorated = results
            .iter()
            .filter(|r| r.get("ok").and_then(|v| v.as_bool()) == Some(true))
            .count();
        let failed = results.len() - decorated;
        let envelope = json!({
            "fragments": results,
            "total_fragments": results.len(),
            "decorated": decorated,
            "failed": failed
        });
        if args.compact {
            println!("{}", serde_json::to_string(&envelope)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        if failed > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut failed = false;
    for result in &results {
        match result.get("ok").and_then(|v| v.as_bool()) {
            Some(true) => {
                if let Some(output) = result.get("output").and_then(|v| v.as_str()) {
                    println!("{}", output);
                }
            }
            _ => {
                failed = true;
                if let Some(err) = result.get("error").and_then(|v| v.as_str()) {
                    eprintln!("{}", err);
                }
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Runs the selected mode against one fragment.
fn run(decorator: &Decorator, args: &Args, fragment: &str) -> Result<String> {
    if args.config {
        let config = decorator.block_config(fragment)?;
        let json = if args.compact {
            serde_json::to_string(&config)?
        } else {
            serde_json::to_string_pretty(&config)?
        };
        return Ok(json);
    }
    let html = if args.block {
        decorator.decorate_block(fragment)?
    } else {
        decorator.decorate(fragment)?
    };
    Ok(html)
}

/// Loads a fragment from a file path, or from stdin for "-".
fn load_fragment(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read fragment from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(target).with_context(|| format!("failed to read fragment: {}", target))
}
