//! Skein CLI binary: send one message through the plan/schedule/join conductor
//! loop, or inspect the registered tool catalog.

mod log_format;
mod logging;
mod repl;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skein::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "skein")]
#[command(about = "Skein — run the LLM Compiler conductor loop from the CLI")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// User message (or pass as positional args)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Positional args: user message when -m/--message is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Chat completion model; default: $SKEIN_MODEL or gpt-4o-mini
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Replan round cap; default: the conductor's built-in cap
    #[arg(long, value_name = "N")]
    max_rounds: Option<usize>,

    /// Verbose: print conductor state after every node
    #[arg(short, long)]
    verbose: bool,

    /// Interactive REPL: after output, prompt for input and continue conversation
    #[arg(short, long)]
    interactive: bool,

    /// Output stream events and the reply as JSON
    #[arg(long)]
    json: bool,

    /// When using --json, write output to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// When using --json, pretty-print (multi-line). Default: compact
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List or show definitions from the registered (demo) tool catalog
    Tool(ToolArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ToolArgs {
    #[command(subcommand)]
    sub: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// List all loaded tools (name and description)
    List,
    /// Show the full definition of one tool (name, description, params)
    Show(ShowToolArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ShowToolArgs {
    /// Tool name (e.g. search, get_temp, send_mail)
    name: String,
}

/// Default max length for a node's state dump in verbose mode.
const DEFAULT_DISPLAY_MAX_LEN: usize = 200;

/// Default max length for the reply printed to stdout. 0 means no truncation.
const DEFAULT_REPLY_MAX_LEN: usize = 0;

fn display_max_len() -> usize {
    std::env::var("SKEIN_DISPLAY_MAX_LEN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DISPLAY_MAX_LEN)
}

fn reply_max_len() -> usize {
    std::env::var("SKEIN_REPLY_MAX_LEN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REPLY_MAX_LEN)
}

fn write_json_output(
    value: &serde_json::Value,
    file: Option<&std::path::Path>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match file {
        Some(path) => std::fs::write(path, format!("{}\n", s))?,
        None => {
            println!("{}", s);
            std::io::Write::flush(&mut std::io::stdout())?;
        }
    }
    Ok(())
}

fn run_tool_command(ta: &ToolArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = skein::cli_run::demo_tool_catalog();
    match &ta.sub {
        ToolCommand::List => {
            if json {
                let tools: Vec<_> = catalog
                    .iter()
                    .map(|t| {
                        let spec = t.spec();
                        serde_json::json!({ "name": spec.name, "description": spec.description, "params": spec.params })
                    })
                    .collect();
                write_json_output(&serde_json::Value::Array(tools), None, false)?;
            } else {
                for t in catalog.iter() {
                    let spec = t.spec();
                    println!("{}: {}", spec.name, spec.description);
                }
            }
            Ok(())
        }
        ToolCommand::Show(show_args) => {
            let Some(tool) = catalog.get(&show_args.name) else {
                eprintln!("tool not found: {}", show_args.name);
                std::process::exit(1);
            };
            let spec = tool.spec();
            if json {
                let value = serde_json::json!({
                    "name": spec.name,
                    "description": spec.description,
                    "params": spec.params,
                });
                write_json_output(&value, None, true)?;
            } else {
                println!("name: {}", spec.name);
                println!("description: {}", spec.description);
                println!("params: {:?}", spec.params);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_config::load_and_apply("skein", None::<&std::path::Path>).ok();
    let _logging_guard = logging::init()?;

    let args = Args::parse();

    if let Some(Command::Tool(ta)) = &args.cmd {
        run_tool_command(ta, args.json)?;
        return Ok(());
    }

    let message = args.message.clone().or_else(|| {
        if args.rest.is_empty() {
            None
        } else {
            Some(args.rest.join(" "))
        }
    });

    if !args.interactive && message.is_none() {
        eprintln!("skein: provide a message via -m/--message or positional args");
        std::process::exit(1);
    }

    let mut opts = RunOptions {
        message: message.clone().unwrap_or_default(),
        model: args.model.clone(),
        max_rounds: args.max_rounds,
        verbose: args.verbose,
        output_json: args.json,
    };

    let display_max_len = display_max_len();
    let reply_max_len = reply_max_len();

    if args.interactive {
        if let Some(ref msg) = message {
            if !msg.trim().is_empty() {
                opts.message = msg.clone();
                match run::run_one_turn(&opts, args.verbose, args.json, display_max_len).await {
                    Ok(out) => {
                        if args.json {
                            let value = serde_json::json!({ "events": out.events, "reply": out.reply });
                            write_json_output(&value, args.file.as_deref(), args.pretty)?;
                        } else {
                            println!("{}", run::truncate_reply(&out.reply, reply_max_len));
                        }
                    }
                    Err(e) => {
                        eprintln!("error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }
        repl::run_repl_loop(&opts, args.verbose, args.json, display_max_len, reply_max_len).await?;
    } else {
        let out = run::run_one_turn(&opts, args.verbose, args.json, display_max_len).await?;
        if args.json {
            let value = serde_json::json!({ "events": out.events, "reply": out.reply });
            write_json_output(&value, args.file.as_deref(), args.pretty)?;
        } else {
            println!("{}", run::truncate_reply(&out.reply, reply_max_len));
            std::io::Write::flush(&mut std::io::stdout())?;
        }
    }
    Ok(())
}
