//! Interactive REPL loop: read stdin, run one conductor turn, print output, repeat.
//!
//! Used when `-i/--interactive` is passed.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use skein::RunOptions;

use crate::run::{run_one_turn, truncate_reply};

/// Runs the REPL loop: prompt, read line, run one turn, print, repeat.
///
/// Exits on EOF (Ctrl+D), empty line, or `quit`/`exit`/`/quit`.
/// On run error, prints to stderr and continues.
pub async fn run_repl_loop(
    base_opts: &RunOptions,
    verbose: bool,
    json: bool,
    display_max_len: usize,
    reply_display_len: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = reader.next_line().await?;
        let line = match line {
            None => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) if is_quit_command(&s) => break,
            Some(s) => s,
        };

        let mut opts = base_opts.clone();
        opts.message = line;

        match run_one_turn(&opts, verbose, json, display_max_len).await {
            Ok(out) => print_turn_output(&out, json, reply_display_len),
            Err(e) => eprintln!("error: {}", e),
        }
    }

    println!("Bye.");
    Ok(())
}

fn print_turn_output(out: &crate::run::TurnOutput, json: bool, reply_display_len: usize) {
    if json {
        let value = serde_json::json!({ "events": out.events, "reply": out.reply });
        println!("{}", serde_json::to_string(&value).unwrap_or_default());
    } else {
        println!("{}", truncate_reply(&out.reply, reply_display_len));
    }
}

fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_quit_command_matches_expected_tokens() {
        assert!(is_quit_command("quit"));
        assert!(is_quit_command(" EXIT "));
        assert!(is_quit_command("/quit"));
        assert!(!is_quit_command("continue"));
    }
}
