//! Interactive shell mode for the Ertflix CLI
//!
//! A REPL with command history and tab completion. One context serves the
//! whole session, so the catalog is fetched at most once.

use anyhow::Result;
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper};

use super::{Cli, Commands, dispatch};
use crate::context::AppContext;

/// Command completer for the shell
struct ShellCompleter {
    commands: Vec<(&'static str, Vec<&'static str>)>,
}

impl ShellCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                ("home", vec!["--genre", "--limit"]),
                ("show", vec![]),
                ("search", vec![]),
                ("open", vec!["/", "/details/", "/search?q="]),
                ("config", vec!["show", "get", "set", "path"]),
                ("back", vec![]),
                ("help", vec![]),
                ("exit", vec![]),
                ("quit", vec![]),
            ],
        }
    }

    fn pairs<'a>(words: impl Iterator<Item = &'a &'static str>) -> Vec<Pair> {
        words
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect()
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let words: Vec<&str> = line.split_whitespace().collect();
        let start = line.rfind(' ').map(|i| i + 1).unwrap_or(0);
        let names = || self.commands.iter().map(|(cmd, _)| cmd);

        match words.as_slice() {
            [] => Ok((0, Self::pairs(names()))),
            [cmd] if line.ends_with(' ') => {
                let subs = self
                    .commands
                    .iter()
                    .find(|(name, _)| name == cmd)
                    .map(|(_, subs)| Self::pairs(subs.iter()))
                    .unwrap_or_default();
                Ok((pos, subs))
            }
            [prefix] => Ok((start, Self::pairs(names().filter(|c| c.starts_with(*prefix))))),
            [cmd, prefix] if !line.ends_with(' ') => {
                let subs = self
                    .commands
                    .iter()
                    .find(|(name, _)| name == cmd)
                    .map(|(_, subs)| Self::pairs(subs.iter().filter(|s| s.starts_with(*prefix))))
                    .unwrap_or_default();
                Ok((start, subs))
            }
            _ => Ok((pos, vec![])),
        }
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
impl Helper for ShellCompleter {}

/// Parse a command line into arguments, handling quotes
fn parse_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quote_char = ' ';

    for c in line.chars() {
        match c {
            '"' | '\'' if !in_quotes => {
                in_quotes = true;
                quote_char = c;
            }
            c if c == quote_char && in_quotes => {
                in_quotes = false;
            }
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Run a single command in the shell.
/// Returns Ok(true) to continue, Ok(false) to exit gracefully.
async fn run_command(args: Vec<String>, ctx: &AppContext) -> Result<bool> {
    let Some(cmd) = args.first() else {
        return Ok(true);
    };

    match cmd.as_str() {
        "help" => {
            print_help();
            return Ok(true);
        }
        "exit" | "quit" => return Ok(false),
        "back" => {
            let mut navigator = ctx.navigator();
            if navigator.back() {
                println!("Route: {}", navigator.current());
            } else {
                println!("Nothing to go back to.");
            }
            return Ok(true);
        }
        _ => {}
    }

    let mut argv: Vec<String> = vec!["ertflix".to_string()];
    argv.extend(args);

    let cli = match Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            println!("{}", e);
            return Ok(true);
        }
    };

    let command = match cli.command {
        Some(Commands::Shell) => {
            println!("Already in shell mode.");
            return Ok(true);
        }
        Some(command) => command,
        None => return Ok(true),
    };

    dispatch(command, ctx, cli.output.format(), cli.output.quiet).await?;
    Ok(true)
}

fn print_help() {
    println!(
        r#"Ertflix Interactive Shell

Commands:
  home [--genre G] [--limit N]  List the catalog by genre
  show <id>                     Show details for one show
  search <query>                Search the catalog
  open <path>                   Open a route (/, /details/1, /search?q=dome)
  back                          Go back to the previous route

  config show                   Show current configuration
  config get <key>              Get a specific setting
  config set <key> <value>      Set a configuration value
  config path                   Show config file path

  help                          Show this help
  exit, quit                    Exit the shell

Flags (can be added to any command):
  --json                        Output in JSON format
  --quiet, -q                   Suppress non-essential output
"#
    );
}

/// Get the history file path
fn history_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "ertflix", "Ertflix")
        .map(|dirs| dirs.data_dir().join("shell_history"))
}

/// Run the interactive shell
pub async fn run(ctx: &AppContext) -> Result<()> {
    println!("Ertflix Interactive Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(ShellCompleter::new()));

    if let Some(path) = history_path() {
        let _ = rl.load_history(&path);
    }

    loop {
        match rl.readline("ertflix> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                match run_command(parse_args(line), ctx).await {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = history_path() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockApi, show_json};
    use crate::context::test_context;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_parse_args_handles_quotes() {
        assert_eq!(parse_args("search under the dome"), vec!["search", "under", "the", "dome"]);
        assert_eq!(parse_args("search \"under the dome\""), vec!["search", "under the dome"]);
        assert_eq!(parse_args("  config   get 'api.base_url' "), vec!["config", "get", "api.base_url"]);
        assert!(parse_args("   ").is_empty());
    }

    #[tokio::test]
    async fn test_session_reuses_catalog() {
        let api = Arc::new(MockApi::new());
        api.respond("shows", json!([show_json(1, "Dome", &["Drama"], Some(6.5))]));
        let ctx = test_context(&api);

        assert!(run_command(parse_args("home --quiet"), &ctx).await.unwrap());
        assert!(run_command(parse_args("show 1"), &ctx).await.unwrap());
        assert!(run_command(parse_args("home"), &ctx).await.unwrap());

        assert_eq!(api.calls(), vec!["shows"]);
    }

    #[tokio::test]
    async fn test_exit_and_nested_shell() {
        let api = Arc::new(MockApi::new());
        let ctx = test_context(&api);

        assert!(run_command(parse_args("shell"), &ctx).await.unwrap());
        assert!(!run_command(parse_args("exit"), &ctx).await.unwrap());
    }
}
