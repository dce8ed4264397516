// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive inspector for the NotC compiler.
//!
//! Every entry is compiled from scratch and its disassembly printed, along
//! with tokens and AST when those views are switched on.

use notc_compiler::{Compilation, compile_source, read_source_text};
use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Editor, Helper};
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::diagnostics;

const HISTORY_FILE: &str = ".notc_history";
const MAX_HISTORY_SIZE: usize = 1000;
const SOURCE_NAME: &str = "<repl>";

const KEYWORDS: &[&str] = &["def"];
const TYPES: &[&str] = &["int", "str", "void"];
const LITERALS: &[&str] = &["true", "false"];

/// Inspector commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Tokens,
    Ast,
    Load,
    Clear,
}

impl ReplCommand {
    /// Parse a command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let rest = input.trim().strip_prefix('.')?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let cmd = parts.next()?.to_lowercase();
        let arg = parts.next().map(str::trim).filter(|arg| !arg.is_empty());

        match cmd.as_str() {
            "help" | "h" | "?" => Some((ReplCommand::Help, arg)),
            "exit" | "quit" | "q" => Some((ReplCommand::Exit, arg)),
            "tokens" => Some((ReplCommand::Tokens, arg)),
            "ast" => Some((ReplCommand::Ast, arg)),
            "load" | "l" => Some((ReplCommand::Load, arg)),
            "clear" | "cls" => Some((ReplCommand::Clear, arg)),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the inspector"),
            (".tokens", "Toggle the token listing"),
            (".ast", "Toggle the AST listing"),
            (".load <file>", "Compile a NotC source file"),
            (".clear", "Clear the screen"),
        ]
    }
}

/// Completion, hints, highlighting and validation for the editor
struct NotcHelper {
    words: Vec<&'static str>,
}

impl NotcHelper {
    fn new() -> Self {
        let words = KEYWORDS
            .iter()
            .chain(TYPES)
            .chain(LITERALS)
            .copied()
            .chain([".help", ".exit", ".tokens", ".ast", ".load", ".clear"])
            .collect();
        Self { words }
    }

    fn word_start(line: &str) -> usize {
        line.rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

impl Completer for NotcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let word = &line[Self::word_start(&line[..pos])..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .map(|w| Pair {
                display: w.to_string(),
                replacement: w[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for NotcHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        let word = &line[Self::word_start(line)..];
        if word.len() < 2 {
            return None;
        }

        self.words
            .iter()
            .find(|w| w.starts_with(word) && w.len() > word.len())
            .map(|w| (&w[word.len()..]).dimmed().to_string())
    }
}

impl Highlighter for NotcHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut current_word = String::new();
        let mut in_string = false;

        for c in line.chars() {
            if in_string {
                result.push_str(&c.green().to_string());
                in_string = c != '"';
                continue;
            }
            if c.is_alphanumeric() || c == '_' || (c == '.' && !current_word.is_empty()) {
                current_word.push(c);
                continue;
            }
            if !current_word.is_empty() {
                result.push_str(&highlight_word(&current_word));
                current_word.clear();
            }
            let colored = match c {
                '(' | ')' | '{' | '}' => c.yellow().to_string(),
                '+' | '-' | '*' | '/' | '=' | '!' | '>' => c.cyan().to_string(),
                '"' => {
                    in_string = true;
                    c.green().to_string()
                }
                '.' if line.starts_with('.') => c.magenta().to_string(),
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }

        if !current_word.is_empty() {
            result.push_str(&highlight_word(&current_word));
        }

        Cow::Owned(result)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn highlight_word(word: &str) -> String {
    if KEYWORDS.contains(&word) {
        word.magenta().bold().to_string()
    } else if TYPES.contains(&word) {
        word.cyan().to_string()
    } else if LITERALS.contains(&word) {
        word.blue().to_string()
    } else if word.chars().all(|c| c.is_ascii_digit() || c == '.') {
        word.yellow().to_string()
    } else {
        word.to_string()
    }
}

impl Validator for NotcHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();
        if input.trim_start().starts_with('.') {
            return Ok(ValidationResult::Valid(None));
        }

        if !is_balanced(input) {
            return Ok(ValidationResult::Incomplete);
        }

        let trimmed = input.trim_end();
        if trimmed.ends_with(['+', '-', '*', '/', '=', '(', '{', '>']) {
            return Ok(ValidationResult::Incomplete);
        }

        Ok(ValidationResult::Valid(None))
    }
}

/// Check if braces and parentheses are balanced.
///
/// Comments are ignored and string literals end at the end of their line,
/// as in the lexer.
fn is_balanced(input: &str) -> bool {
    let mut stack = Vec::new();

    for line in input.lines() {
        let code = line.split("//").next().unwrap_or_default();
        let mut in_string = false;

        for c in code.chars() {
            if in_string {
                in_string = c != '"';
                continue;
            }
            match c {
                '"' => in_string = true,
                '(' => stack.push(')'),
                '{' => stack.push('}'),
                ')' | '}' => {
                    if stack.pop() != Some(c) {
                        // Unbalanced; let the parser report it
                        return true;
                    }
                }
                _ => {}
            }
        }
    }

    stack.is_empty()
}

impl Helper for NotcHelper {}

/// The interactive inspector
pub struct Repl {
    editor: Editor<NotcHelper, DefaultHistory>,
    history_path: PathBuf,
    show_tokens: bool,
    show_ast: bool,
}

impl Repl {
    /// Create a new inspector, taking the initial views from `config`
    pub fn new(config: &Config) -> rustyline::Result<Self> {
        let editor_config = rustyline::Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(MAX_HISTORY_SIZE)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(NotcHelper::new()));

        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notc")
            .join(HISTORY_FILE);

        if let Some(parent) = history_path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                debug!(%err, "cannot create history directory");
            }
        }
        if let Err(err) = editor.load_history(&history_path) {
            debug!(%err, "no history loaded");
        }

        Ok(Self {
            editor,
            history_path,
            show_tokens: config.dump_tokens,
            show_ast: config.dump_ast,
        })
    }

    /// Run the inspector main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = format!("{} ", "notc>".bright_green().bold());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    if let Some((cmd, arg)) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    if trimmed.starts_with('.') {
                        eprintln!(
                            "{}: unknown command '{}', try {}",
                            "Error".red().bold(),
                            trimmed,
                            ".help".cyan()
                        );
                        continue;
                    }

                    self.inspect(SOURCE_NAME, &line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        if let Err(err) = self.editor.save_history(&self.history_path) {
            debug!(%err, "cannot save history");
        }
        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!(
            "  {} {}{}",
            "NotC inspector".white().bold(),
            "v".dimmed(),
            env!("CARGO_PKG_VERSION").bright_yellow()
        );
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => self.print_help(),
            ReplCommand::Exit => return CommandResult::Exit,
            ReplCommand::Tokens => {
                self.show_tokens = !self.show_tokens;
                print_toggle("tokens", self.show_tokens);
            }
            ReplCommand::Ast => {
                self.show_ast = !self.show_ast;
                print_toggle("ast", self.show_ast);
            }
            ReplCommand::Load => match arg {
                Some(path) => self.load_file(path),
                None => eprintln!(
                    "{}: {} {}",
                    "Error".red().bold(),
                    ".load".cyan(),
                    "requires a file path".dimmed()
                ),
            },
            ReplCommand::Clear => print!("\x1B[2J\x1B[H"),
        }
        CommandResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Commands:".white().bold());
        println!();
        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:16} {}", cmd.cyan(), desc.dimmed());
        }
        println!();
        println!(
            "  {}",
            "Anything else is compiled and its bytecode listed.".dimmed()
        );
        println!();
    }

    fn load_file(&mut self, path: &str) {
        match read_source_text(path) {
            Ok(source) => self.inspect(path, &source),
            Err(err) => diagnostics::report(path, &err),
        }
    }

    fn inspect(&self, name: &str, source: &str) {
        let compilation = compile_source(source);
        print!("{}", self.format_compilation(name, &compilation));
        diagnostics::report_all(name, &compilation.diagnostics);
    }

    fn format_compilation(&self, name: &str, compilation: &Compilation) -> String {
        let mut out = String::new();

        if self.show_tokens {
            for token in &compilation.tokens {
                out.push_str(&format!("{}\n", token.dimmed()));
            }
        }
        if self.show_ast {
            out.push_str(&compilation.root.to_string());
        }
        if let Some(chunk) = &compilation.chunk {
            match chunk.disassemble(name) {
                Ok(listing) => out.push_str(&listing),
                Err(err) => out.push_str(&diagnostics::render(name, &err)),
            }
        }

        out
    }
}

/// Result of executing an inspector command
enum CommandResult {
    Continue,
    Exit,
}

fn print_toggle(view: &str, on: bool) {
    let state = if on { "on".green().to_string() } else { "off".red().to_string() };
    println!("{} {}", view.cyan(), state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_command_parse() {
        assert!(matches!(
            ReplCommand::parse(".help"),
            Some((ReplCommand::Help, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".tokens"),
            Some((ReplCommand::Tokens, None))
        ));
        assert!(matches!(
            ReplCommand::parse("  .AST "),
            Some((ReplCommand::Ast, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".load main.notc"),
            Some((ReplCommand::Load, Some("main.notc")))
        ));
        assert!(ReplCommand::parse(".version").is_none());
        assert!(ReplCommand::parse("1 + 2;").is_none());
    }

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced("(1 + 2);"));
        assert!(is_balanced("def main() -> int { 1; }"));
        assert!(!is_balanced("def main() -> int {"));
        assert!(!is_balanced("(1 + 2"));
        assert!(is_balanced("\"string with (unbalanced\";"));
        assert!(is_balanced("1; // (comment"));
        assert!(!is_balanced("{\n  1;\n"));
    }

    #[test]
    fn test_highlight_word() {
        assert_eq!(highlight_word("x"), "x");
        assert_ne!(highlight_word("def"), "def");
        assert_ne!(highlight_word("42"), "42");
    }
}
