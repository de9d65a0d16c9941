//! The interactive REPL.
//!
//! Input is tree notation; every expression entered is analyzed and its trace
//! printed. Lines starting with `:` are commands:
//!
//! ```text
//! :catalog               documentation catalog
//! :rules                 registered rules, in order
//! :match PATTERN TREE    try one pattern against one tree
//! :help                  this list
//! :quit                  exit
//! ```

use std::io::{self, Write};

use assay_engine::{PatternCompiler, PatternMatcher, pattern::syntax::spec_from_ast};
use assay_foundation::printer::print;
use assay_foundation::{Error, ErrorKind, PrintConfig, Printer, Result};
use assay_language::{parse, read_expr};

use crate::editor::{LineEditor, ReadResult, RustylineEditor, bracket_depth, default_words};
use crate::report::render_text;
use crate::session::Session;

const HELP: &[&str] = &[
    "Enter tree notation to analyze it, e.g.",
    "  (call nil assert_equal (lit 0) (call (call nil obj) length))",
    "Commands:",
    "  :catalog               documentation catalog",
    "  :rules                 registered rules, in order",
    "  :match PATTERN TREE    try one pattern against one tree",
    "  :help                  this list",
    "  :quit                  exit",
];

/// What one evaluation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Lines to print.
    Lines(Vec<String>),
    /// The user asked to leave.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Configuration and rule table.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        let mut words = default_words();
        for rule in session.table().rules() {
            for name in pattern_names(&rule.pattern().to_string()) {
                if !words.contains(&name) {
                    words.push(name);
                }
            }
        }
        editor.set_completions(words);

        Self {
            editor,
            session,
            show_banner: true,
            prompt: "assay> ".to_string(),
            continuation_prompt: "   ... ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => print_error(&e),
            }
        }

        println!();
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };
        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(Reply::Lines(lines)) => {
                for line in lines {
                    println!("{line}");
                }
                Ok(true)
            }
            Ok(Reply::Quit) => Ok(false),
            Err(e) => {
                print_error(&e);
                Ok(true)
            }
        }
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.prompt
            } else {
                &self.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push('\n');
                    }
                    input.push_str(&line);

                    if bracket_depth(&input) <= 0 {
                        return Ok(Some(input));
                    }
                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::Internal(
                        "unexpected EOF in multi-line input".to_string(),
                    )));
                }
            }
        }
    }

    /// Evaluates one input: a command or tree notation.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands, malformed notation, or an
    /// invalid pattern.
    pub fn eval(&mut self, input: &str) -> Result<Reply> {
        let input = input.trim();
        let Some(command) = input.strip_prefix(':') else {
            return self.analyze(input).map(Reply::Lines);
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .unwrap_or((command, ""));
        let lines = match name {
            "quit" | "q" => return Ok(Reply::Quit),
            "help" => HELP.iter().map(ToString::to_string).collect(),
            "catalog" => self.session.catalog().lines().map(String::from).collect(),
            "rules" => self
                .session
                .table()
                .rules()
                .map(|rule| format!("{:>3} {} # {}", rule.order(), rule.pattern(), rule.message()))
                .collect(),
            "match" => match_command(rest.trim())?,
            other => {
                return Err(Error::new(ErrorKind::Internal(format!(
                    "unknown command :{other} (try :help)"
                ))));
            }
        };
        Ok(Reply::Lines(lines))
    }

    fn analyze(&self, input: &str) -> Result<Vec<String>> {
        let outcomes = self.session.analyze_source(input)?;
        let mut lines = Vec::new();
        for (i, outcome) in outcomes.iter().enumerate() {
            match render_text(None, i + 1, outcome) {
                Some(text) => lines.extend(text.lines().skip(1).map(String::from)),
                None => lines.push(format!("  {} # ok", print(&outcome.input))),
            }
        }
        Ok(lines)
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mAssay\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "{} rules loaded. Type :help for commands, Ctrl+D to exit.\n",
            self.session.table().len()
        );

        let _ = io::stdout().flush();
    }
}

/// `:match PATTERN TREE`
fn match_command(source: &str) -> Result<Vec<String>> {
    let forms = parse(source)?;
    let [pattern, tree] = forms.as_slice() else {
        return Err(Error::new(ErrorKind::Internal(
            "usage: :match PATTERN TREE".to_string(),
        )));
    };
    let pattern = PatternCompiler::compile(&spec_from_ast(pattern, source)?)?;
    let tree = read_expr(tree, source)?;

    let Some(captures) = PatternMatcher::match_expr(&pattern, &tree) else {
        return Ok(vec!["no match".to_string()]);
    };
    let printer = Printer::new(PrintConfig::new());
    let mut lines = vec![format!("match, {} capture(s)", captures.len())];
    lines.extend(
        captures
            .iter()
            .enumerate()
            .map(|(i, node)| format!("  ${i} = {}", printer.print_node(node))),
    );
    Ok(lines)
}

/// Literal method and kind names appearing in a printed pattern.
fn pattern_names(pattern: &str) -> Vec<String> {
    pattern
        .split(|c: char| c.is_whitespace() || "()[]".contains(c))
        .filter(|w| w.len() > 2 && w.starts_with(|c: char| c.is_ascii_lowercase()))
        .map(String::from)
        .collect()
}

/// Prints an error to stderr.
fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}
