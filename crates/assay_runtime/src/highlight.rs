//! Syntax highlighting for tree and pattern notation in the REPL.

use std::borrow::Cow;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM_ITALIC: &str = "\x1b[2;3m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const MAGENTA: &str = "\x1b[35m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";

/// Highlighter for s-expression notation.
pub struct NotationHighlighter;

impl NotationHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    ///
    /// Node kinds (the symbol right after an open paren) are green, names
    /// written as keywords are cyan, and the pattern wildcards are blue.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut in_string = false;
        let mut after_open = false;

        while let Some(c) = chars.next() {
            if in_string {
                result.push(c);
                match c {
                    '\\' => {
                        if let Some(next) = chars.next() {
                            result.push(next);
                        }
                    }
                    '"' => {
                        result.push_str(RESET);
                        in_string = false;
                    }
                    _ => {}
                }
                continue;
            }

            match c {
                ';' => {
                    result.push_str(DIM_ITALIC);
                    result.push(c);
                    result.extend(chars.by_ref());
                    result.push_str(RESET);
                    return Cow::Owned(result);
                }
                '"' => {
                    result.push_str(YELLOW);
                    result.push(c);
                    in_string = true;
                }
                '(' | ')' | '[' | ']' => {
                    result.push_str(BOLD);
                    result.push(c);
                    result.push_str(RESET);
                    after_open = c == '(';
                    continue;
                }
                c if c.is_whitespace() || c == ',' => {
                    result.push(c);
                    continue;
                }
                _ => {
                    let mut word = String::from(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_whitespace() || "()[]\";,".contains(next) {
                            break;
                        }
                        word.push(next);
                        chars.next();
                    }
                    let color = word_color(&word, after_open);
                    if color.is_empty() {
                        result.push_str(&word);
                    } else {
                        result.push_str(color);
                        result.push_str(&word);
                        result.push_str(RESET);
                    }
                }
            }
            after_open = false;
        }

        if in_string {
            result.push_str(RESET);
        }

        Cow::Owned(result)
    }
}

fn word_color(word: &str, is_kind: bool) -> &'static str {
    match word {
        "_" | "___" | "?" | "nil" | "true" | "false" => BLUE,
        _ if is_kind => GREEN,
        _ if word.starts_with(':') => CYAN,
        _ if word.starts_with(|c: char| c.is_ascii_digit())
            || (word.starts_with('-') && word[1..].starts_with(|c: char| c.is_ascii_digit())) =>
        {
            MAGENTA
        }
        _ => "",
    }
}

impl Default for NotationHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
