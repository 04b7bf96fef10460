use std::sync::LazyLock;

use regex::Regex;

/// A tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub command: String,
    pub args: Vec<String>,
}

/// Splits a line into a command name and its arguments.
///
/// Tokens are separated by whitespace. Text in matching `"` or `'` quotes is
/// one token with the quotes removed; a quote without a closing partner is
/// dropped. Returns `None` for a blank line.
pub fn parse_line(input: &str) -> Option<ParsedLine> {
    let mut tokens = tokenize(input).into_iter();
    let command = tokens.next()?;
    Some(ParsedLine {
        command,
        args: tokens.collect(),
    })
}

/// A bare word, or the body of a `"` or `'` quoted run. Word boundaries are
/// ASCII whitespace only.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\t\n\x0C\r "']+|"([^"]*)"|'([^']*)'"#).unwrap());

fn tokenize(input: &str) -> Vec<String> {
    TOKEN
        .captures_iter(input)
        .filter_map(|captures| {
            captures
                .get(1)
                .or_else(|| captures.get(2))
                .or_else(|| captures.get(0))
        })
        .map(|token| token.as_str().to_string())
        .collect()
}
