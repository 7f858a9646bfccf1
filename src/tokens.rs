use regex::Regex;
use std::collections::VecDeque;

/// Splits source text into tokens. A token is a single parenthesis or a run
/// of anything that is neither whitespace nor a parenthesis, so this never
/// fails; malformed input is the reader's problem.
pub fn tokenize(input: &str) -> VecDeque<String> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(r"[()]|[^\s()]+").unwrap();
    }
    TOKEN_RE
        .find_iter(input)
        .map(|m| m.as_str().to_string())
        .collect()
}
