//! Escaping of Solr query syntax characters.
//!
//! Every character with a meaning in the standard query parser is prefixed
//! with `\`, as is whitespace, so a value is always read as a single term:
//! `\ + - ! ( ) : ^ [ ] " { } ~ * ? | & ; /`

pub fn escape_query_chars(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if is_reserved(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn is_reserved(c: char) -> bool {
    matches!(
        c,
        '\\' | '+'
            | '-'
            | '!'
            | '('
            | ')'
            | ':'
            | '^'
            | '['
            | ']'
            | '"'
            | '{'
            | '}'
            | '~'
            | '*'
            | '?'
            | '|'
            | '&'
            | ';'
            | '/'
    ) || c.is_whitespace()
}
