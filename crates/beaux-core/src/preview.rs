//! Code-to-preview transformation.
//!
//! Turns a text blob purporting to define one function-style UI component
//! into a previewable component handle. The entry point is found by name
//! sniffing: the FIRST `function <Name>(` match wins, so an earlier helper
//! function written in `function` syntax shadows the real component. That
//! is a documented limitation of the heuristic, not a parser.
//!
//! Evaluation is structural only: balanced delimiters and a `return`
//! expression inside the entry function. The evaluated text gets no host
//! access of any kind.

use regex::Regex;

use crate::error::{Error, Result};

fn function_name_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"function\s+([^({\s]+)").expect("valid regex"))
}

/// A component extracted from source text, invocable in the sense of
/// rendering its return expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewComponent {
    pub name: String,
    /// The full source text the component was extracted from.
    pub source: String,
    /// The entry function's brace-delimited body.
    pub body: String,
}

impl PreviewComponent {
    /// The return expression of the entry function, the renderable part of
    /// the preview.
    pub fn invoke(&self) -> &str {
        extract_return_expression(&self.body).unwrap_or("")
    }
}

/// Transforms source text into a previewable component.
///
/// Empty/whitespace input is `Ok(None)`: "nothing to preview yet" is
/// distinct from a failed preview. Failures never escape as panics; the
/// message carries the underlying reason verbatim.
pub fn transform(source: &str) -> Result<Option<PreviewComponent>> {
    if source.trim().is_empty() {
        return Ok(None);
    }

    let Some(captures) = function_name_regex().captures(source) else {
        return Err(Error::Preview(
            "not a valid component: no function declaration found".to_string(),
        ));
    };
    let name = captures[1].to_string();
    let decl_start = captures.get(0).expect("capture 0 always present").start();

    let body = extract_function_body(&source[decl_start..]).map_err(Error::Preview)?;

    if !contains_return(&body) {
        return Err(Error::Preview(format!(
            "component \"{name}\" is not a valid component: its body never returns"
        )));
    }

    Ok(Some(PreviewComponent {
        name,
        source: source.to_string(),
        body,
    }))
}

/// Extracts the brace-delimited body following the declaration's parameter
/// list, verifying both delimiter pairs balance.
fn extract_function_body(decl: &str) -> std::result::Result<String, String> {
    let open_paren = decl
        .find('(')
        .ok_or_else(|| "syntax error: expected a parameter list".to_string())?;

    let mut depth = 0usize;
    let mut params_end = None;
    for (i, c) in decl[open_paren..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    params_end = Some(open_paren + i + 1);
                    break;
                }
            }
            _ => {}
        }
    }
    let params_end =
        params_end.ok_or_else(|| "syntax error: unbalanced parentheses".to_string())?;

    let after_params = &decl[params_end..];
    let open_brace = after_params
        .find('{')
        .ok_or_else(|| "syntax error: expected a function body".to_string())?;

    let mut depth = 0usize;
    for (i, c) in after_params[open_brace..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let start = open_brace + 1;
                    let end = open_brace + i;
                    return Ok(after_params[start..end].to_string());
                }
            }
            _ => {}
        }
    }
    Err("syntax error: unbalanced braces".to_string())
}

/// Whether the body contains a `return` keyword at a word boundary.
fn contains_return(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut from = 0;
    while let Some(pos) = body[from..].find("return") {
        let abs = from + pos;
        let before_ok = abs == 0 || !is_word_byte(bytes[abs - 1]);
        let after = abs + "return".len();
        let after_ok = after >= bytes.len() || !is_word_byte(bytes[after]);
        if before_ok && after_ok {
            return true;
        }
        from = abs + "return".len();
    }
    false
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// First `return` expression in a body, trimmed, without a trailing `;`.
fn extract_return_expression(body: &str) -> Option<&str> {
    let bytes = body.as_bytes();
    let mut from = 0;
    while let Some(pos) = body[from..].find("return") {
        let abs = from + pos;
        let before_ok = abs == 0 || !is_word_byte(bytes[abs - 1]);
        let after = abs + "return".len();
        let after_ok = after >= bytes.len() || !is_word_byte(bytes[after]);
        if before_ok && after_ok {
            let rest = body[after..].trim_start();
            let end = rest.find(';').unwrap_or(rest.len());
            return Some(rest[..end].trim_end());
        }
        from = after;
    }
    None
}
