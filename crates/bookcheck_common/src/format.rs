//! Positional placeholder substitution for request templates.
//!
//! Templates are JSON-shaped strings containing `{0}`, `{1}`, ... tokens.
//! Substitution is purely textual: the template is never parsed as JSON and
//! values are inserted verbatim.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A placeholder index has no matching argument.
    #[error("template references {{{index}}} but only {supplied} argument(s) were supplied")]
    MissingArgument { index: usize, supplied: usize },

    /// A placeholder index does not fit in `usize`.
    #[error("placeholder index {0} is out of range")]
    InvalidIndex(String),
}

/// Replaces every `{N}` token in `template` with `args[N]`.
///
/// Braces that do not enclose one or more ASCII digits are copied as-is, so
/// JSON object braces pass through untouched. A token whose index is beyond
/// `args` fails instead of being left in place or blanked.
pub fn format_template<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();

        if digits > 0 && after.as_bytes().get(digits) == Some(&b'}') {
            let raw = &after[..digits];
            let index: usize = raw
                .parse()
                .map_err(|_| FormatError::InvalidIndex(raw.to_string()))?;
            let value = args.get(index).ok_or(FormatError::MissingArgument {
                index,
                supplied: args.len(),
            })?;
            out.push_str(value.as_ref());
            rest = &after[digits + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }

    out.push_str(rest);
    Ok(out)
}
