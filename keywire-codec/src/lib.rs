use std::ops::Range;

pub mod keycodes;
pub mod keysym;
pub mod layout;
pub mod macros;
pub mod matrix;

#[derive(Debug)]
pub struct CodecError {
    pub message: String,
    pub span: Option<Range<usize>>,
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    at: ({:?})", &self.message, &self.span)
    }
}

impl std::error::Error for CodecError {}

impl From<&str> for CodecError {
    fn from(err: &str) -> Self {
        Self {
            message: err.to_string(),
            span: None,
        }
    }
}

impl CodecError {
    pub fn new(message: String, span: Range<usize>) -> Self {
        Self {
            message,
            span: Some(span),
        }
    }

    fn char_span(&self, source: &str) -> Option<Range<usize>> {
        self.span.clone().map(|b: Range<usize>| {
            let mut s = usize::MAX;
            let mut j = 0;
            for (i, c) in source.chars().enumerate() {
                if j >= b.start {
                    if s == usize::MAX {
                        s = i;
                    }
                    if j >= b.end {
                        return Some(s..i);
                    }
                }
                j += c.len_utf8();
            }
            if s == usize::MAX {
                s = j;
            }
            Some(s..j)
        })?
    }
}

/// Parse a symbolic keycode, printing an annotated report for a bad one.
///
/// The report labels the offending substring; the returned error is the
/// same one `keysym::from_symbol` produced.
pub fn pretty_parse(symbolic: &str, version: u8) -> Result<u16, CodecError> {
    match keysym::from_symbol(symbolic, version) {
        Ok(code) => Ok(code),
        Err(err) => {
            use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
            let mut colors = ColorGenerator::new();

            let a = colors.next();
            if let Some(span) = err.char_span(symbolic) {
                Report::build(ReportKind::Error, "<keycode>", 12)
                    .with_message("Invalid keycode".to_string())
                    .with_label(
                        Label::new(("<keycode>", span))
                            .with_message(&err.message)
                            .with_color(a),
                    )
                    .finish()
                    .eprint(("<keycode>", Source::from(symbolic)))
                    .unwrap();
            }
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
