//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// lets `#[derive(ErrorKind)]` refer to this crate by name in its own tests
extern crate self as cas_error;

use ariadne::{Color, Report};
use std::{fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the plain, single-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Replaces the spans of this error if it has none, so that errors raised without source
    /// information can still point at something when reported.
    pub fn or_span(mut self, span: Range<usize>) -> Self {
        if self.spans.is_empty() {
            self.spans.push(span);
        }
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne::Source;
    use cas_attrs::ErrorKind;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown variable `{}`", name),
        labels = ["this variable"],
        help = "check the spelling of the variable name",
    )]
    struct UnknownVariable {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "nothing to see here")]
    struct Spanless;

    fn render(error: &Error, src: &str) -> String {
        let mut buf = Vec::new();
        error.build_report("input")
            .write(("input", Source::from(src)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn message_uses_fields() {
        let error = Error::new(vec![4..5], UnknownVariable { name: "y".to_string() });
        assert_eq!(error.to_string(), "unknown variable `y`");
    }

    #[test]
    fn report_contains_label_and_help() {
        let error = Error::new(vec![4..5], UnknownVariable { name: "y".to_string() });
        let report = render(&error, "x + y");
        assert!(report.contains("unknown variable `y`"));
        assert!(report.contains("this variable"));
        assert!(report.contains("check the spelling"));
    }

    #[test]
    fn or_span_fills_missing_spans() {
        let error = Error::new(vec![], Spanless).or_span(0..3);
        assert_eq!(error.spans, vec![0..3]);

        let error = Error::new(vec![1..2], Spanless).or_span(0..3);
        assert_eq!(error.spans, vec![1..2]);
    }

    #[test]
    fn spanless_report_does_not_panic() {
        let error = Error::new(vec![], Spanless);
        let report = render(&error, "abc");
        assert!(report.contains("nothing to see here"));
    }
}
