//! Contains the common [`ErrorKind`] trait used by every error the symterm engine can raise, and
//! the [`Error`] type that pairs a kind with the regions of a rendered expression it points at.

use ariadne::{Color, Report};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while building or solving an expression.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error as a [`dyn Any`], so that callers can downcast it to a concrete kind.
    ///
    /// [`dyn Any`]: std::any::Any
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of a rendered expression that can be highlighted.
///
/// The spans index into the [`Display`] output of the node that was being solved when the error
/// was raised. Errors raised by plain numeric arithmetic have no spans until an enclosing node
/// attaches them.
#[derive(Debug)]
pub struct Error {
    /// The regions of the rendered expression that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any region yet.
    pub fn bare(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Shifts every span by `by` bytes. Used when an error raised while solving a child node
    /// bubbles up into the rendering of its parent.
    pub fn offset(mut self, by: usize) -> Self {
        for span in &mut self.spans {
            *span = span.start + by..span.end + by;
        }
        self
    }

    /// Attaches the given spans if this error has none yet.
    pub fn or_spans(mut self, spans: impl FnOnce() -> Vec<Range<usize>>) -> Self {
        if self.spans.is_empty() {
            self.spans = spans();
        }
        self
    }

    /// Returns the kind of this error as the concrete type `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}
