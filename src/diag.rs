//! Fancy reporting of parse errors with [`miette`].
//!
//! ```ignore
//! let src = "\\frac{1}{2";
//! if let Err(err) = mathdisplay::parse(src) {
//!     let diag = Diagnostic::new(Box::new(err), Source { name: None, src });
//!     eprintln!("{:?}", miette::Report::new(diag));
//! }
//! ```
use core::fmt;

use miette::MietteSpanContents;

use crate::Span;
use crate::parse::{ParseError, ParseErrorKind};

/// An error that can be pointed at in its source
pub trait DiagTrait: fmt::Debug + fmt::Display {
    /// Byte range of the error in the source
    fn span(&self) -> Span;
    /// Message of the label
    fn message(&self) -> String;
    /// Help message, if any
    fn help(&self) -> Option<String> {
        None
    }
}

impl DiagTrait for ParseError {
    fn span(&self) -> Span {
        self.span
    }

    fn message(&self) -> String {
        format!("{}", self)
    }

    fn help(&self) -> Option<String> {
        match self.kind {
            ParseErrorKind::InvalidCommand => {
                Some("See `mathdisplay::symbols::supported_commands()`".to_string())
            }
            ParseErrorKind::MissingRight => Some("Close the delimiter with `\\right`".to_string()),
            ParseErrorKind::MissingEnd => Some("Close the environment with `\\end`".to_string()),
            ParseErrorKind::MissingEnv => {
                Some("`&` and `\\\\` are only valid in environments".to_string())
            }
            ParseErrorKind::InvalidLimits => {
                Some("`\\limits` must follow a large operator".to_string())
            }
            _ => None,
        }
    }
}

/// A LaTeX math source, optionally named
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Name of the source, e.g. a file name
    pub name: Option<&'a str>,
    /// The LaTeX input
    pub src: &'a str,
}

impl miette::SourceCode for Source<'_> {
    fn read_span<'a>(
        &'a self,
        span: &miette::SourceSpan,
        context_lines_before: usize,
        context_lines_after: usize,
    ) -> Result<Box<dyn miette::SpanContents<'a> + 'a>, miette::MietteError> {
        let start = span.offset();
        let end = start + span.len();

        if start > self.src.len() || end > self.src.len() || start > end {
            return Err(miette::MietteError::OutOfBounds);
        }

        let content = <str as miette::SourceCode>::read_span(
            self.src,
            span,
            context_lines_before,
            context_lines_after,
        )?;
        if let Some(name) = self.name {
            let content = MietteSpanContents::new_named(
                name.to_string(),
                content.data(),
                *content.span(),
                content.line(),
                content.column(),
                content.line_count(),
            )
            .with_language("latex");
            Ok(Box::new(content))
        } else {
            Ok(content)
        }
    }
}

/// An error together with its source
#[derive(Debug)]
pub struct Diagnostic<'a> {
    diag: Box<dyn DiagTrait>,
    source: Source<'a>,
}

impl<'a> Diagnostic<'a> {
    /// Build a diagnostic
    pub fn new(diag: Box<dyn DiagTrait>, source: Source<'a>) -> Self {
        Self { diag, source }
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())?;
        if let Some(help) = self.diag.help() {
            write!(f, "\nHelp: {}", help)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic<'_> {}

impl miette::Diagnostic for Diagnostic<'_> {
    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels<'a>(&'a self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + 'a>> {
        let (start, end) = self.diag.span();
        let labeled_span = miette::LabeledSpan::new(
            Some(self.diag.message()),
            start,
            end.saturating_sub(start),
        );
        Some(Box::new(std::iter::once(labeled_span)))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source as &dyn miette::SourceCode)
    }
}
