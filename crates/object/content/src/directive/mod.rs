//! Line-oriented directive dispatch.
//!
//! A data file is a sequence of lines of the form
//!
//! ```text
//! <keyword> <field> <field> ...
//! ```
//!
//! Each keyword is registered with a [`Pattern`] describing its fields and a
//! handler that receives the parse state and the typed [`Fields`]. Blank
//! lines and lines starting with `#` are skipped.

mod fields;
mod pattern;

pub use fields::{FieldValue, Fields};
pub use pattern::{FieldSpec, FieldType, Pattern};

use crate::error::{ParseError, ParseResult};

/// Handler invoked for a matched directive.
pub type Handler<S> = for<'f> fn(&mut S, &Fields<'f>) -> ParseResult<()>;

struct Directive<S> {
    pattern: Pattern,
    handler: Handler<S>,
}

/// Where in the input a directive failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    pub error: ParseError,
}

/// Dispatches data-file lines to registered handlers.
pub struct DirectiveParser<S> {
    directives: Vec<Directive<S>>,
}

impl<S> Default for DirectiveParser<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> DirectiveParser<S> {
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
        }
    }

    /// Registers `handler` for the directive described by `pattern`.
    ///
    /// Fails if the pattern is malformed or its keyword is already taken.
    pub fn register(&mut self, pattern: &str, handler: Handler<S>) -> ParseResult<()> {
        let pattern = Pattern::parse(pattern)?;
        if self.find(&pattern.keyword).is_some() {
            return Err(ParseError::Internal(format!(
                "directive '{}' registered twice",
                pattern.keyword
            )));
        }
        self.directives.push(Directive { pattern, handler });
        Ok(())
    }

    /// Registers several directives at once.
    pub fn register_all(&mut self, directives: &[(&str, Handler<S>)]) -> ParseResult<()> {
        for (pattern, handler) in directives {
            self.register(pattern, *handler)?;
        }
        Ok(())
    }

    fn find(&self, keyword: &str) -> Option<&Directive<S>> {
        self.directives
            .iter()
            .find(|directive| directive.pattern.keyword == keyword)
    }

    /// Returns true if a directive with this keyword is registered.
    pub fn is_registered(&self, keyword: &str) -> bool {
        self.find(keyword).is_some()
    }

    /// Parses and dispatches a single line.
    pub fn parse_line(&self, state: &mut S, line: &str) -> ParseResult<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let directive = self
            .find(keyword)
            .ok_or_else(|| ParseError::UndefinedDirective(keyword.to_owned()))?;
        let fields = Fields::read(&directive.pattern.fields, rest)?;
        (directive.handler)(state, &fields)
    }

    /// Parses every line of `text`, stopping at the first error.
    pub fn parse_str(&self, state: &mut S, text: &str) -> Result<(), LineError> {
        for (index, line) in text.lines().enumerate() {
            self.parse_line(state, line).map_err(|error| LineError {
                line: index + 1,
                error,
            })?;
        }
        Ok(())
    }
}
