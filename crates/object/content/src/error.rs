//! Errors raised while compiling content tables.
//!
//! - [`ParseError`]: a single directive was rejected
//! - [`SourceError`]: a data file could not be read
//! - [`LifecycleError`]: a table was used or loaded in the wrong state
//! - [`LoadError`]: what a table load reports to its caller

use object_core::{ContentError, DiceError, ErrorSeverity, ExpressionError, TVal};

use crate::registry::TableState;
use crate::tables::TableKind;

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised by directive handlers.
///
/// The first error aborts the file being parsed; earlier directives have
/// already been applied to the builder, but nothing is committed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A field directive appeared before the directive that opens a record.
    #[error("directive appears before any record header")]
    MissingRecordHeader,

    #[error("undefined directive '{0}'")]
    UndefinedDirective(String),

    #[error("missing field '{0}'")]
    MissingField(String),

    /// A field value does not parse as its declared type.
    #[error("field '{field}' has invalid value '{value}'")]
    InvalidField { field: String, value: String },

    /// Text left over after every declared field was read.
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),

    #[error("unrecognised item type '{0}'")]
    UnrecognisedTval(String),

    #[error("unrecognised sub-type '{0}'")]
    UnrecognisedSval(String),

    #[error("unrecognised slay '{0}'")]
    UnrecognisedSlay(String),

    #[error("unrecognised brand '{0}'")]
    UnrecognisedBrand(String),

    #[error("unrecognised curse '{0}'")]
    UnrecognisedCurse(String),

    #[error("unrecognised activation '{0}'")]
    UnrecognisedActivation(String),

    #[error("unrecognised colour '{0}'")]
    UnrecognisedColor(String),

    #[error("invalid flag '{0}'")]
    InvalidFlag(String),

    #[error("invalid value '{0}'")]
    InvalidValue(String),

    /// An allocation range is not of the form `<min> to <max>`.
    #[error("invalid allocation range '{0}'")]
    InvalidAllocation(String),

    /// An allocation range bound lies outside 0..=255.
    #[error("allocation range '{0}' is out of bounds")]
    OutOfBounds(String),

    #[error("invalid effect '{0}'")]
    InvalidEffect(String),

    #[error("invalid effect parameter '{0}'")]
    InvalidParam(String),

    #[error("invalid dice: {0}")]
    InvalidDice(#[source] DiceError),

    #[error("invalid expression base '{0}'")]
    InvalidExpression(String),

    #[error("bad expression string: {0}")]
    BadExpressionString(#[source] ExpressionError),

    #[error("cannot bind expression: {0}")]
    UnboundExpression(#[source] DiceError),

    /// A slay names both a race flag and a monster base.
    #[error("slay has both a race flag and a monster base")]
    InvalidSlay,

    #[error("invalid monster base '{0}'")]
    InvalidMonsterBase(String),

    #[error("no object kind of type '{0}' for ego item")]
    NoKindForEgoType(TVal),

    #[error("no object kind with type '{tval}' and sub-type {sval}")]
    InvalidItemNumber { tval: TVal, sval: u32 },

    /// Artifact graphics can only be set on an instant-artifact kind.
    #[error("kind '{0}' is not a special artifact kind")]
    NotSpecialArtifact(String),

    /// A record index asks for a table larger than can be allocated.
    #[error("cannot allocate a table for record index {0}")]
    AllocationFailure(usize),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ContentError for ParseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Internal(_) => ErrorSeverity::Internal,
            Self::AllocationFailure(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRecordHeader => "PARSE_MISSING_RECORD_HEADER",
            Self::UndefinedDirective(_) => "PARSE_UNDEFINED_DIRECTIVE",
            Self::MissingField(_) => "PARSE_MISSING_FIELD",
            Self::InvalidField { .. } => "PARSE_INVALID_FIELD",
            Self::TrailingInput(_) => "PARSE_TRAILING_INPUT",
            Self::UnrecognisedTval(_) => "PARSE_UNRECOGNISED_TVAL",
            Self::UnrecognisedSval(_) => "PARSE_UNRECOGNISED_SVAL",
            Self::UnrecognisedSlay(_) => "PARSE_UNRECOGNISED_SLAY",
            Self::UnrecognisedBrand(_) => "PARSE_UNRECOGNISED_BRAND",
            Self::UnrecognisedCurse(_) => "PARSE_UNRECOGNISED_CURSE",
            Self::UnrecognisedActivation(_) => "PARSE_UNRECOGNISED_ACTIVATION",
            Self::UnrecognisedColor(_) => "PARSE_UNRECOGNISED_COLOR",
            Self::InvalidFlag(_) => "PARSE_INVALID_FLAG",
            Self::InvalidValue(_) => "PARSE_INVALID_VALUE",
            Self::InvalidAllocation(_) => "PARSE_INVALID_ALLOCATION",
            Self::OutOfBounds(_) => "PARSE_OUT_OF_BOUNDS",
            Self::InvalidEffect(_) => "PARSE_INVALID_EFFECT",
            Self::InvalidParam(_) => "PARSE_INVALID_PARAM",
            Self::InvalidDice(_) => "PARSE_INVALID_DICE",
            Self::InvalidExpression(_) => "PARSE_INVALID_EXPRESSION",
            Self::BadExpressionString(_) => "PARSE_BAD_EXPRESSION_STRING",
            Self::UnboundExpression(_) => "PARSE_UNBOUND_EXPRESSION",
            Self::InvalidSlay => "PARSE_INVALID_SLAY",
            Self::InvalidMonsterBase(_) => "PARSE_INVALID_MONSTER_BASE",
            Self::NoKindForEgoType(_) => "PARSE_NO_KIND_FOR_EGO_TYPE",
            Self::InvalidItemNumber { .. } => "PARSE_INVALID_ITEM_NUMBER",
            Self::NotSpecialArtifact(_) => "PARSE_NOT_SPECIAL_ARTIFACT",
            Self::AllocationFailure(_) => "PARSE_ALLOCATION_FAILURE",
            Self::Internal(_) => "PARSE_INTERNAL",
        }
    }
}

/// Errors raised by a [`DataSource`](crate::source::DataSource).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The table's data file does not exist.
    #[error("{table} data file not found at {path}")]
    NotFound { table: TableKind, path: String },

    #[error("failed to read {table} data from {path}: {source}")]
    Io {
        table: TableKind,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError for SourceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "SOURCE_NOT_FOUND",
            Self::Io { .. } => "SOURCE_IO",
        }
    }
}

/// A table was loaded or queried in the wrong state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("{table} table is not ready (state: {state})")]
    NotReady { table: TableKind, state: TableState },

    #[error("{table} table cannot be loaded again (state: {state})")]
    AlreadyLoaded { table: TableKind, state: TableState },

    #[error("{table} table needs the {dependency} table to be ready first")]
    DependencyNotReady {
        table: TableKind,
        dependency: TableKind,
    },

    #[error("content tables have been released")]
    Released,
}

impl ContentError for LifecycleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotReady { .. } => "LIFECYCLE_NOT_READY",
            Self::AlreadyLoaded { .. } => "LIFECYCLE_ALREADY_LOADED",
            Self::DependencyNotReady { .. } => "LIFECYCLE_DEPENDENCY_NOT_READY",
            Self::Released => "LIFECYCLE_RELEASED",
        }
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Why a table failed to load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{table}.txt line {line}: {source}")]
    Parse {
        table: TableKind,
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl LoadError {
    /// The parse error behind this failure, if any.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Source(SourceError::NotFound { .. }))
    }
}

impl ContentError for LoadError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Parse { source, .. } => source.severity(),
            Self::Source(err) => err.severity(),
            Self::Lifecycle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { source, .. } => source.error_code(),
            Self::Source(err) => err.error_code(),
            Self::Lifecycle(err) => err.error_code(),
        }
    }
}
