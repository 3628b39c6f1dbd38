use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::validate::ValidationError;

/// Result type for catalog operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        reason: impl Into<String>,
        span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate variable error.
    pub fn duplicate_variable_error(
        &self,
        name: impl Into<String>,
        first_span: SourceSpan,
        second_span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::DuplicateVariable {
            src: self.named_source(),
            first_span,
            second_span,
            name: name.into(),
        })
    }

    /// Create an invalid default value error.
    pub fn invalid_default_error(
        &self,
        name: impl Into<String>,
        message: impl Into<String>,
        span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::InvalidDefault {
            src: self.named_source(),
            span,
            name: name.into(),
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template definition")]
    #[diagnostic(code(stencil::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(stencil::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid variable name '{name}'")]
    #[diagnostic(
        code(stencil::invalid_identifier),
        help("{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: SourceSpan,
        name: String,
        reason: String,
    },

    #[error("duplicate variable '{name}'")]
    #[diagnostic(
        code(stencil::duplicate_variable),
        help("each variable may only be declared once per template")
    )]
    DuplicateVariable {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        name: String,
    },

    #[error("invalid default for variable '{name}'")]
    #[diagnostic(code(stencil::invalid_default))]
    InvalidDefault {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        name: String,
        message: String,
    },

    #[error("duplicate template id '{id}'")]
    #[diagnostic(
        code(stencil::duplicate_template),
        help("defined in both '{first}' and '{second}'")
    )]
    DuplicateTemplate {
        id: String,
        /// Display form of the file that defined the id first
        first: String,
        second: String,
    },

    #[error("template '{id}' not found")]
    #[diagnostic(
        code(stencil::template_not_found),
        help("available templates: {available}")
    )]
    TemplateNotFound { id: String, available: String },

    #[error("template '{template}' has no example named '{example}'")]
    #[diagnostic(
        code(stencil::example_not_found),
        help("available examples: {available}")
    )]
    ExampleNotFound {
        template: String,
        example: String,
        available: String,
    },

    #[error("template '{template}' failed to parse")]
    #[diagnostic(code(stencil::template_syntax))]
    Syntax {
        template: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: SourceSpan,
        #[source]
        source: stencil_engine::Error,
    },

    #[error("invalid values for template '{template}'")]
    #[diagnostic(
        code(stencil::invalid_values),
        help("fix the fields below, or render in lenient mode to fall back to defaults")
    )]
    InvalidValues {
        template: String,
        #[related]
        errors: Vec<ValidationError>,
    },
}

impl Error {
    /// Wrap an engine error, attaching the template source for reporting.
    pub fn syntax(
        template: impl Into<String>,
        source_text: &str,
        source: stencil_engine::Error,
    ) -> Box<Self> {
        let template = template.into();
        Box::new(Error::Syntax {
            src: NamedSource::new(&template, source_text.to_string()),
            span: source.span(),
            template,
            source,
        })
    }

    /// Create a not-found error listing the ids that do exist.
    pub fn template_not_found(id: impl Into<String>, available: &[String]) -> Box<Self> {
        Box::new(Error::TemplateNotFound {
            id: id.into(),
            available: join_or_none(available),
        })
    }

    /// Per-field validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Error::InvalidValues { errors, .. } => errors,
            _ => &[],
        }
    }
}

pub(crate) fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
