use thiserror::Error;

/// Failure category of an [`Error`], independent of any context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ShapeMismatch,
    InvalidConfig,
    NumericDomain,
    DistributionConstraint,
    InvalidToken,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Length, row-count or column-count disagreement.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    /// Bad dimensions or parameters, detected before any numeric work.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// NaN/Inf where only finite values are valid, or a degenerate normalization.
    #[error("numeric domain error: {0}")]
    NumericDomain(String),
    /// Labels that are not binary/one-hot, or distributions that do not sum to 1.
    #[error("distribution constraint violated: {0}")]
    DistributionConstraint(String),
    /// Vocabulary encode/decode failure.
    #[error("invalid token: {0}")]
    InvalidToken(String),
    /// A stage-identifying message wrapped around the underlying cause.
    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap `self` with an outer message. The original error stays reachable via
    /// [`std::error::Error::source`] and [`Error::chain`].
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Iterate from this error down to the root cause.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |e| match e {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// The innermost (non-context) error.
    pub fn root_cause(&self) -> &Error {
        let mut cur = self;
        while let Error::Context { source, .. } = cur {
            cur = source;
        }
        cur
    }

    /// Kind of the root cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ShapeMismatch(_) => ErrorKind::ShapeMismatch,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Error::NumericDomain(_) => ErrorKind::NumericDomain,
            Error::DistributionConstraint(_) => ErrorKind::DistributionConstraint,
            Error::InvalidToken(_) => ErrorKind::InvalidToken,
            Error::Context { source, .. } => source.kind(),
        }
    }

    /// All messages from outermost to innermost, joined with `": "`.
    pub fn report(&self) -> String {
        self.chain()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(": ")
    }
}

/// Adds stage context to a `Result` without losing the cause.
pub trait ResultExt<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[inline]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    #[inline]
    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| e.context(f()))
    }
}
