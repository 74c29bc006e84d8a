use std::borrow::Cow;
use std::{error, fmt};

use crate::value::PlainValue;

// -----------------------------------------------------------------------------
// MapError

/// An enumeration of all error outcomes of a mapping operation.
///
/// Every failure aborts the whole `to_json`/`from_iterable` call; no partial
/// result is ever produced.
#[derive(Debug)]
pub enum MapError {
    /// The raw input could not be cast to the declared target type.
    ///
    /// The only cast failure of the import pipeline; the export pipeline
    /// never fails on unknown value shapes.
    InvalidCast {
        value: PlainValue,
        target: Cow<'static, str>,
    },
    /// A type path was looked up in a [`TypeRegistry`] it was never
    /// registered into.
    ///
    /// [`TypeRegistry`]: crate::registry::TypeRegistry
    UnknownType { path: Cow<'static, str> },
    /// A registered type was asked to build an instance, but it was
    /// registered without construction support.
    NotConstructible { path: Cow<'static, str> },
    /// A constructor parameter had no input value, no declared default and
    /// no vacant value to fall back to.
    MissingArgument {
        name: Cow<'static, str>,
        target: Cow<'static, str>,
    },
    /// A cast argument did not carry the type its parameter declared.
    ///
    /// Only reachable through a hand-written [`ConstructorSpec`] whose
    /// parameter list disagrees with its `construct` implementation.
    ///
    /// [`ConstructorSpec`]: crate::info::ConstructorSpec
    MismatchedArgument {
        name: Cow<'static, str>,
        expected: Cow<'static, str>,
    },
    /// The JSON facade failed to render a plain value.
    Json(serde_json::Error),
}

impl MapError {
    /// Creates an [`InvalidCast`](Self::InvalidCast) error.
    pub fn invalid_cast(value: PlainValue, target: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidCast {
            value,
            target: target.into(),
        }
    }

    /// Creates an [`UnknownType`](Self::UnknownType) error.
    pub fn unknown_type(path: impl Into<Cow<'static, str>>) -> Self {
        Self::UnknownType { path: path.into() }
    }

    /// Creates a [`NotConstructible`](Self::NotConstructible) error.
    pub fn not_constructible(path: impl Into<Cow<'static, str>>) -> Self {
        Self::NotConstructible { path: path.into() }
    }

    /// Creates a [`MissingArgument`](Self::MissingArgument) error.
    pub fn missing_argument(
        name: impl Into<Cow<'static, str>>,
        target: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::MissingArgument {
            name: name.into(),
            target: target.into(),
        }
    }

    /// Creates a [`MismatchedArgument`](Self::MismatchedArgument) error.
    pub fn mismatched_argument(
        name: impl Into<Cow<'static, str>>,
        expected: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::MismatchedArgument {
            name: name.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCast { value, target } => {
                write!(f, "invalid value `{value:?}` for type `{target}`")
            }
            Self::UnknownType { path } => {
                write!(f, "type `{path}` is not registered")
            }
            Self::NotConstructible { path } => {
                write!(f, "type `{path}` is registered without construction support")
            }
            Self::MissingArgument { name, target } => {
                write!(f, "missing argument `{name}` for type `{target}`")
            }
            Self::MismatchedArgument { name, expected } => {
                write!(f, "argument `{name}` does not carry a `{expected}`")
            }
            Self::Json(error) => {
                write!(f, "failed to render JSON: {error}")
            }
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Json(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MapError {
    #[inline]
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}
