//! Stable identity keys.
//!
//! Every registry in the engine is keyed by a namespaced [`Identifier`]
//! (`namespace:path`). Typed wrappers ([`ModuleId`], [`StatId`], [`DataKey`],
//! [`HookId`], [`MaterialId`]) keep the different key spaces apart at compile
//! time while sharing one validated representation.
//!
//! Identifiers written without a namespace are placed in
//! [`DEFAULT_NAMESPACE`] when parsed. Constants built with `from_static` are
//! trusted and must already be fully qualified.

use std::borrow::Cow;
use std::fmt;

use crate::error::{ErrorSeverity, ForgeError};

/// Namespace assumed for identifiers that omit one.
pub const DEFAULT_NAMESPACE: &str = "forge";

/// Errors produced while parsing identifiers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier '{key}' has an empty namespace or path")]
    MissingPart { key: String },

    #[error("identifier '{key}' contains invalid character '{ch}'")]
    InvalidCharacter { key: String, ch: char },
}

impl ForgeError for KeyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "KEY_EMPTY",
            Self::MissingPart { .. } => "KEY_MISSING_PART",
            Self::InvalidCharacter { .. } => "KEY_INVALID_CHARACTER",
        }
    }
}

/// Namespaced identifier (`namespace:path`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Identifier(Cow<'static, str>);

impl Identifier {
    /// Wraps a fully qualified static identifier without validation.
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Parses and validates an identifier, adding the default namespace if absent.
    pub fn parse(value: &str) -> Result<Self, KeyError> {
        if value.is_empty() {
            return Err(KeyError::Empty);
        }

        let (namespace, path) = match value.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, value),
        };
        Self::new(namespace, path)
    }

    /// Builds an identifier from its parts.
    pub fn new(namespace: &str, path: &str) -> Result<Self, KeyError> {
        let full = format!("{namespace}:{path}");
        if namespace.is_empty() || path.is_empty() {
            return Err(KeyError::MissingPart { key: full });
        }

        let bad_namespace = namespace.chars().find(|ch| !is_namespace_char(*ch));
        let bad_path = path.chars().find(|ch| !is_path_char(*ch));
        if let Some(ch) = bad_namespace.or(bad_path) {
            return Err(KeyError::InvalidCharacter { key: full, ch });
        }

        Ok(Self(Cow::Owned(full)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn namespace(&self) -> &str {
        self.0
            .split_once(':')
            .map_or(DEFAULT_NAMESPACE, |(namespace, _)| namespace)
    }

    pub fn path(&self) -> &str {
        self.0.split_once(':').map_or(&self.0, |(_, path)| path)
    }
}

fn is_namespace_char(ch: char) -> bool {
    matches!(ch, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

fn is_path_char(ch: char) -> bool {
    is_namespace_char(ch) || ch == '/'
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.as_ref())
    }
}

impl TryFrom<String> for Identifier {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = KeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0.into_owned()
    }
}

macro_rules! typed_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(Identifier);

        impl $name {
            pub const fn from_static(value: &'static str) -> Self {
                Self(Identifier::from_static(value))
            }

            pub fn parse(value: &str) -> Result<Self, KeyError> {
                Identifier::parse(value).map(Self)
            }

            pub fn identifier(&self) -> &Identifier {
                &self.0
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<Identifier> for $name {
            fn from(value: Identifier) -> Self {
                Self(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = KeyError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_key!(
    /// Identity of a behavior module. Lookup is always by this id, never by type.
    ModuleId
);
typed_key!(
    /// Identity of a stat key.
    StatId
);
typed_key!(
    /// Namespaced field in a data store.
    DataKey
);
typed_key!(
    /// Identity of a hook token.
    HookId
);
typed_key!(
    /// Identity of a material definition.
    MaterialId
);
