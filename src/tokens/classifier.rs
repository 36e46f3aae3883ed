//! Token classification: location code or region slug.

use std::fmt;

use thiserror::Error;

use crate::regions::{ReferenceData, RegionSlug};

/// Length of a location code such as `CNSGH`.
pub const LOCATION_CODE_LEN: usize = 5;

/// Which endpoint of the route a token was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Origin,
    Destination,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Origin => "origin",
            Side::Destination => "destination",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural shape of a token, decided without any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LocationCode,
    Region,
}

impl TokenKind {
    /// Exactly five uppercase ASCII letters is a location code candidate;
    /// anything else is a region candidate.
    pub fn classify(token: &str) -> Self {
        if token.len() == LOCATION_CODE_LEN && token.bytes().all(|b| b.is_ascii_uppercase()) {
            TokenKind::LocationCode
        } else {
            TokenKind::Region
        }
    }
}

/// True when `token` holds only ASCII letters and underscores.
pub fn has_safe_characters(token: &str) -> bool {
    token.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
}

/// A token rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("{side} contains prohibited characters")]
    InvalidCharacters { side: Side },

    #[error("{side} port not found in database. Please enter a valid value")]
    LocationNotFound { side: Side, code: String },

    #[error("{side} slug not found in database. Please enter a valid value")]
    RegionNotFound { side: Side, slug: RegionSlug },
}

impl TokenError {
    pub fn side(&self) -> Side {
        match self {
            TokenError::InvalidCharacters { side }
            | TokenError::LocationNotFound { side, .. }
            | TokenError::RegionNotFound { side, .. } => *side,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::InvalidCharacters { .. } => "invalid_characters",
            TokenError::LocationNotFound { .. } => "location_not_found",
            TokenError::RegionNotFound { .. } => "region_not_found",
        }
    }
}

/// A token known to exist in the reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedToken {
    LocationCode(String),
    Region(RegionSlug),
}

/// Run the character check, shape classification and existence check, in
/// that order, stopping at the first failure.
pub fn validate_token(
    side: Side,
    token: &str,
    data: &ReferenceData,
) -> Result<ValidatedToken, TokenError> {
    if !has_safe_characters(token) {
        return Err(TokenError::InvalidCharacters { side });
    }

    match TokenKind::classify(token) {
        TokenKind::LocationCode if data.is_location_code(token) => {
            Ok(ValidatedToken::LocationCode(token.to_string()))
        }
        TokenKind::LocationCode => Err(TokenError::LocationNotFound {
            side,
            code: token.to_string(),
        }),
        TokenKind::Region if data.is_region(token) => Ok(ValidatedToken::Region(token.to_string())),
        TokenKind::Region => Err(TokenError::RegionNotFound {
            side,
            slug: token.to_string(),
        }),
    }
}
