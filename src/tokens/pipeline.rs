//! Sequential origin → destination validation and code resolution.
//!
//! The origin token is taken through every step, including the region
//! lookup, before the destination is looked at. The first failure is the
//! one reported.

use thiserror::Error;

use crate::regions::ReferenceData;
use crate::store::{RegionSource, StoreError, StoreResult};
use crate::tokens::classifier::{validate_token, Side, TokenError, ValidatedToken};

/// Failure of the endpoint pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Location code sets for both endpoints of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoints {
    pub origin: Vec<String>,
    pub destination: Vec<String>,
}

/// Turn a validated token into the location codes it stands for.
///
/// A location code stands for itself. A region stands for the codes attached
/// to it or to any of its descendants, fetched from `source`.
pub async fn resolve_codes(
    token: ValidatedToken,
    data: &ReferenceData,
    source: &dyn RegionSource,
) -> StoreResult<Vec<String>> {
    match token {
        ValidatedToken::LocationCode(code) => Ok(vec![code]),
        ValidatedToken::Region(slug) => {
            let Some(descendants) = data.index().descendants(&slug) else {
                return Ok(Vec::new());
            };
            let codes = source.location_codes_in(descendants).await?;
            tracing::debug!(
                region = %slug,
                regions = descendants.len(),
                codes = codes.len(),
                "Region expanded to location codes"
            );
            Ok(codes)
        }
    }
}

async fn resolve_side(
    side: Side,
    token: &str,
    data: &ReferenceData,
    source: &dyn RegionSource,
) -> Result<Vec<String>, PipelineError> {
    let validated = validate_token(side, token, data)?;
    Ok(resolve_codes(validated, data, source).await?)
}

/// Validate and resolve origin, then destination.
pub async fn validate_endpoints(
    origin: &str,
    destination: &str,
    data: &ReferenceData,
    source: &dyn RegionSource,
) -> Result<ResolvedEndpoints, PipelineError> {
    let origin = resolve_side(Side::Origin, origin, data, source).await?;
    let destination = resolve_side(Side::Destination, destination, data, source).await?;
    Ok(ResolvedEndpoints { origin, destination })
}
