use crate::error::ApiError;
use crate::utils::logging::pretty_json_if_debug;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
};
use excuse_schema::{CreateExcuseRequest, VoteDelta, VoteRequest};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{INVALID_DELTA, INVALID_EXCUSE_ID, TEXT_REQUIRED};

/// Validated `POST /excuses` payload: the submitted text, already trimmed and non-empty.
pub(crate) struct NewExcuse(pub(crate) String);

impl<S> FromRequest<S> for NewExcuse
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    /// Any body that is not a JSON object with a non-blank string `text` is rejected with
    /// `Text is required`. The parser error is only logged.
    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let body: CreateExcuseRequest = json_body(req, TEXT_REQUIRED).await?;

        if let Some(pretty_body) = pretty_json_if_debug(&body) {
            debug!(body = %pretty_body, "Extracted create-excuse body");
        }

        let Some(text) = body.trimmed_text() else {
            return Err(ApiError::rejected(TEXT_REQUIRED));
        };

        Ok(Self(text.to_string()))
    }
}

/// Validated `POST /excuses/{id}/vote` request.
#[derive(Debug)]
pub(crate) struct VoteTarget {
    pub(crate) id: i64,
    pub(crate) delta: VoteDelta,
}

impl<S> FromRequest<S> for VoteTarget
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    /// The id is checked before the body, so a bad id wins over a bad delta.
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let Path(raw_id) = Path::<String>::from_request_parts(&mut parts, state)
            .await
            .map_err(|rejection| {
                ApiError::rejected_with(INVALID_EXCUSE_ID, rejection.body_text())
            })?;
        let id = parse_excuse_id(&raw_id)?;

        let req = Request::from_parts(parts, body);
        let body: VoteRequest = json_body(req, INVALID_DELTA).await?;

        let Some(delta) = body.vote_delta() else {
            return Err(ApiError::rejected(INVALID_DELTA));
        };

        Ok(Self { id, delta })
    }
}

/// Reads the body as JSON whatever `content-type` says.
async fn json_body<T: DeserializeOwned>(
    req: Request,
    message: &'static str,
) -> Result<T, ApiError> {
    let bytes = Bytes::from_request(req, &())
        .await
        .map_err(|rejection| ApiError::rejected_with(message, rejection.body_text()))?;

    serde_json::from_slice(&bytes).map_err(|e| ApiError::rejected_with(message, e.to_string()))
}

fn parse_excuse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|e| ApiError::rejected_with(INVALID_EXCUSE_ID, format!("{raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excuse_id_must_be_a_plain_integer() {
        assert_eq!(parse_excuse_id("1").unwrap(), 1);
        assert_eq!(parse_excuse_id("-3").unwrap(), -3);
        assert!(parse_excuse_id("abc").is_err());
        assert!(parse_excuse_id("12abc").is_err());
        assert!(parse_excuse_id("1.5").is_err());
        assert!(parse_excuse_id("").is_err());
        assert!(parse_excuse_id("99999999999999999999").is_err());
    }
}
