//! JSON-RPC mapping for the `submitblock` method
//!
//! Transport-agnostic: turns a JSON params value into a [`RawSubmission`] and
//! a [`SubmissionResult`] back into a JSON result or error. Sockets, HTTP and
//! method dispatch live in the gateway.

use crate::domain::SubmissionResult;
use crate::error::DecodeErrorKind;
use crate::ports::{BlockSubmissionApi, RawSubmission};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Result token returned for a consensus rejection
pub const REJECTED_TOKEN: &str = "rejected";

/// Error codes used by `submitblock`
pub mod codes {
    /// Invalid, missing or duplicate parameter (malformed hex, too short)
    pub const INVALID_PARAMETER: i32 = -8;
    /// Error parsing or validating structure in raw format
    pub const DESERIALIZATION_ERROR: i32 = -22;
    /// JSON-RPC 2.0: params have the wrong shape
    pub const INVALID_PARAMS: i32 = -32602;
    /// JSON-RPC 2.0: internal error
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

impl RpcError {
    /// Create a new RPC error
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Malformed or too short block data
    pub fn invalid_parameter() -> Self {
        Self::new(codes::INVALID_PARAMETER, "Invalid parameter")
    }

    /// Transaction blob could not be parsed
    pub fn deserialization_error() -> Self {
        Self::new(codes::DESERIALIZATION_ERROR, "Transaction decode failed")
    }

    /// Params array/object has the wrong shape
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_PARAMS,
            format!("Invalid params: {}", details.into()),
        )
    }

    /// Internal error
    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(
            codes::INTERNAL_ERROR,
            format!("Internal error: {}", details.into()),
        )
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

impl From<DecodeErrorKind> for RpcError {
    fn from(kind: DecodeErrorKind) -> Self {
        match kind {
            DecodeErrorKind::MalformedEncoding | DecodeErrorKind::TruncatedSubmission => {
                Self::invalid_parameter()
            }
            DecodeErrorKind::SubmissionTooLarge => {
                Self::new(codes::INVALID_PARAMETER, "Invalid parameter: submission too large")
            }
            DecodeErrorKind::TransactionDecodeFailure => Self::deserialization_error(),
        }
    }
}

/// Parsed `submitblock` parameters
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitBlockParams {
    /// Hex-encoded block
    pub hexdata: String,

    /// Hex-encoded transaction list
    #[serde(default)]
    pub txdata: Option<String>,

    /// Work id handed out with the template; accepted and not checked
    #[serde(default)]
    pub workid: Option<String>,
}

/// Optional second positional parameter in object form
#[derive(Debug, Default, Deserialize)]
struct ParametersObject {
    #[serde(default)]
    txdata: Option<String>,
    #[serde(default)]
    workid: Option<String>,
}

impl SubmitBlockParams {
    /// Parse params in any of the accepted shapes:
    ///
    /// - `["hexdata"]`
    /// - `["hexdata", "txdata"]`
    /// - `["hexdata", {"txdata": "...", "workid": "..."}]`
    /// - `{"hexdata": "...", "txdata": "...", "workid": "..."}`
    pub fn from_json(params: &Value) -> Result<Self, RpcError> {
        match params {
            Value::Array(items) => Self::from_positional(items),
            Value::Object(_) => serde_json::from_value(params.clone())
                .map_err(|e| RpcError::invalid_params(e.to_string())),
            _ => Err(RpcError::invalid_params("expected array or object")),
        }
    }

    fn from_positional(items: &[Value]) -> Result<Self, RpcError> {
        if items.is_empty() || items.len() > 2 {
            return Err(RpcError::invalid_params(format!(
                "expected 1 or 2 parameters, got {}",
                items.len()
            )));
        }

        let hexdata = items[0]
            .as_str()
            .ok_or_else(|| RpcError::invalid_params("hexdata must be a string"))?
            .to_string();

        let extra = match items.get(1) {
            None | Some(Value::Null) => ParametersObject::default(),
            Some(Value::String(txdata)) => ParametersObject {
                txdata: Some(txdata.clone()),
                workid: None,
            },
            Some(obj @ Value::Object(_)) => serde_json::from_value(obj.clone())
                .map_err(|e| RpcError::invalid_params(e.to_string()))?,
            Some(_) => {
                return Err(RpcError::invalid_params(
                    "second parameter must be a string or object",
                ))
            }
        };

        Ok(Self {
            hexdata,
            txdata: extra.txdata,
            workid: extra.workid,
        })
    }

    /// Convert into the controller's input
    pub fn into_raw(self) -> RawSubmission {
        RawSubmission {
            hexdata: self.hexdata,
            txdata: self.txdata,
        }
    }
}

/// Map a submission result to the JSON-RPC result or error
pub fn into_rpc_response(result: SubmissionResult) -> Result<Value, RpcError> {
    match result {
        SubmissionResult::Accepted => Ok(Value::Null),
        SubmissionResult::Rejected => Ok(Value::String(REJECTED_TOKEN.to_string())),
        SubmissionResult::DecodeError(kind) => Err(kind.into()),
        SubmissionResult::EngineFailure(reason) => Err(RpcError::internal(reason)),
    }
}

/// Handle one `submitblock` call end to end
pub async fn handle_submit_block(
    api: &dyn BlockSubmissionApi,
    params: &Value,
) -> Result<Value, RpcError> {
    let params = SubmitBlockParams::from_json(params)?;
    if let Some(workid) = params.workid.as_deref() {
        debug!(workid, "submitblock workid ignored");
    }
    let result = api.submit(params.into_raw()).await;
    into_rpc_response(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    #[test]
    fn test_positional_hexdata_only() {
        let params = SubmitBlockParams::from_json(&json!(["00ff"])).unwrap();
        assert_eq!(params.hexdata, "00ff");
        assert_eq!(params.txdata, None);
    }

    #[test]
    fn test_positional_parameters_object() {
        let params =
            SubmitBlockParams::from_json(&json!(["00ff", {"txdata": "00", "workid": "7"}]))
                .unwrap();
        assert_eq!(params.txdata.as_deref(), Some("00"));
        assert_eq!(params.workid.as_deref(), Some("7"));
    }

    #[test]
    fn test_positional_txdata_string_and_null() {
        let params = SubmitBlockParams::from_json(&json!(["00ff", "00"])).unwrap();
        assert_eq!(params.txdata.as_deref(), Some("00"));

        let params = SubmitBlockParams::from_json(&json!(["00ff", null])).unwrap();
        assert_eq!(params.txdata, None);
    }

    #[test]
    fn test_named_params() {
        let params =
            SubmitBlockParams::from_json(&json!({"hexdata": "ab", "txdata": "00"})).unwrap();
        assert_eq!(params.clone().into_raw(), RawSubmission::new("ab").with_txdata("00"));
    }

    #[test]
    fn test_bad_param_shapes() {
        for bad in [
            json!([]),
            json!(["a", "b", "c"]),
            json!([42]),
            json!(["ab", 5]),
            json!({"txdata": "00"}),
            json!("ab"),
        ] {
            let err = SubmitBlockParams::from_json(&bad).unwrap_err();
            assert_eq!(err.code, codes::INVALID_PARAMS, "params: {bad}");
        }
    }

    #[test]
    fn test_response_mapping() {
        assert_eq!(into_rpc_response(SubmissionResult::Accepted), Ok(Value::Null));
        assert_eq!(
            into_rpc_response(SubmissionResult::Rejected),
            Ok(json!("rejected"))
        );
        assert_eq!(
            into_rpc_response(SubmissionResult::DecodeError(
                DecodeErrorKind::TruncatedSubmission
            ))
            .unwrap_err()
            .code,
            codes::INVALID_PARAMETER
        );
        assert_eq!(
            into_rpc_response(SubmissionResult::DecodeError(
                DecodeErrorKind::TransactionDecodeFailure
            ))
            .unwrap_err()
            .code,
            codes::DESERIALIZATION_ERROR
        );
        assert_eq!(
            into_rpc_response(SubmissionResult::EngineFailure("x".into()))
                .unwrap_err()
                .code,
            codes::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_error_object_wire_shape() {
        let err = RpcError::from(DecodeErrorKind::TransactionDecodeFailure);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"code": -22, "message": "Transaction decode failed"})
        );
    }

    struct FixedApi(SubmissionResult);

    #[async_trait]
    impl BlockSubmissionApi for FixedApi {
        async fn submit(&self, _raw: RawSubmission) -> SubmissionResult {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_handle_submit_block() {
        let api = FixedApi(SubmissionResult::Rejected);
        let response = handle_submit_block(&api, &json!(["00"])).await;
        assert_eq!(response, Ok(json!("rejected")));

        let response = handle_submit_block(&api, &json!(7)).await;
        assert_eq!(response.unwrap_err().code, codes::INVALID_PARAMS);
    }
}
