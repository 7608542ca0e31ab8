//! Shared response helpers.

use serde_json::Value;

use crate::github::error::ApiError;

/// Pulls the `message` member out of a GitHub error body.
pub(crate) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// Splits a GraphQL response into its `data` member or a query error.
///
/// Any entry in `errors` wins over partial data; the messages are joined
/// with `; `.
pub(super) fn graphql_data(mut body: Value) -> Result<Value, ApiError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array)
        && !errors.is_empty()
    {
        let message = errors
            .iter()
            .map(|error| {
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
            })
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::Query { message });
    }

    match body.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(ApiError::Api {
            message: "GraphQL response carried no data".to_owned(),
        }),
    }
}
