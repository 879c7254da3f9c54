use serde::Serialize;

/// Pretty-printed JSON of `value` for debug logs.
///
/// Returns `None` without serializing anything when DEBUG is disabled for the caller.
pub(crate) fn pretty_json_if_debug<T>(value: &T) -> Option<String>
where
    T: Serialize,
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return None;
    }

    Some(
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>")),
    )
}
