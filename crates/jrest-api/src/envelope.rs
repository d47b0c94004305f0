// Request construction: JSON payload normalization and the XML commit
// envelope.
//
// The templates are a wire-format contract. The management daemon expects
// exactly this tag structure and ordering (lock, load, commit, unlock);
// any deviation produces a device-side syntax error, so the templates are
// kept as literal text and the payload is spliced in verbatim.

use serde_json::{Value, json};

use crate::error::Error;

/// Push-and-commit envelope. `{config}` receives compact JSON text.
const CONFIG_JSON: &str = r#"
<lock-configuration/>
<load-configuration format="json">
    <configuration-json>
        {config}
    </configuration-json>
</load-configuration>
<commit/>
<unlock-configuration/>
"#;

/// Validation-only envelope: commit check without applying anything.
const COMMIT_CHECK: &str = r"
<commit-configuration>
    <check/>
</commit-configuration>
";

/// Endpoint for reads against the management interface.
pub const RPC_GET: &str = "/rpc";
/// Endpoint for configuration pushes.
pub const RPC_POST: &str = "/rpc/";

/// Nest a configuration payload under a top-level `configuration` key.
///
/// Idempotent: a payload already nested under `configuration` is passed
/// through unchanged, so double nesting cannot occur.
fn normalize(config: &Value) -> Result<Value, Error> {
    let Some(map) = config.as_object() else {
        return Err(Error::InvalidPayload {
            reason: "configuration must be a JSON object".into(),
        });
    };

    if map.contains_key("configuration") {
        Ok(config.clone())
    } else {
        Ok(json!({ "configuration": config }))
    }
}

/// Build the full wire-format request body for a configuration push.
///
/// The payload is normalized, serialized as compact JSON (serde_json does
/// not escape forward slashes, which the device firmware requires for
/// path values), and embedded verbatim in the commit envelope. The final
/// envelope is trimmed of leading/trailing whitespace.
pub fn build_config(config: &Value) -> Result<String, Error> {
    let normalized = normalize(config)?;
    let text = serde_json::to_string(&normalized).map_err(|e| Error::InvalidPayload {
        reason: e.to_string(),
    })?;

    tracing::debug!(payload = %text, "built configuration envelope");
    Ok(CONFIG_JSON.replace("{config}", &text).trim().to_owned())
}

/// The commit-check envelope, trimmed for transmission.
pub fn commit_check_body() -> String {
    COMMIT_CHECK.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wraps_bare_payload_under_configuration() {
        let body = build_config(&json!({"system": {"host-name": "r1"}})).expect("valid payload");
        assert!(body.contains(r#"{"configuration":{"system":{"host-name":"r1"}}}"#));
    }

    #[test]
    fn wrapping_is_idempotent() {
        let already = json!({"configuration": {"system": {"host-name": "r1"}}});
        let body = build_config(&already).expect("valid payload");
        assert!(body.contains(r#"{"configuration":{"system":{"host-name":"r1"}}}"#));
        assert!(!body.contains(r#""configuration":{"configuration""#));
    }

    #[test]
    fn envelope_tag_order_is_lock_load_commit_unlock() {
        let body = build_config(&json!({})).expect("valid payload");

        let positions: Vec<usize> = [
            "<lock-configuration/>",
            r#"<load-configuration format="json">"#,
            "<configuration-json>",
            "</configuration-json>",
            "</load-configuration>",
            "<commit/>",
            "<unlock-configuration/>",
        ]
        .iter()
        .map(|tag| body.find(tag).unwrap_or_else(|| panic!("missing tag {tag}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "tags out of order:\n{body}");
    }

    #[test]
    fn envelope_is_trimmed() {
        let body = build_config(&json!({})).expect("valid payload");
        assert_eq!(body, body.trim());
        assert!(body.starts_with("<lock-configuration/>"));
        assert!(body.ends_with("<unlock-configuration/>"));
    }

    #[test]
    fn forward_slashes_stay_unescaped() {
        let body = build_config(&json!({"interfaces": {"ge-0/0/0": {"unit": 0}}}))
            .expect("valid payload");
        assert!(body.contains("ge-0/0/0"));
        assert!(!body.contains(r"ge-0\/0\/0"));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = build_config(&json!(["not", "an", "object"])).expect_err("arrays are invalid");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn commit_check_contains_check_inside_commit_configuration() {
        let body = commit_check_body();
        assert!(body.starts_with("<commit-configuration>"));
        assert!(body.contains("<check/>"));
        assert!(body.ends_with("</commit-configuration>"));
    }
}
