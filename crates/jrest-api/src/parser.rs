// Response classification: raw XML body + HTTP status -> Outcome.
//
// The device does not always return a single well-formed root element,
// so the body is wrapped in a synthetic <results> root before parsing.
// Classification follows the device's commit semantics: an error record
// anywhere in the reply wins, then an explicit commit-success, then the
// empty-body success case, then raw HTTP failures.

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::xml::{self, XmlValue};

/// Placeholder message when the device reports an error structure the
/// parser cannot pick apart.
const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Normalized result of one device interaction.
///
/// Serializes with a `status` tag of `success`, `fail`, or `error`:
/// `fail` is a device-reported configuration error, `error` is anything
/// that never produced a usable device reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success { data: Option<Value> },
    Fail { data: Value, detail: Vec<Value> },
    Error { message: String },
}

impl Outcome {
    /// Returns `true` only for the `success` status.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Parse a raw response body into an [`Outcome`].
pub fn parse(body: &str, status: u16) -> Result<Outcome, Error> {
    let wrapped = format!("<results>{body}</results>");

    let tree = match xml::parse_document(&wrapped) {
        Ok(tree) => xml::flatten(tree),
        // Some firmware error pages are plain text that is not even
        // well-formed inside the synthetic root; for HTTP failures the
        // raw text is the message.
        Err(_) if (400..600).contains(&status) => {
            return Ok(Outcome::Error {
                message: body.to_owned(),
            });
        }
        Err(e) => return Err(e),
    };

    let results = tree.get("results").unwrap_or(&XmlValue::Null);

    if let Some(error) = results
        .get("error")
        .or_else(|| results.get("commit-results").and_then(|c| c.get("error")))
    {
        return Ok(classify_failure(error));
    }

    if status == 200 && has_commit_success(results) {
        return Ok(Outcome::Success { data: None });
    }

    if body.is_empty() {
        return Ok(Outcome::Success { data: None });
    }

    if (400..600).contains(&status) {
        return Ok(Outcome::Error {
            message: body.to_owned(),
        });
    }

    // Nothing matched. The original design left this case undefined;
    // classify conservatively as a generic error.
    let snippet: String = body.chars().take(200).collect();
    Ok(Outcome::Error {
        message: format!("unrecognized response from device (HTTP {status}): {snippet}"),
    })
}

/// True when `commit-results.routing-engine.commit-success` is present,
/// even if empty. Dual routing-engine chassis report a list.
fn has_commit_success(results: &XmlValue) -> bool {
    let Some(engines) = results
        .get("commit-results")
        .and_then(|c| c.get("routing-engine"))
    else {
        return false;
    };

    match engines {
        XmlValue::List(items) => items.iter().any(|re| re.get("commit-success").is_some()),
        single => single.get("commit-success").is_some(),
    }
}

/// Build a `fail` outcome from a device error structure.
///
/// The error is one record or a list of records. `data` is the first
/// message text found; `detail` carries each record's non-message fields
/// under their flattened keys. A structure with no extractable message
/// degrades to a fixed unknown-error outcome.
fn classify_failure(error: &XmlValue) -> Outcome {
    let records: Vec<_> = match error {
        XmlValue::Map(_) => vec![error],
        XmlValue::List(items) => items.iter().filter(|i| i.as_map().is_some()).collect(),
        _ => Vec::new(),
    };

    let message = records
        .iter()
        .find_map(|r| r.get("message").and_then(XmlValue::as_text));

    let Some(message) = message else {
        return Outcome::Fail {
            data: Value::String(UNKNOWN_ERROR.to_owned()),
            detail: Vec::new(),
        };
    };

    let detail: Vec<Value> = records
        .iter()
        .filter_map(|r| r.as_map())
        .map(|map| {
            Value::Object(
                map.iter()
                    .filter(|(k, _)| *k != "message")
                    .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                    .collect(),
            )
        })
        .filter(|fields| fields.as_object().is_some_and(|o| !o.is_empty()))
        .collect();

    Outcome::Fail {
        data: Value::String(message.to_owned()),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const COMMIT_OK: &str = r#"<commit-results xmlns:junos="http://xml.juniper.net/junos/15.1X49/junos">
        <routing-engine junos:style="normal">
            <name>re0</name>
            <commit-success/>
        </routing-engine>
    </commit-results>"#;

    const SYNTAX_ERROR: &str = r#"<xnm:error xmlns="http://xml.juniper.net/xnm/1.1/xnm" xmlns:xnm="http://xml.juniper.net/xnm/1.1/xnm" xmlns:junos="http://xml.juniper.net/junos/15.1X49/junos">
        <xnm:line-number>7</xnm:line-number>
        <xnm:column>12</xnm:column>
        <xnm:statement>host-nam</xnm:statement>
        <xnm:message>syntax error</xnm:message>
    </xnm:error>"#;

    #[test]
    fn commit_success_parses_to_success() {
        let outcome = parse(COMMIT_OK, 200).expect("parseable");
        assert_eq!(outcome, Outcome::Success { data: None });
        assert!(outcome.is_success());
    }

    #[test]
    fn commit_success_requires_http_200() {
        // Same body on a non-200 status falls through to the generic
        // error branch.
        let outcome = parse(COMMIT_OK, 500).expect("parseable");
        assert!(matches!(outcome, Outcome::Error { .. }));
    }

    #[test]
    fn namespaced_error_parses_to_fail_with_detail() {
        let outcome = parse(SYNTAX_ERROR, 200).expect("parseable");
        let Outcome::Fail { data, detail } = outcome else {
            panic!("expected fail, got {outcome:?}");
        };

        assert_eq!(data, json!("syntax error"));
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0]["line-number"], json!("7"));
        assert_eq!(detail[0]["column"], json!("12"));
        assert_eq!(detail[0]["statement"], json!("host-nam"));
        assert!(detail[0].get("message").is_none());
    }

    #[test]
    fn error_nested_under_commit_results_is_a_fail() {
        let body = format!(
            r"<commit-results>{record}</commit-results>",
            record = SYNTAX_ERROR
        );
        let outcome = parse(&body, 200).expect("parseable");
        assert!(matches!(outcome, Outcome::Fail { .. }));
    }

    #[test]
    fn error_list_takes_first_message_and_all_details() {
        let body = r#"<xnm:error xmlns:xnm="http://xml.juniper.net/xnm/1.1/xnm" xmlns:junos="http://xml.juniper.net/junos/15.1X49/junos" junos:style="edit-path">
            <xnm:edit-path>[edit interfaces]</xnm:edit-path>
        </xnm:error>
        <xnm:error xmlns:xnm="http://xml.juniper.net/xnm/1.1/xnm">
            <xnm:message>statement not allowed</xnm:message>
        </xnm:error>"#;

        let outcome = parse(body, 200).expect("parseable");
        let Outcome::Fail { data, detail } = outcome else {
            panic!("expected fail");
        };
        assert_eq!(data, json!("statement not allowed"));
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0]["style"], json!("edit-path"));
        assert_eq!(detail[0]["edit-path"], json!("[edit interfaces]"));
    }

    #[test]
    fn malformed_error_structure_degrades_to_unknown() {
        let body = r#"<xnm:error xmlns:xnm="http://xml.juniper.net/xnm/1.1/xnm">unstructured</xnm:error>"#;
        let outcome = parse(body, 200).expect("parseable");
        assert_eq!(
            outcome,
            Outcome::Fail {
                data: json!(UNKNOWN_ERROR),
                detail: vec![],
            }
        );
    }

    #[test]
    fn empty_body_is_success_regardless_of_status() {
        for status in [200, 204, 201] {
            assert_eq!(
                parse("", status).expect("parseable"),
                Outcome::Success { data: None },
                "status {status}"
            );
        }
    }

    #[test]
    fn http_500_with_text_body_is_an_error_outcome() {
        let outcome = parse("Internal Server Error", 500).expect("parseable");
        assert_eq!(
            outcome,
            Outcome::Error {
                message: "Internal Server Error".into()
            }
        );
    }

    #[test]
    fn unrecognized_shape_is_a_generic_error() {
        let outcome = parse("<ok/>", 200).expect("parseable");
        let Outcome::Error { message } = outcome else {
            panic!("expected generic error");
        };
        assert!(message.contains("unrecognized response"));
        assert!(message.contains("200"));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let success = serde_json::to_value(Outcome::Success { data: None }).expect("serializes");
        assert_eq!(success, json!({"status": "success", "data": null}));

        let fail = serde_json::to_value(Outcome::Fail {
            data: json!("syntax error"),
            detail: vec![],
        })
        .expect("serializes");
        assert_eq!(
            fail,
            json!({"status": "fail", "data": "syntax error", "detail": []})
        );

        let error = serde_json::to_value(Outcome::Error {
            message: "Internal Server Error".into(),
        })
        .expect("serializes");
        assert_eq!(
            error,
            json!({"status": "error", "message": "Internal Server Error"})
        );
    }
}
