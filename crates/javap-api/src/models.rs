//! Request and error payloads exchanged over HTTP.
//!
//! Paste responses serialize [`javap_core::PasteView`] directly.

use javap_core::ProcessingInput;
use serde::{Deserialize, Serialize};

/// RFC 9457 problem document returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short, stable summary of the problem type.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Occurrence-specific explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Body of `POST /api/paste`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePasteRequest {
    /// Source and toolchain to process.
    pub input: ProcessingInput,
}

/// Body of `PUT /api/paste/{id}`.
///
/// Omitting `input` leaves the paste untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatePasteRequest {
    /// Replacement source and toolchain.
    #[serde(default)]
    pub input: Option<ProcessingInput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_input_is_optional() -> anyhow::Result<()> {
        let empty: UpdatePasteRequest = serde_json::from_value(json!({}))?;
        assert_eq!(empty, UpdatePasteRequest::default());

        let full: UpdatePasteRequest = serde_json::from_value(json!({
            "input": {"code": "class A {}", "compilerName": "ECJ"}
        }))?;
        assert_eq!(full.input, Some(ProcessingInput::new("class A {}", "ECJ")));
        Ok(())
    }

    #[test]
    fn problem_details_omit_missing_detail() -> anyhow::Result<()> {
        let problem = ProblemDetails {
            kind: "about:blank".to_string(),
            title: "bad request".to_string(),
            status: 400,
            detail: None,
        };
        assert_eq!(
            serde_json::to_value(&problem)?,
            json!({"type": "about:blank", "title": "bad request", "status": 400})
        );
        Ok(())
    }
}
