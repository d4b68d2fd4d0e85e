//! `generateContent` backend over HTTP.

use serde::Deserialize;
use serde_json::json;
use web_time::Duration;

use super::{Explanation, ExplanationBackend, ExplanationRequest};
use crate::error::SortlabError;
use crate::options::ExplainOptions;

/// Blocking client for a Gemini-style `generateContent` endpoint that is
/// asked to answer with a JSON object matching [`Explanation`].
pub struct GeminiBackend {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
}

impl GeminiBackend {
    /// Backend configured from `options` (endpoint, model, timeout).
    pub fn new(options: &ExplainOptions) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(options.timeout_secs.max(1))))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            endpoint: options.endpoint.trim_end_matches('/').to_owned(),
            model: options.model.clone(),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ExplanationBackend for GeminiBackend {
    fn fetch(
        &self,
        request: &ExplanationRequest<'_>,
    ) -> Result<Explanation, SortlabError> {
        let payload = request_body(request.prompt).to_string();
        log::debug!("Requesting explanation for {} from {}", request.algorithm, self.model);

        let body = self
            .agent
            .post(&self.url())
            .header("content-type", "application/json")
            .header("x-goog-api-key", request.api_key)
            .send(payload)
            .map_err(|e| SortlabError::Explanation(format!("request failed: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| {
                SortlabError::Explanation(format!("failed to read response: {e}"))
            })?;

        parse_response(&body)
    }
}

/// Request body with a response schema requiring all five fields.
fn request_body(prompt: &str) -> serde_json::Value {
    let field = |description: &str| json!({ "type": "STRING", "description": description });
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "name": field("算法名称 (中文)"),
                    "description": field("算法原理描述 (中文)"),
                    "timeComplexity": field("时间复杂度"),
                    "spaceComplexity": field("空间复杂度"),
                    "referenceCode": field("完整的 Java 实现代码"),
                },
                "required": [
                    "name",
                    "description",
                    "timeComplexity",
                    "spaceComplexity",
                    "referenceCode",
                ],
            },
        },
    })
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Extract the first candidate's text and parse it as an [`Explanation`].
fn parse_response(body: &str) -> Result<Explanation, SortlabError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| SortlabError::Explanation(format!("bad response: {e}")))?;
    let text = response
        .candidates
        .into_iter()
        .flat_map(|c| c.content.parts)
        .find_map(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| SortlabError::Explanation("no response text".into()))?;
    Explanation::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_endpoint_and_model() {
        let backend = GeminiBackend::new(&ExplainOptions {
            endpoint: "https://example.test/v1beta/".into(),
            model: "m-1".into(),
            ..ExplainOptions::default()
        });
        assert_eq!(
            backend.url(),
            "https://example.test/v1beta/models/m-1:generateContent"
        );
    }

    #[test]
    fn body_requests_json_with_all_fields() {
        let body = request_body("hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(
            config["responseSchema"]["required"].as_array().unwrap().len(),
            5
        );
    }

    #[test]
    fn parses_first_candidate_text() {
        let inner = r#"{"name":"堆排序","description":"d","timeComplexity":"O(n log n)","spaceComplexity":"O(1)","referenceCode":"class H {}"}"#;
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": inner }] } }]
        })
        .to_string();
        let info = parse_response(&body).unwrap();
        assert_eq!(info.name, "堆排序");
        assert_eq!(info.reference_code, "class H {}");
    }

    #[test]
    fn empty_response_is_an_error() {
        assert!(parse_response(r#"{"candidates": []}"#).is_err());
        assert!(parse_response("not json").is_err());
    }
}
