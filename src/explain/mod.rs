//! Natural-language explanation and reference code per algorithm.
//!
//! The [`ExplanationService`] sits in front of an external text-generation
//! backend. It memoizes one [`Explanation`] per algorithm for its lifetime,
//! answers with a fixed placeholder when no credential is configured (no
//! backend call is made), and turns any backend failure into an error
//! placeholder. Nothing here can fail the caller or touch the sort engine.

#[cfg(feature = "net")]
mod gemini;

#[cfg(feature = "net")]
pub use gemini::GeminiBackend;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::error::SortlabError;
use crate::options::ExplainOptions;

/// Description, complexity and reference source for one algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    /// Algorithm name as reported by the service.
    pub name: String,
    /// Conceptual description.
    pub description: String,
    /// Time complexity in Big-O notation.
    pub time_complexity: String,
    /// Space complexity in Big-O notation.
    pub space_complexity: String,
    /// Reference implementation source.
    #[serde(alias = "javaCode")]
    pub reference_code: String,
}

impl Explanation {
    /// Returned when no credential is configured. `api_key_env` names the
    /// environment variable the user is told to set.
    pub fn missing_credential(algorithm: Algorithm, api_key_env: &str) -> Self {
        Self {
            name: algorithm.label().to_owned(),
            description: format!(
                "未检测到 API 密钥。请在环境变量中配置 {api_key_env} 以获取 AI 生成的动态详解。"
            ),
            time_complexity: "未知".to_owned(),
            space_complexity: "未知".to_owned(),
            reference_code: "// 请配置您的 API Key 以获取 Java 代码。".to_owned(),
        }
    }

    /// Returned when the backend request or its payload fails.
    pub fn unavailable(algorithm: Algorithm) -> Self {
        Self {
            name: algorithm.label().to_owned(),
            description: "获取 AI 详情失败，请重试。".to_owned(),
            time_complexity: "N/A".to_owned(),
            space_complexity: "N/A".to_owned(),
            reference_code: "// 获取代码时发生错误。".to_owned(),
        }
    }

    /// Parse the JSON object a backend returns.
    ///
    /// # Errors
    ///
    /// Returns [`SortlabError::Explanation`] if the text is not an object
    /// with all five fields.
    pub fn from_json(text: &str) -> Result<Self, SortlabError> {
        serde_json::from_str(text)
            .map_err(|e| SortlabError::Explanation(format!("bad payload: {e}")))
    }
}

/// One request handed to a backend.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationRequest<'a> {
    /// Algorithm being explained.
    pub algorithm: Algorithm,
    /// Rendered prompt, see [`build_prompt`].
    pub prompt: &'a str,
    /// Resolved credential.
    pub api_key: &'a str,
}

/// A text-generation service able to produce an [`Explanation`].
pub trait ExplanationBackend {
    /// Perform one request.
    ///
    /// # Errors
    ///
    /// Any transport, status or payload failure.
    fn fetch(
        &self,
        request: &ExplanationRequest<'_>,
    ) -> Result<Explanation, SortlabError>;
}

/// Prompt asking for a structured explanation with a Java reference
/// implementation, answered in simplified Chinese.
pub fn build_prompt(algorithm: Algorithm) -> String {
    format!(
        "请为算法 \"{}\" 提供详细的分析和标准的 Java 实现。\n\
         请以简体中文回复。\n\
         回复格式必须是结构化的 JSON。\n\
         Java 代码应该是干净、注释良好且符合标准的。\n\
         描述部分应简要解释其概念上的工作原理。\n\
         时间和空间复杂度应使用大 O 符号表示。",
        algorithm.label()
    )
}

/// Memoizing front end for an [`ExplanationBackend`].
pub struct ExplanationService<B> {
    backend: B,
    api_key: Option<String>,
    api_key_env: String,
    cache: FxHashMap<Algorithm, Explanation>,
}

impl<B: ExplanationBackend> ExplanationService<B> {
    /// Service using the credential resolved from `options`.
    pub fn new(backend: B, options: &ExplainOptions) -> Self {
        Self {
            backend,
            api_key: options.resolve_api_key(),
            api_key_env: options.api_key_env.clone(),
            cache: FxHashMap::default(),
        }
    }

    /// Service with an explicit credential (or none). The missing-credential
    /// placeholder names the default variable.
    pub fn with_api_key(backend: B, api_key: Option<String>) -> Self {
        Self {
            backend,
            api_key,
            api_key_env: ExplainOptions::default().api_key_env,
            cache: FxHashMap::default(),
        }
    }

    /// Whether a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Previously fetched explanation, if any.
    pub fn cached(&self, algorithm: Algorithm) -> Option<&Explanation> {
        self.cache.get(&algorithm)
    }

    /// Explanation for `algorithm`.
    ///
    /// Cached results are returned without a backend call. Placeholders are
    /// never cached, so a failed request is retried next time.
    pub fn explain(&mut self, algorithm: Algorithm) -> Explanation {
        if let Some(hit) = self.cache.get(&algorithm) {
            return hit.clone();
        }

        let Some(api_key) = self.api_key.as_deref() else {
            log::debug!("no explanation credential; using placeholder");
            return Explanation::missing_credential(algorithm, &self.api_key_env);
        };

        let prompt = build_prompt(algorithm);
        let request = ExplanationRequest {
            algorithm,
            prompt: &prompt,
            api_key,
        };
        match self.backend.fetch(&request) {
            Ok(explanation) => {
                log::info!("Fetched explanation for {algorithm}");
                drop(self.cache.insert(algorithm, explanation.clone()));
                explanation
            }
            Err(e) => {
                log::error!("Failed to fetch explanation for {algorithm}: {e}");
                Explanation::unavailable(algorithm)
            }
        }
    }
}

impl<B> std::fmt::Debug for ExplanationService<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplanationService")
            .field("has_credential", &self.api_key.is_some())
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Backend that counts calls and answers from a canned result.
    struct Canned {
        calls: Cell<usize>,
        fail: bool,
    }

    impl Canned {
        fn ok() -> Self {
            Self {
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                fail: true,
            }
        }
    }

    impl ExplanationBackend for Canned {
        fn fetch(
            &self,
            request: &ExplanationRequest<'_>,
        ) -> Result<Explanation, SortlabError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(SortlabError::Explanation("offline".into()));
            }
            assert!(request.prompt.contains(request.algorithm.label()));
            Ok(Explanation {
                name: request.algorithm.name().to_owned(),
                description: "desc".into(),
                time_complexity: "O(n^2)".into(),
                space_complexity: "O(1)".into(),
                reference_code: "class Sort {}".into(),
            })
        }
    }

    #[test]
    fn no_credential_returns_placeholder_without_fetching() {
        let mut service = ExplanationService::with_api_key(Canned::ok(), None);
        let info = service.explain(Algorithm::Merge);
        assert_eq!(
            info,
            Explanation::missing_credential(Algorithm::Merge, "API_KEY")
        );
        assert_eq!(service.backend.calls.get(), 0);
        assert!(service.cached(Algorithm::Merge).is_none());
    }

    #[test]
    fn second_request_hits_the_cache() {
        let mut service =
            ExplanationService::with_api_key(Canned::ok(), Some("key".into()));
        let first = service.explain(Algorithm::Quick);
        let second = service.explain(Algorithm::Quick);
        assert_eq!(first, second);
        assert_eq!(first.name, "Quick Sort");
        assert_eq!(service.backend.calls.get(), 1);

        let _ = service.explain(Algorithm::Heap);
        assert_eq!(service.backend.calls.get(), 2);
    }

    #[test]
    fn failures_yield_placeholder_and_are_retried() {
        let mut service = ExplanationService::with_api_key(
            Canned::failing(),
            Some("key".into()),
        );
        let info = service.explain(Algorithm::Bubble);
        assert_eq!(info, Explanation::unavailable(Algorithm::Bubble));
        let _ = service.explain(Algorithm::Bubble);
        assert_eq!(service.backend.calls.get(), 2);
        assert!(service.cached(Algorithm::Bubble).is_none());
    }

    #[test]
    fn credential_resolved_from_options() {
        let options = ExplainOptions {
            api_key: Some("secret".into()),
            ..ExplainOptions::default()
        };
        let service = ExplanationService::new(Canned::ok(), &options);
        assert!(service.has_credential());
    }

    #[test]
    fn placeholder_names_configured_variable() {
        let options = ExplainOptions {
            api_key_env: "SORTLAB_TEST_UNSET_EXPLAIN_KEY".into(),
            ..ExplainOptions::default()
        };
        let mut service = ExplanationService::new(Canned::ok(), &options);
        assert!(!service.has_credential());
        let info = service.explain(Algorithm::Insertion);
        assert!(info.description.contains("SORTLAB_TEST_UNSET_EXPLAIN_KEY"));
        assert!(!info.description.contains(" API_KEY "));
        assert_eq!(service.backend.calls.get(), 0);
    }

    #[test]
    fn payload_accepts_java_code_alias() {
        let json = r#"{
            "name": "冒泡排序",
            "description": "相邻交换",
            "timeComplexity": "O(n^2)",
            "spaceComplexity": "O(1)",
            "javaCode": "public class BubbleSort {}"
        }"#;
        let info = Explanation::from_json(json).unwrap();
        assert_eq!(info.reference_code, "public class BubbleSort {}");
        assert_eq!(info.time_complexity, "O(n^2)");
    }

    #[test]
    fn payload_missing_fields_is_an_error() {
        let json = r#"{"name": "x", "description": "y"}"#;
        assert!(matches!(
            Explanation::from_json(json),
            Err(SortlabError::Explanation(_))
        ));
    }

    #[test]
    fn prompt_names_the_algorithm() {
        let prompt = build_prompt(Algorithm::Selection);
        assert!(prompt.contains("选择排序 (Selection Sort)"));
        assert!(prompt.contains("JSON"));
    }
}
