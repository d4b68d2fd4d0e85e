use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Explanation", inline)]
#[serde(default)]
/// Settings for the algorithm explanation service.
pub struct ExplainOptions {
    /// Credential. Takes precedence over `api_key_env`; never written to
    /// the schema.
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable holding the credential.
    #[schemars(title = "API Key Variable")]
    pub api_key_env: String,
    /// Text-generation model name.
    #[schemars(title = "Model")]
    pub model: String,
    /// Base URL of the generation API.
    #[schemars(skip)]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[schemars(title = "Timeout (s)", range(min = 1, max = 120))]
    pub timeout_secs: u64,
}

impl Default for ExplainOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "API_KEY".into(),
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta"
                .into(),
            timeout_secs: 30,
        }
    }
}

impl ExplainOptions {
    /// Resolve the credential: explicit key first, then the environment.
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}
