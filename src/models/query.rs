use serde::Deserialize;

/// Inbound body of the generate-sql function.
///
/// Fields are optional at the parse level so that absence is reported as a
/// validation failure rather than a JSON error.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub user_query: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// A request that passed validation: both prompts are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuery {
    pub user_query: String,
    pub system_prompt: String,
}

impl QueryRequest {
    /// Parse a raw body. Anything that is not a JSON object with string fields
    /// yields an empty request, which then fails validation.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn validate(self) -> Result<ValidQuery, Vec<String>> {
        let mut issues = Vec::new();
        if is_empty(&self.user_query) { issues.push("userQuery".into()); }
        if is_empty(&self.system_prompt) { issues.push("systemPrompt".into()); }
        match (self.user_query, self.system_prompt) {
            (Some(user_query), Some(system_prompt)) if issues.is_empty() => Ok(ValidQuery {
                user_query,
                system_prompt,
            }),
            _ => Err(issues),
        }
    }
}

fn is_empty(v: &Option<String>) -> bool {
    v.as_deref().map_or(true, str::is_empty)
}
