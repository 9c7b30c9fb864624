//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Only the subset this function sends or reads is modelled; unknown response
//! fields are ignored.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// User query as the primary content, system prompt on the instruction channel,
    /// output constrained to the metric query schema.
    pub fn metric_query(user_query: &str, system_prompt: &str) -> Self {
        Self {
            contents: vec![Content::text(user_query)],
            system_instruction: Content::text(system_prompt),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: metric_query_schema(),
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(text: &str) -> Self {
        Self { parts: vec![Part { text: Some(text.to_owned()) }] }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Schema,
}

/// OpenAPI-subset schema as understood by `responseSchema`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered so the serialised schema is stable.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "ser_properties")]
    pub properties: Vec<(String, Schema)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    String,
}

impl Schema {
    fn string(description: &str) -> Self {
        Self {
            kind: SchemaType::String,
            description: Some(description.to_owned()),
            properties: Vec::new(),
            required: Vec::new(),
        }
    }
}

fn ser_properties<S>(props: &[(String, Schema)], ser: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;
    let mut map = ser.serialize_map(Some(props.len()))?;
    for (name, schema) in props {
        map.serialize_entry(name, schema)?;
    }
    map.end()
}

const METRIC_QUERY_FIELDS: [(&str, &str); 5] = [
    ("metricId", "The 'id' of the single best matching metric from the registry. Use 'none' if no match."),
    ("startDate", "The start date in YYYY-MM-DD format. Infer from user's query. Use 'NOT_SPECIFIED' if not found."),
    ("endDate", "The end date in YYYY-MM-DD format. Infer from user's query. Use 'NOT_SPECIFIED' if not found."),
    ("product", "The product (e.g., 'GoRide', 'GoCar'). Use 'All' if not specified."),
    ("region", "The region or city (e.g., 'Jakarta'). Use 'All' if not specified."),
];

/// Response schema for a metric query: five string fields, every one required.
pub fn metric_query_schema() -> Schema {
    Schema {
        kind: SchemaType::Object,
        description: None,
        properties: METRIC_QUERY_FIELDS
            .iter()
            .map(|(name, desc)| ((*name).to_owned(), Schema::string(desc)))
            .collect(),
        required: METRIC_QUERY_FIELDS.iter().map(|(name, _)| (*name).to_owned()).collect(),
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if it is non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Error envelope returned with non-2xx statuses: `{ "error": { "message": ... } }`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_ref()?
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
    }
}
