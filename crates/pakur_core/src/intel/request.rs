use serde::Serialize;
use serde_json::{json, Value};

use crate::model::GeoPoint;

/// Body of a `models/{model}:generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    /// Maps grounding; serializes as `{"googleMaps": {}}`.
    GoogleMaps {},
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLngBias,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLngBias {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerateContentRequest {
    fn prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
            tools: Vec::new(),
            tool_config: None,
            generation_config: None,
        }
    }

    /// Free-text prompt answered with the maps-grounding tool, biased to `bias`.
    pub fn grounded(prompt: String, bias: GeoPoint) -> Self {
        Self {
            tools: vec![Tool::GoogleMaps {}],
            tool_config: Some(ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLngBias {
                        latitude: bias.lat,
                        longitude: bias.lng,
                    },
                },
            }),
            ..Self::prompt(prompt)
        }
    }

    /// Prompt whose answer must be JSON matching `schema`.
    pub fn structured(prompt: String, schema: Value) -> Self {
        Self {
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
            ..Self::prompt(prompt)
        }
    }

    pub fn prompt_text(&self) -> &str {
        self.contents
            .first()
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
            .unwrap_or_default()
    }
}

pub(super) fn route_info_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "distanceKm": { "type": "NUMBER" },
            "estimatedTimeMins": { "type": "NUMBER" },
            "trafficStatus": { "type": "STRING" },
            "feasibility": { "type": "STRING", "enum": ["High", "Medium", "Low"] },
            "notes": { "type": "STRING" }
        },
        "required": ["distanceKm", "estimatedTimeMins", "trafficStatus", "feasibility", "notes"]
    })
}

pub(super) fn zone_suggestions_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "zoneName": { "type": "STRING" },
                "rationale": { "type": "STRING" },
                "radiusKm": { "type": "NUMBER" }
            },
            "required": ["zoneName", "rationale", "radiusKm"]
        }
    })
}
