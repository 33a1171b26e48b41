//! Structured output schema sent with every generation request.
//!
//! Uses the OpenAPI subset accepted by `generationConfig.responseSchema`.

use super::CANDIDATES_PER_CYCLE;
use serde_json::{Value, json};

/// Fields every candidate must carry; `storyFrames` is optional.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "id",
    "topic",
    "postText",
    "carousel",
    "reelScript",
    "caption",
    "hashtags",
    "score",
];

const PROPERTY_ORDERING: [&str; 9] = [
    "id",
    "topic",
    "postText",
    "carousel",
    "reelScript",
    "storyFrames",
    "caption",
    "hashtags",
    "score",
];

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

pub fn content_set_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "topic": { "type": "STRING" },
            "postText": { "type": "STRING" },
            "carousel": string_array(),
            "reelScript": {
                "type": "OBJECT",
                "properties": {
                    "scenes": {
                        "type": "ARRAY",
                        "minItems": 1,
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "instruction": { "type": "STRING" },
                                "text": { "type": "STRING" }
                            },
                            "required": ["instruction", "text"]
                        }
                    },
                    "narration": { "type": "STRING" }
                },
                "required": ["scenes", "narration"]
            },
            "storyFrames": string_array(),
            "caption": { "type": "STRING" },
            "hashtags": string_array(),
            "score": {
                "type": "NUMBER",
                "description": "Predictive engagement score 0-100",
                "minimum": 0,
                "maximum": 100
            }
        },
        "required": REQUIRED_FIELDS,
        "propertyOrdering": PROPERTY_ORDERING
    })
}

/// Array of exactly [`CANDIDATES_PER_CYCLE`] content sets.
pub fn content_batch_schema() -> Value {
    json!({
        "type": "ARRAY",
        "minItems": CANDIDATES_PER_CYCLE,
        "maxItems": CANDIDATES_PER_CYCLE,
        "items": content_set_schema()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_schema_pins_cardinality() {
        let schema = content_batch_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["minItems"], 10);
        assert_eq!(schema["maxItems"], 10);
    }

    #[test]
    fn item_schema_requires_contract_fields() {
        let schema = content_set_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, REQUIRED_FIELDS);
        assert!(!required.contains(&"storyFrames"));
    }

    #[test]
    fn every_property_is_ordered() {
        let schema = content_set_schema();
        let properties = schema["properties"].as_object().unwrap();
        let ordering = schema["propertyOrdering"].as_array().unwrap();
        assert_eq!(properties.len(), ordering.len());
        for name in ordering {
            assert!(properties.contains_key(name.as_str().unwrap()));
        }
    }

    #[test]
    fn reel_script_needs_a_scene() {
        let schema = content_set_schema();
        assert_eq!(schema["properties"]["reelScript"]["properties"]["scenes"]["minItems"], 1);
    }
}
