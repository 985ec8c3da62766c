//! Response-shape declarations sent with the structured requests.
//!
//! These describe what the model is asked to produce. The decoders in
//! `mediation::decode` enforce the same shape independently on the way back.

use serde_json::{json, Value};

use crate::llm_client::ResponseShape;

fn video_idea_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING", "description": "Catchy video title"},
            "hook": {"type": "STRING", "description": "The opening hook concept"},
            "viralScore": {
                "type": "INTEGER",
                "description": "Predicted viral potential 1-100",
                "minimum": 1,
                "maximum": 100
            },
            "targetAudience": {"type": "STRING", "description": "Who this video is for"}
        },
        "required": ["title", "hook", "viralScore", "targetAudience"],
        "propertyOrdering": ["title", "hook", "viralScore", "targetAudience"]
    })
}

/// Array of `VideoIdea` objects.
pub fn idea_list_shape() -> ResponseShape {
    ResponseShape::new(json!({
        "type": "ARRAY",
        "items": video_idea_schema()
    }))
}

pub fn full_script_shape() -> ResponseShape {
    ResponseShape::new(json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING"},
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "heading": {"type": "STRING"},
                        "content": {"type": "STRING"},
                        "duration": {"type": "STRING", "description": "Timestamp range, e.g. 0:00-0:30"}
                    },
                    "required": ["heading", "content", "duration"],
                    "propertyOrdering": ["heading", "content", "duration"]
                }
            }
        },
        "required": ["title", "sections"],
        "propertyOrdering": ["title", "sections"]
    }))
}

pub fn video_metadata_shape() -> ResponseShape {
    ResponseShape::new(json!({
        "type": "OBJECT",
        "properties": {
            "titles": {"type": "ARRAY", "items": {"type": "STRING"}},
            "description": {"type": "STRING"},
            "tags": {"type": "ARRAY", "items": {"type": "STRING"}},
            "thumbnailPrompt": {"type": "STRING"}
        },
        "required": ["titles", "description", "tags", "thumbnailPrompt"],
        "propertyOrdering": ["titles", "description", "tags", "thumbnailPrompt"]
    }))
}
