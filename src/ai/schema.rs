//! Response schemas requested from the generative-text service.
//!
//! Uses the service's OpenAPI-subset vocabulary (`ARRAY`, `OBJECT`, `STRING`).

use serde_json::{Value, json};

fn lesson_item() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "title": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ["video", "texto", "animacao", "audio"] },
            "content": { "type": "STRING" },
            "duration": { "type": "STRING" }
        }
    })
}

/// Array of `{id, title, type, content, duration}`.
pub fn lessons_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": lesson_item()
    })
}

/// Array of `{name, description, structure: [{id, title, lessons: [...]}]}`.
pub fn templates_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "description": { "type": "STRING" },
                "structure": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": { "type": "STRING" },
                            "title": { "type": "STRING" },
                            "lessons": {
                                "type": "ARRAY",
                                "items": lesson_item()
                            }
                        }
                    }
                }
            }
        }
    })
}
