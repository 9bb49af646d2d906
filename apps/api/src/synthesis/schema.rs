//! JSON Schema of `StructuredProfile`, sent with every generation request.
//!
//! Must stay in sync with `models::profile`; the test below checks that the
//! required keys here are exactly the ones serde requires.

use serde_json::{json, Value};

use crate::models::profile::SkillCategory;

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

pub fn profile_json_schema() -> Value {
    let skill_properties: serde_json::Map<String, Value> = SkillCategory::ALL
        .iter()
        .map(|category| (category.key().to_string(), string_array()))
        .collect();
    let skill_keys: Vec<&str> = SkillCategory::ALL.iter().map(|c| c.key()).collect();

    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["personalInfo", "summary", "experience", "skills", "education", "languages"],
        "properties": {
            "personalInfo": {
                "type": "object",
                "required": ["name", "title"],
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "title": { "type": "string", "minLength": 1 },
                    "location": { "type": "string" },
                    "phone": { "type": "string" },
                    "email": { "type": "string" },
                    "linkedin": { "type": "string" },
                    "github": { "type": "string" }
                }
            },
            "summary": { "type": "string", "minLength": 1 },
            "experience": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["title", "company", "duration", "achievements", "technologies"],
                    "properties": {
                        "title": { "type": "string", "minLength": 1 },
                        "company": { "type": "string", "minLength": 1 },
                        "duration": { "type": "string", "minLength": 1 },
                        "location": { "type": "string" },
                        "achievements": string_array(),
                        "technologies": string_array()
                    }
                }
            },
            "skills": {
                "type": "object",
                "required": skill_keys,
                "properties": skill_properties
            },
            "education": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["degree", "school", "duration"],
                    "properties": {
                        "degree": { "type": "string", "minLength": 1 },
                        "school": { "type": "string", "minLength": 1 },
                        "duration": { "type": "string", "minLength": 1 },
                        "description": { "type": "string" }
                    }
                }
            },
            "languages": string_array()
        }
    })
}
