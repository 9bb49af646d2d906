//! Shared fixtures for unit tests: a canned profile and a scripted generator
//! that stands in for the Anthropic client.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::llm_client::{GenerationRequest, LlmError, StructuredGenerator};
use crate::models::profile::StructuredProfile;

pub fn sample_profile_json() -> Value {
    json!({
        "personalInfo": {
            "name": "John Doe",
            "title": "Senior Backend Engineer",
            "location": "Berlin, Germany",
            "phone": "+49 30 1234567",
            "email": "john.doe@example.com",
            "linkedin": "linkedin.com/in/johndoe",
            "github": "https://github.com/johndoe"
        },
        "summary": "Backend engineer with four years of experience building payment services in Rust and Go.",
        "experience": [
            {
                "title": "Software Engineer",
                "company": "Acme Corp",
                "duration": "2019–2023",
                "location": "Remote",
                "achievements": [
                    "Rebuilt the settlement pipeline in Rust",
                    "Cut p99 latency of the ledger API from 800ms to 120ms"
                ],
                "technologies": ["Rust", "PostgreSQL", "Kafka"]
            }
        ],
        "skills": {
            "backend": ["Rust", "Go"],
            "frontend": ["TypeScript"],
            "databases": ["PostgreSQL", "Redis"],
            "cloud": ["AWS"],
            "testing": ["cargo test"],
            "tools": ["Docker", "Git"]
        },
        "education": [
            {
                "degree": "B.Sc. Computer Science",
                "school": "TU Berlin",
                "duration": "2015–2019",
                "description": "Thesis on consensus protocols"
            }
        ],
        "languages": ["English", "German"]
    })
}

pub fn sample_profile() -> StructuredProfile {
    serde_json::from_value(sample_profile_json()).unwrap()
}

/// What a `ScriptedGenerator` does when called.
#[derive(Debug, Clone)]
pub enum Script {
    Respond(Value),
    /// The service answered with nothing usable.
    EmptyContent,
    Fail { status: u16 },
    /// Never completes.
    Hang,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub prompt: String,
    pub schema: Value,
}

pub struct ScriptedGenerator {
    script: Script,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedGenerator {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<Value, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
            schema: request.schema.clone(),
        });

        match &self.script {
            Script::Respond(value) => Ok(value.clone()),
            Script::EmptyContent => Err(LlmError::EmptyContent),
            Script::Fail { status } => Err(LlmError::Api {
                status: *status,
                message: "service unavailable".to_string(),
            }),
            Script::Hang => std::future::pending().await,
        }
    }
}
