//! Synthesizer — turns extracted resume text into a validated `StructuredProfile`.
//!
//! The generation capability is stochastic and untrusted: its answer is
//! checked once here (shape by serde, required strings by `validate`) and a
//! non-conforming answer is a hard `SchemaViolation`, never patched up.
//!
//! Fact preservation (no invented employers, titles or dates) is enforced
//! only through the instructions in `prompts`. Nothing at runtime verifies
//! that output facts trace back to the source text.

pub mod handlers;
pub mod prompts;
pub mod schema;

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{GenerationRequest, LlmError, StructuredGenerator};
use crate::models::profile::StructuredProfile;
use crate::synthesis::prompts::{
    ENHANCE_PROMPT_TEMPLATE, ENHANCE_SYSTEM, FACT_PRESERVATION_INSTRUCTION, INDUSTRY_LINE,
    SPECIAL_FOCUS_LINE,
};
use crate::synthesis::schema::profile_json_schema;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Empty input: {0} is empty")]
    EmptyInput(&'static str),

    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

impl From<LlmError> for SynthesisError {
    fn from(e: LlmError) -> Self {
        if e.is_malformed_output() {
            SynthesisError::SchemaViolation(e.to_string())
        } else {
            SynthesisError::GenerationUnavailable(e.to_string())
        }
    }
}

/// Who the resume is being tailored for. `instructions` and `context` steer
/// tone, ordering and emphasis only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Guidance<'a> {
    pub target_role: &'a str,
    pub instructions: Option<&'a str>,
    pub context: Option<&'a str>,
}

impl<'a> Guidance<'a> {
    pub fn new(target_role: &'a str) -> Self {
        Self {
            target_role,
            ..Self::default()
        }
    }

    pub fn with_instructions(mut self, instructions: Option<&'a str>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_context(mut self, context: Option<&'a str>) -> Self {
        self.context = context;
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Builds the user prompt for one synthesis request.
pub fn build_enhance_prompt(text: &str, guidance: &Guidance<'_>) -> String {
    let mut guidance_lines = Vec::new();
    if let Some(instructions) = non_blank(guidance.instructions) {
        guidance_lines.push(SPECIAL_FOCUS_LINE.replace("{instructions}", instructions));
    }
    if let Some(context) = non_blank(guidance.context) {
        guidance_lines.push(INDUSTRY_LINE.replace("{context}", context));
    }

    // The resume text is substituted last so placeholder-like text inside it
    // is never expanded.
    ENHANCE_PROMPT_TEMPLATE
        .replace("{target_role}", guidance.target_role.trim())
        .replace("{guidance}", &guidance_lines.join("\n"))
        .replace("{fact_preservation}", FACT_PRESERVATION_INSTRUCTION)
        .replace("{resume_text}", text)
}

/// Synthesizes a structured profile from resume text.
///
/// The generator call is bounded by `timeout`; expiry is reported as
/// `GenerationUnavailable`. Dropping the returned future cancels the call.
pub async fn synthesize(
    generator: &dyn StructuredGenerator,
    text: &str,
    guidance: &Guidance<'_>,
    timeout: Duration,
) -> Result<StructuredProfile, SynthesisError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SynthesisError::EmptyInput("resume text"));
    }
    if guidance.target_role.trim().is_empty() {
        return Err(SynthesisError::EmptyInput("target role"));
    }

    let prompt = build_enhance_prompt(text, guidance);
    let schema = profile_json_schema();
    let request = GenerationRequest {
        system: ENHANCE_SYSTEM,
        prompt: &prompt,
        schema: &schema,
    };

    info!(
        "Synthesizing profile from {} chars of resume text",
        text.chars().count()
    );

    let value = tokio::time::timeout(timeout, generator.generate(&request))
        .await
        .map_err(|_| {
            warn!("Generation timed out after {}ms", timeout.as_millis());
            SynthesisError::GenerationUnavailable(format!(
                "no response within {}ms",
                timeout.as_millis()
            ))
        })??;

    let profile = parse_profile(value)?;
    info!(
        "Synthesized profile: {} experience entries, {} education entries",
        profile.experience.len(),
        profile.education.len()
    );
    Ok(profile)
}

/// Converts untrusted generator output into a profile, or explains why not.
pub fn parse_profile(value: Value) -> Result<StructuredProfile, SynthesisError> {
    let profile: StructuredProfile = serde_json::from_value(value).map_err(|e| {
        warn!("Generated profile does not match the schema: {e}");
        SynthesisError::SchemaViolation(e.to_string())
    })?;

    profile.validate().map_err(|violations| {
        let details = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        warn!("Generated profile has blank required fields: {details}");
        SynthesisError::SchemaViolation(details)
    })?;

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{sample_profile_json, Script, ScriptedGenerator};

    const TIMEOUT: Duration = Duration::from_secs(30);
    const RESUME: &str = "John Doe, Software Engineer at Acme Corp, 2019–2023";

    #[tokio::test]
    async fn test_synthesize_returns_validated_profile() {
        let generator = ScriptedGenerator::new(Script::Respond(sample_profile_json()));
        let profile = synthesize(
            &generator,
            RESUME,
            &Guidance::new("Backend Developer"),
            TIMEOUT,
        )
        .await
        .unwrap();

        assert_eq!(profile.experience[0].company, "Acme Corp");
        assert_eq!(profile.experience[0].duration, "2019–2023");
    }

    #[tokio::test]
    async fn test_prompt_carries_source_text_role_and_constraints() {
        let generator = ScriptedGenerator::new(Script::Respond(sample_profile_json()));
        synthesize(
            &generator,
            RESUME,
            &Guidance::new("Backend Developer")
                .with_instructions(Some("Emphasize distributed systems"))
                .with_context(Some("Fintech")),
            TIMEOUT,
        )
        .await
        .unwrap();

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.system, ENHANCE_SYSTEM);
        assert!(request.system.contains("NEVER invent facts"));
        assert!(request.prompt.contains(RESUME));
        assert!(request.prompt.contains("Backend Developer position"));
        assert!(request.prompt.contains("Special focus"));
        assert!(request.prompt.contains("Emphasize distributed systems"));
        assert!(request.prompt.contains("Target industry"));
        assert!(request.prompt.contains("Fintech"));
        assert!(request.prompt.contains("Do NOT change dates or company names"));
        assert!(request.prompt.contains("empty list"));
        assert_eq!(request.schema, profile_json_schema());
    }

    #[test]
    fn test_blank_guidance_lines_are_omitted() {
        let prompt = build_enhance_prompt(
            RESUME,
            &Guidance::new("SRE")
                .with_instructions(Some("   "))
                .with_context(None),
        );
        assert!(!prompt.contains("Special focus"));
        assert!(!prompt.contains("Target industry"));
    }

    #[test]
    fn test_placeholders_inside_resume_text_are_not_expanded() {
        let prompt = build_enhance_prompt("Skills: {target_role}", &Guidance::new("SRE"));
        assert!(prompt.contains("Skills: {target_role}"));
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_before_generation() {
        let generator = ScriptedGenerator::new(Script::Respond(sample_profile_json()));
        let err = synthesize(&generator, " \n\t", &Guidance::new("SRE"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyInput("resume text")));
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_target_role_is_rejected() {
        let generator = ScriptedGenerator::new(Script::Respond(sample_profile_json()));
        let err = synthesize(&generator, RESUME, &Guidance::new("  "), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyInput("target role")));
    }

    #[tokio::test]
    async fn test_missing_name_is_schema_violation() {
        let mut response = sample_profile_json();
        response["personalInfo"]
            .as_object_mut()
            .unwrap()
            .remove("name");
        let generator = ScriptedGenerator::new(Script::Respond(response));

        let err = synthesize(&generator, RESUME, &Guidance::new("SRE"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::SchemaViolation(msg) if msg.contains("name")));
    }

    #[tokio::test]
    async fn test_blank_summary_is_schema_violation() {
        let mut response = sample_profile_json();
        response["summary"] = json!("  ");
        let generator = ScriptedGenerator::new(Script::Respond(response));

        let err = synthesize(&generator, RESUME, &Guidance::new("SRE"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::SchemaViolation(msg) if msg.contains("summary")));
    }

    #[tokio::test]
    async fn test_non_object_response_is_schema_violation() {
        let generator = ScriptedGenerator::new(Script::Respond(json!(["not", "a", "profile"])));
        let err = synthesize(&generator, RESUME, &Guidance::new("SRE"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_unparseable_output_is_schema_violation() {
        let generator = ScriptedGenerator::new(Script::EmptyContent);
        let err = synthesize(&generator, RESUME, &Guidance::new("SRE"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_service_failure_is_generation_unavailable() {
        let generator = ScriptedGenerator::new(Script::Fail { status: 529 });
        let err = synthesize(&generator, RESUME, &Guidance::new("SRE"), TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::GenerationUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_generation_unavailable() {
        let generator = ScriptedGenerator::new(Script::Hang);
        let err = synthesize(
            &generator,
            RESUME,
            &Guidance::new("SRE"),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SynthesisError::GenerationUnavailable(msg) if msg.contains("5000ms")));
    }
}
