// Shared prompt constants used by the LLM client itself.
// Task-specific prompts live next to the service that owns them.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Heading placed before the JSON Schema embedded in every structured prompt.
pub const SCHEMA_INSTRUCTION: &str = "\
    OUTPUT SCHEMA (JSON Schema). Return exactly one JSON object that validates against it. \
    Every key listed under \"required\" MUST be present; use an empty array for empty lists \
    and omit optional keys you have no data for:";
