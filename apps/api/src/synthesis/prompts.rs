// All LLM prompt constants for the Synthesis module.

/// System prompt for resume synthesis.
pub const ENHANCE_SYSTEM: &str = "You are a professional resume writer specializing in tech roles. \
    You turn raw resume text into a structured profile. \
    You restyle and reorganize, but you NEVER invent facts that are not in the source text.";

/// Fact-preservation rules. Applied to every synthesis request.
pub const FACT_PRESERVATION_INSTRUCTION: &str = "\
CONSTRAINTS:
- Keep every date, company name, job title and factual claim exactly as written in the source \
(copy them verbatim, including punctuation such as en dashes)
- Do NOT add experience, skills, employers, degrees or credentials that are not in the source
- Do NOT inflate job titles or responsibilities
- Do NOT change dates or company names
- DO enhance language and presentation
- DO reorganize for better readability
- DO use action verbs and quantify achievements only with numbers present in the source";

/// Resume synthesis prompt template.
/// Replace: {target_role}, {resume_text}, {guidance}, {fact_preservation}
pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Enhance this resume for a {target_role} position.

ORIGINAL RESUME:
{resume_text}

REQUIREMENTS:
- Keep all facts accurate and truthful
- Improve formatting and structure
- Organize skills into the six categories: backend, frontend, databases, cloud, testing, tools
- Include all six skill categories; use an empty list for a category with no matching skills
- Write exactly one compelling professional summary, even if the original has none; \
build it only from the experience and skills above
- List experience in reverse-chronological order as supplied or as implied by the dates
- Optimize wording and ordering for the {target_role} role
{guidance}
{fact_preservation}

Return the structured profile as JSON."#;

/// Emphasis guidance line. Replace: {instructions}
pub const SPECIAL_FOCUS_LINE: &str = "- Special focus (tone and emphasis only, never new facts): {instructions}";

/// Industry framing line. Replace: {context}
pub const INDUSTRY_LINE: &str = "- Target industry (framing only, never new facts): {context}";
