//! StructuredProfile — the canonical data contract between synthesis and
//! rendering. Wire names are camelCase.
//!
//! Shape (required keys, types, `Option` for optional fields) is enforced by
//! serde; `validate` adds the semantic rule that required strings are not
//! blank. Both run once, where untrusted generator output enters the system.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredProfile {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub skills: SkillSet,
    pub education: Vec<EducationEntry>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
}

/// Six fixed skill categories. Every key is required; a category with no
/// skills is an empty list, never a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    pub backend: Vec<String>,
    pub frontend: Vec<String>,
    pub databases: Vec<String>,
    pub cloud: Vec<String>,
    pub testing: Vec<String>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Backend,
    Frontend,
    Databases,
    Cloud,
    Testing,
    Tools,
}

impl SkillCategory {
    /// Fixed presentation order.
    pub const ALL: [SkillCategory; 6] = [
        SkillCategory::Backend,
        SkillCategory::Frontend,
        SkillCategory::Databases,
        SkillCategory::Cloud,
        SkillCategory::Testing,
        SkillCategory::Tools,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SkillCategory::Backend => "backend",
            SkillCategory::Frontend => "frontend",
            SkillCategory::Databases => "databases",
            SkillCategory::Cloud => "cloud",
            SkillCategory::Testing => "testing",
            SkillCategory::Tools => "tools",
        }
    }

    /// The key with its first letter upper-cased.
    pub fn label(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl SkillSet {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Backend => &self.backend,
            SkillCategory::Frontend => &self.frontend,
            SkillCategory::Databases => &self.databases,
            SkillCategory::Cloud => &self.cloud,
            SkillCategory::Testing => &self.testing,
            SkillCategory::Tools => &self.tools,
        }
    }

    /// Categories in fixed order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &[String])> + '_ {
        SkillCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// A single contract violation, addressed by a JSON-style path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileViolation {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for ProfileViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

impl StructuredProfile {
    /// Checks that every required string is non-empty after trimming.
    /// Returns all violations, not just the first.
    pub fn validate(&self) -> Result<(), Vec<ProfileViolation>> {
        let mut violations = Vec::new();
        let mut require = |path: String, value: &str| {
            if value.trim().is_empty() {
                violations.push(ProfileViolation {
                    path,
                    reason: "required field is empty".to_string(),
                });
            }
        };

        require("personalInfo.name".into(), &self.personal_info.name);
        require("personalInfo.title".into(), &self.personal_info.title);
        require("summary".into(), &self.summary);

        for (i, job) in self.experience.iter().enumerate() {
            require(format!("experience[{i}].title"), &job.title);
            require(format!("experience[{i}].company"), &job.company);
            require(format!("experience[{i}].duration"), &job.duration);
        }

        for (i, edu) in self.education.iter().enumerate() {
            require(format!("education[{i}].degree"), &edu.degree);
            require(format!("education[{i}].school"), &edu.school);
            require(format!("education[{i}].duration"), &edu.duration);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Returns the value of an optional field only when it has visible content.
pub fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
