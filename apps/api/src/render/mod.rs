//! Renderer — lays a `StructuredProfile` out as a single self-contained HTML page.
//!
//! Pure and deterministic: the same profile always yields byte-identical
//! output. All profile strings go through `HtmlWriter`, which escapes them.

pub mod handlers;
pub mod markup;
pub mod styles;

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::models::profile::{
    present, EducationEntry, ExperienceEntry, PersonalInfo, SkillSet, StructuredProfile,
};
use crate::render::markup::HtmlWriter;
use crate::render::styles::RESUME_CSS;

/// A rendered HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

pub fn render(profile: &StructuredProfile) -> RenderedDocument {
    let mut w = HtmlWriter::new();
    let info = &profile.personal_info;

    w.raw("<!DOCTYPE html>");
    w.open("html", &[("lang", "en")]);

    w.open("head", &[]);
    w.void("meta", &[("charset", "UTF-8")]);
    w.void(
        "meta",
        &[
            ("name", "viewport"),
            ("content", "width=device-width, initial-scale=1.0"),
        ],
    );
    let title = format!("{} - {}", info.name.trim(), info.title.trim());
    w.element("title", None, &title);
    w.open("style", &[]);
    w.raw(RESUME_CSS);
    w.close();
    w.close();

    w.open("body", &[]);
    render_header(&mut w, info);
    render_summary(&mut w, &profile.summary);
    render_experience(&mut w, &profile.experience);
    render_skills(&mut w, &profile.skills);
    render_education(&mut w, &profile.education);
    render_languages(&mut w, &profile.languages);
    w.close();

    let html = w.finish();
    debug!("Rendered resume: {} bytes", html.len());
    RenderedDocument(html)
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

enum Contact<'a> {
    Text(&'a str),
    Link {
        href: Cow<'a, str>,
        label: &'a str,
        external: bool,
    },
}

fn render_header(w: &mut HtmlWriter, info: &PersonalInfo) {
    w.open_class("div", "header");
    w.element("h1", None, info.name.trim());
    w.element("div", Some("title"), info.title.trim());

    let mut contacts = Vec::new();
    if let Some(location) = present(&info.location) {
        contacts.push(Contact::Text(location));
    }
    if let Some(phone) = present(&info.phone) {
        contacts.push(Contact::Text(phone));
    }
    if let Some(email) = present(&info.email) {
        contacts.push(Contact::Link {
            href: Cow::Owned(format!("mailto:{email}")),
            label: email,
            external: false,
        });
    }
    for (value, label) in [(&info.linkedin, "LinkedIn"), (&info.github, "GitHub")] {
        let Some(url) = present(value) else { continue };
        match web_href(url) {
            Some(href) => contacts.push(Contact::Link {
                href,
                label,
                external: true,
            }),
            None => {
                warn!("Rendering {label} value as text: not an http(s) URL");
                contacts.push(Contact::Text(url));
            }
        }
    }

    if !contacts.is_empty() {
        w.open_class("div", "contact");
        for contact in &contacts {
            match contact {
                Contact::Text(text) => w.element("span", None, text),
                Contact::Link {
                    href,
                    label,
                    external: true,
                } => w.element_with(
                    "a",
                    &[
                        ("href", href.as_ref()),
                        ("target", "_blank"),
                        ("rel", "noopener noreferrer"),
                    ],
                    label,
                ),
                Contact::Link { href, label, .. } => {
                    w.element_with("a", &[("href", href.as_ref())], label)
                }
            }
        }
        w.close();
    }
    w.close();
}

/// Returns a safe href for a profile link, or `None` when the value must be
/// shown as plain text. Bare domains such as `github.com/jdoe` get `https://`.
fn web_href(url: &str) -> Option<Cow<'_, str>> {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return Some(Cow::Borrowed(url));
    }
    let bare_domain = !url.contains(':')
        && !url.contains(char::is_whitespace)
        && !url.starts_with('/')
        && url.split('/').next().is_some_and(|host| host.contains('.'));
    bare_domain.then(|| Cow::Owned(format!("https://{url}")))
}

fn render_summary(w: &mut HtmlWriter, summary: &str) {
    w.open_class("div", "section");
    w.element("h2", None, "Summary");
    w.element("div", Some("summary"), summary.trim());
    w.close();
}

/// Non-blank items of a list, trimmed, in input order.
fn visible(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect()
}

/// The section and its heading are always written, even with no jobs.
fn render_experience(w: &mut HtmlWriter, experience: &[ExperienceEntry]) {
    w.open_class("div", "section");
    w.element("h2", None, "Experience");
    for job in experience {
        w.open_class("div", "job");

        w.open_class("div", "job-header");
        w.element("div", Some("job-title"), job.title.trim());
        w.open_class("div", "company-duration");
        w.element("div", Some("company"), job.company.trim());
        w.element("div", Some("duration"), job.duration.trim());
        w.close();
        if let Some(location) = present(&job.location) {
            w.element("div", Some("location"), location);
        }
        w.close();

        let achievements = visible(&job.achievements);
        if !achievements.is_empty() {
            w.open_class("div", "achievements");
            w.open("ul", &[]);
            for achievement in achievements {
                w.element("li", None, achievement);
            }
            w.close();
            w.close();
        }

        let technologies = visible(&job.technologies);
        if !technologies.is_empty() {
            w.open_class("div", "tech-stack");
            w.element("strong", None, "Technologies:");
            w.text(&technologies.join(", "));
            w.close();
        }

        w.close();
    }
    w.close();
}

/// Empty categories are skipped; the section itself is always written.
fn render_skills(w: &mut HtmlWriter, skills: &SkillSet) {
    let groups = skills
        .iter()
        .map(|(category, items)| (category, visible(items)))
        .filter(|(_, items)| !items.is_empty());

    w.open_class("div", "section");
    w.element("h2", None, "Technical Skills");
    w.open_class("div", "skills-section");
    for (category, items) in groups {
        w.open_class("div", "skill-group");
        w.element("h3", None, &category.label());
        w.open_class("div", "skill-list");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                w.void("br", &[]);
            }
            w.text(item);
        }
        w.close();
        w.close();
    }
    w.close();
    w.close();
}

fn render_education(w: &mut HtmlWriter, education: &[EducationEntry]) {
    if education.is_empty() {
        return;
    }

    w.open_class("div", "section");
    w.element("h2", None, "Education");
    for edu in education {
        w.open_class("div", "education-item");
        w.element("div", Some("education-title"), edu.degree.trim());
        w.element("div", Some("education-school"), edu.school.trim());
        w.element("div", Some("education-duration"), edu.duration.trim());
        if let Some(description) = present(&edu.description) {
            w.element("div", Some("education-description"), description);
        }
        w.close();
    }
    w.close();
}

fn render_languages(w: &mut HtmlWriter, languages: &[String]) {
    let languages = visible(languages);
    if languages.is_empty() {
        return;
    }

    w.open_class("div", "section");
    w.element("h2", None, "Languages");
    w.element("div", Some("languages"), &languages.join(", "));
    w.close();
}
