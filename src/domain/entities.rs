use std::sync::OnceLock;

use regex::Regex;

/// Mentions worth referencing in an opening message, in the order they
/// appear in the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// A named piece of work: project, product, event, award, organization.
    Work(String),
    Location(String),
    Date(String),
    Skill(String),
}

const SKILL_LEXICON: [&str; 16] = [
    "retouching",
    "photography",
    "post-production",
    "marketing",
    "seo",
    "branding",
    "animation",
    "3d modeling",
    "e-commerce",
    "software development",
    "design",
    "analytics",
    "automation",
    "advertising",
    "cinematography",
    "merchandising",
];

fn quoted_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"['"]([^'"]{3,60})['"]"#).expect("valid regex"))
}

fn work_cue_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i:launch(?:ed)?|unveil(?:ed)?|release[ds]?|award(?:ed)?|project|milestone|campaign)\s+((?:[A-Z][\w&'-]*(?:\s+|\b)){1,4})",
        )
        .expect("valid regex")
    })
}

fn location_cue_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i:based in|located in|headquartered in|moving to)\s+([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)?)",
        )
        .expect("valid regex")
    })
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"\b(?:(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+(?:19|20)\d{2}|Q[1-4]\s+(?:19|20)\d{2}|(?:19|20)\d{2})\b",
        )
        .expect("valid regex")
    })
}

/// Rule-based stand-in for a statistical named-entity pass: quoted spans and
/// cue words mark work mentions, location cues mark places, explicit year
/// forms mark dates, and a fixed lexicon marks skills. Results come back in
/// document order so callers can honor first-mention priority.
pub fn extract_entities(text: &str) -> Vec<Entity> {
    let mut found: Vec<(usize, Entity)> = vec![];

    for captures in quoted_pattern().captures_iter(text) {
        if let Some(span) = captures.get(1) {
            found.push((span.start(), Entity::Work(span.as_str().trim().to_string())));
        }
    }

    for captures in work_cue_pattern().captures_iter(text) {
        if let Some(span) = captures.get(1) {
            let name = span.as_str().trim().to_string();
            if !name.is_empty() {
                found.push((span.start(), Entity::Work(name)));
            }
        }
    }

    for captures in location_cue_pattern().captures_iter(text) {
        if let Some(span) = captures.get(1) {
            found.push((
                span.start(),
                Entity::Location(span.as_str().trim().to_string()),
            ));
        }
    }

    for matched in date_pattern().find_iter(text) {
        found.push((matched.start(), Entity::Date(matched.as_str().to_string())));
    }

    let lowered = text.to_lowercase();
    for skill in SKILL_LEXICON {
        if let Some(position) = lowered.find(skill) {
            found.push((position, Entity::Skill(skill.to_string())));
        }
    }

    found.sort_by_key(|(position, _)| *position);
    found.into_iter().map(|(_, entity)| entity).collect()
}
