use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::entities::{extract_entities, Entity};

/// Everything the personalizer may reference about a prospect.
#[derive(Debug, Clone, Default)]
pub struct ProspectProfile {
    pub name: String,
    pub company: String,
    pub industry: String,
    pub role: String,
    pub about: String,
    pub recent_post: String,
    pub mutuals: Vec<String>,
}

pub const SHORT_TEMPLATES: [&str; 3] = [
    "Hi {name}, let's connect!",
    "Hello {name}, would love to connect.",
    "Hi {name}, thanks for connecting!",
];

pub const MEDIUM_TEMPLATES: [&str; 3] = [
    "Hi {name}, I came across your profile and was impressed by your work at {company}. Let's connect and share insights!",
    "Hello {name}, as a fellow {role} in {industry}, I'd love to connect and discuss industry trends.",
    "Hi {name}, always great to meet professionals from {company}. Looking forward to connecting!",
];

pub const LONG_TEMPLATES: [&str; 3] = [
    "Hi {name}, I noticed your recent achievements at {company} and your experience in {industry}. I'd be delighted to connect and exchange ideas on how our industries are evolving.",
    "Hello {name}, your leadership in {industry} and your recent post really resonated with me. If you're open to it, I'd love to connect and discuss potential collaboration opportunities.",
    "Hi {name}, I see we share mutual connections and similar interests in {industry}. Looking forward to learning from your experience and sharing insights!",
];

const LENGTH_CLASSES: [&str; 3] = ["short", "medium", "long"];
const LENGTH_WEIGHTS: [u32; 3] = [2, 5, 3];

const RECENT_POST_SNIPPET_CHARS: usize = 80;

fn render(template: &str, profile: &ProspectProfile) -> String {
    let name = if profile.name.is_empty() {
        "there"
    } else {
        &profile.name
    };
    template
        .replace("{name}", name)
        .replace("{company}", &profile.company)
        .replace("{industry}", &profile.industry)
        .replace("{role}", &profile.role)
}

fn templates_for(class: &str) -> &'static [&'static str] {
    match class {
        "short" => &SHORT_TEMPLATES,
        "medium" => &MEDIUM_TEMPLATES,
        "long" => &LONG_TEMPLATES,
        _ => &MEDIUM_TEMPLATES,
    }
}

fn forced_template(spec: &str) -> Option<&'static str> {
    let (class, index) = spec.rsplit_once('_')?;
    let index: usize = index.parse().ok()?;
    match class {
        "short" | "medium" | "long" => {
            let table = templates_for(class);
            Some(table[index % table.len()])
        }
        _ => None,
    }
}

fn industry_or_generic(industry: &str) -> &str {
    if industry.is_empty() {
        "the industry"
    } else {
        industry
    }
}

/// Generates a personalized opener and its variant label. Rules fire in
/// strict priority order; the fallback draws a length class (20/50/30) and a
/// template within it, unless the retrainer has published a preferred
/// variant, in which case that template is forced.
pub fn generate_message(
    profile: &ProspectProfile,
    forced_variant: Option<&str>,
    rng: &mut impl Rng,
) -> (String, String) {
    let name = if profile.name.is_empty() {
        "there"
    } else {
        &profile.name
    };

    let recent_post = profile.recent_post.trim();
    if !recent_post.is_empty() {
        let snippet: String = recent_post.chars().take(RECENT_POST_SNIPPET_CHARS).collect();
        let text = format!(
            "Hi {}, I saw your recent post: '{}...' and wanted to connect!",
            name, snippet
        );
        return (text, "recent_post".to_string());
    }

    let context = format!("{} {}", profile.about, profile.recent_post);
    let entities = extract_entities(&context);

    for entity in &entities {
        match entity {
            Entity::Work(mention) => {
                let text = format!(
                    "Hi {}, congrats on your recent work '{}'! Would love to connect and discuss {}.",
                    name,
                    mention,
                    industry_or_generic(&profile.industry)
                );
                return (text, "entity_congrats".to_string());
            }
            Entity::Location(place) => {
                let text = format!(
                    "Hi {}, I see you're based in {}. Always great to connect with professionals from {}!",
                    name, place, place
                );
                return (text, "location_gpe".to_string());
            }
            Entity::Date(period) => {
                let text = format!(
                    "Hi {}, congrats on your recent achievement in {}! Would love to connect.",
                    name, period
                );
                return (text, "date_achievement".to_string());
            }
            Entity::Skill(_) => {}
        }
    }

    for entity in &entities {
        if let Entity::Skill(skill) = entity {
            let text = format!(
                "Hi {}, your expertise in {} is impressive! Would love to connect.",
                name, skill
            );
            return (text, "skill_mention".to_string());
        }
    }

    if let Some(mutual) = profile.mutuals.first() {
        let text = format!(
            "Hi {}, I noticed we both know {}. Always great to connect with mutual contacts!",
            name, mutual
        );
        return (text, "mutual_connection".to_string());
    }

    if !profile.industry.is_empty() && !profile.role.is_empty() {
        let text = format!(
            "Hi {}, as a fellow {} in {}, I'd love to connect and share insights.",
            name, profile.role, profile.industry
        );
        return (text, "industry_role".to_string());
    }

    if let Some(spec) = forced_variant {
        if let Some(template) = forced_template(spec) {
            return (render(template, profile), spec.to_string());
        }
        let template = MEDIUM_TEMPLATES
            .choose(rng)
            .expect("template table is not empty");
        return (render(template, profile), "medium_fallback".to_string());
    }

    let weights = WeightedIndex::new(LENGTH_WEIGHTS).expect("static weights are valid");
    let class = LENGTH_CLASSES[weights.sample(rng)];
    let table = templates_for(class);
    let index = rng.gen_range(0..table.len());
    (
        render(table[index], profile),
        format!("{}_{}", class, index),
    )
}

pub const COMMENT_KEYWORDS: [&str; 16] = [
    "hiring",
    "project",
    "collaboration",
    "launch",
    "team",
    "growth",
    "expanding",
    "opportunity",
    "success",
    "award",
    "milestone",
    "client",
    "innovation",
    "leadership",
    "strategy",
    "partnership",
];

pub const COMMENT_TEMPLATES: [&str; 10] = [
    "Great insight, thanks for sharing!",
    "Congrats on your recent project, very inspiring.",
    "This is a valuable perspective for our industry.",
    "Impressive work, your team is doing amazing things!",
    "Thanks for posting this update, learned a lot.",
    "Love the innovation here, keep it up!",
    "Your leadership really shows in this post.",
    "Appreciate you sharing your experience!",
    "This resonates with what we're seeing in the market.",
    "Excited to see what's next for your company!",
];

fn industry_comment_templates(industry: &str) -> &'static [&'static str] {
    match industry {
        "Photography Studios" => &[
            "Stunning visuals! Your studio's work is always inspiring.",
            "Great to see innovation in post-production!",
            "Love the creative direction in your recent shoot.",
        ],
        "Software" => &[
            "Impressive product update, software innovation at its best!",
            "Great insights on automation trends.",
            "Your team's work in software is really moving the industry forward.",
        ],
        "Marketing Firms" => &[
            "Excellent campaign results! Inspiring marketing leadership.",
            "Love the creative strategy behind your recent project.",
            "Great to see data-driven marketing in action.",
        ],
        "E-commerce / Online Retail" => &[
            "Congrats on your recent sales milestone!",
            "Love the customer-centric approach in your latest post.",
            "Great insights on e-commerce growth.",
        ],
        "Real Estate" => &[
            "Impressive property showcase!",
            "Great to see innovation in real estate marketing.",
            "Congrats on your recent closing!",
        ],
        "Fashion & Apparel" => &[
            "Stunning collection! Love the new designs.",
            "Great to see sustainable fashion initiatives.",
            "Your brand's creativity really stands out.",
        ],
        _ => &[],
    }
}

/// True when a post is worth engaging with at all.
pub fn post_mentions_engagement(post_text: &str) -> bool {
    let text = post_text.to_lowercase();
    COMMENT_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Builds a comment for a post: entity-aware first, then an
/// industry-flavored template, then a generic one.
pub fn generate_contextual_comment(
    post_text: &str,
    industry: &str,
    rng: &mut impl Rng,
) -> String {
    for entity in extract_entities(post_text) {
        match entity {
            Entity::Work(mention) => {
                return format!(
                    "Congrats on your recent work '{}'! Very inspiring for the {} community.",
                    mention,
                    industry_or_generic(industry)
                );
            }
            Entity::Location(place) => {
                return format!("Great to see innovation coming from {}!", place);
            }
            Entity::Date(period) => {
                return format!("Exciting milestone in {}! Congrats to your team.", period);
            }
            Entity::Skill(_) => {}
        }
    }

    let industry_templates = industry_comment_templates(industry);
    if let Some(template) = industry_templates.choose(rng) {
        return template.to_string();
    }

    COMMENT_TEMPLATES
        .choose(rng)
        .expect("template table is not empty")
        .to_string()
}
