use regex::Regex;

pub const GLOBAL_DECISION_MAKER_KEYWORDS: [&str; 24] = [
    "ceo",
    "chief",
    "cmo",
    "coo",
    "cto",
    "vp",
    "president",
    "founder",
    "owner",
    "managing partner",
    "director",
    "head",
    "lead",
    "senior",
    "executive",
    "principal",
    "partner",
    "strategy",
    "buyer",
    "talent acquisition",
    "recruiter",
    "studio manager",
    "art director",
    "client services",
];

/// Short decision-authority phrases checked against the raw title.
pub const DECISION_PHRASES: [&str; 14] = [
    "leads",
    "manages",
    "oversees",
    "responsible for",
    "decision maker",
    "budget authority",
    "team lead",
    "head of",
    "in charge of",
    "supervises",
    "runs",
    "directs",
    "owner of",
    "founder of",
];

/// Larger authority/ownership phrase list used for the deep profile scan,
/// only reached when the title checks are inconclusive.
pub const PROFILE_DECISION_PHRASES: [&str; 18] = [
    "decision maker",
    "responsible for",
    "leads",
    "manages",
    "oversees",
    "budget authority",
    "team lead",
    "department head",
    "hiring manager",
    "key contact",
    "final approval",
    "strategic direction",
    "business owner",
    "founder",
    "principal",
    "executive decision",
    "client acquisition",
    "project lead",
];

/// Titles that count as decision-makers within a specific industry.
pub fn industry_titles(industry: &str) -> &'static [&'static str] {
    match industry {
        "Photography Studios" => &[
            "Studio Manager",
            "Post Production Manager",
            "Retouching Lead",
            "Art Director",
            "Creative Director",
            "Head of Studio",
            "Production Manager",
        ],
        "Software" => &[
            "CTO",
            "VP Engineering",
            "Head of Development",
            "Product Manager",
            "Chief Technology Officer",
            "Lead Developer",
            "Engineering Manager",
        ],
        "Marketing Firms" => &[
            "Head of Marketing",
            "CMO",
            "Brand Manager",
            "Account Director",
            "Marketing Director",
            "Digital Marketing Manager",
            "Strategy Director",
        ],
        "Creative Agencies" => &[
            "Creative Director",
            "Art Director",
            "Head of Creative",
            "Design Director",
            "Lead Designer",
            "Chief Creative Officer",
        ],
        "E-commerce / Online Retail" => &[
            "E-commerce Director",
            "Head of E-commerce",
            "Operations Manager",
            "Head of Online Sales",
            "Digital Director",
        ],
        "Real Estate" => &[
            "Managing Director",
            "Broker Owner",
            "Principal",
            "Head of Sales",
            "Regional Director",
            "Real Estate Manager",
        ],
        "Fashion & Apparel" => &[
            "Fashion Director",
            "Head of Design",
            "Brand Manager",
            "Creative Director",
            "Production Manager",
        ],
        "Jewelry & Luxury Goods" => &[
            "Brand Director",
            "Head of Retail",
            "Creative Director",
            "Store Manager",
            "Merchandising Manager",
        ],
        "IT Services" => &[
            "IT Director",
            "Head of IT",
            "Chief Information Officer",
            "IT Manager",
            "Solutions Architect",
        ],
        "Animation / 3D" => &[
            "Head of Animation",
            "Animation Director",
            "3D Lead",
            "VFX Supervisor",
            "Studio Manager",
        ],
        _ => &[],
    }
}

/// Title-level classification: global seniority keywords, then the
/// industry-specific title list, then a phrase-count heuristic. Short
/// circuits on the first hit.
pub fn is_decision_maker(title: &str, industry: &str) -> bool {
    let title_lower = title.to_lowercase();

    if GLOBAL_DECISION_MAKER_KEYWORDS
        .iter()
        .any(|keyword| title_lower.contains(keyword))
    {
        return true;
    }

    if industry_titles(industry)
        .iter()
        .any(|known_title| title_lower.contains(&known_title.to_lowercase()))
    {
        return true;
    }

    let phrase_hits = DECISION_PHRASES
        .iter()
        .filter(|phrase| title_lower.contains(*phrase))
        .count();
    phrase_hits >= 1
}

/// Checks concatenated About + Experience text for authority language.
pub fn profile_text_indicates_decision_maker(profile_text: &str) -> bool {
    let text = profile_text.to_lowercase();
    PROFILE_DECISION_PHRASES
        .iter()
        .any(|phrase| text.contains(phrase))
}

const LARGE_ORG_THRESHOLD: u32 = 200;

const LARGE_ORG_TITLES: [&str; 6] = ["head", "vp", "director", "regional", "department", "manager"];

const SMALL_ORG_TITLES: [&str; 8] = [
    "ceo",
    "founder",
    "owner",
    "president",
    "principal",
    "partner",
    "chief",
    "executive",
];

/// Size-dependent seniority preference: large organizations want department
/// heads, small ones want founders and C-level. Unknown size accepts all.
pub fn is_preferred_decision_maker(title: &str, company_size: Option<u32>) -> bool {
    let title_lower = title.to_lowercase();
    match company_size {
        Some(size) if size >= LARGE_ORG_THRESHOLD => LARGE_ORG_TITLES
            .iter()
            .any(|keyword| title_lower.contains(keyword)),
        Some(_) => SMALL_ORG_TITLES
            .iter()
            .any(|keyword| title_lower.contains(keyword)),
        None => true,
    }
}

/// Parses an "N employees" or "N-M employees" pattern out of company page
/// text, returning the midpoint of a range.
pub fn parse_company_size(text: &str) -> Option<u32> {
    let pattern = Regex::new(r"([\d,]+)\s*(?:-\s*([\d,]+))?\s*employees?").ok()?;
    let lowercased = text.to_lowercase();
    let captures = pattern.captures(&lowercased)?;

    let low: u32 = captures.get(1)?.as_str().replace(',', "").parse().ok()?;
    match captures.get(2) {
        Some(high) => {
            let high: u32 = high.as_str().replace(',', "").parse().ok()?;
            Some((low + high) / 2)
        }
        None => Some(low),
    }
}
