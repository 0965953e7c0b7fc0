//! Maps arbitrary classifier output onto the taxonomy.
//!
//! Resolution runs an ordered table of stages and the first stage that
//! produces a category wins. Inside the keyword stage the rules are ordered too,
//! so "emergency water heater leak" is a water heater job, not an emergency.

use regex::Regex;
use std::sync::LazyLock;

use crate::taxonomy::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Exact,
    Synonym,
    Keyword,
    Tail,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub category: Category,
    pub stage: Stage,
}

type Matcher = fn(&str) -> Option<Category>;

/// Evaluated top to bottom against the lower-cased, trimmed input.
pub const STAGES: [(Stage, Matcher); 4] = [
    (Stage::Exact, exact_match),
    (Stage::Synonym, synonym_match),
    (Stage::Keyword, keyword_match),
    (Stage::Tail, tail_match),
];

const SYNONYMS: &[(&str, Category)] = &[
    ("toilet", Category::ToiletRepairInstall),
    ("toilet_repair", Category::ToiletRepairInstall),
    ("toilet_install", Category::ToiletRepairInstall),
    ("water_heater", Category::WaterHeaters),
    ("water heater", Category::WaterHeaters),
    ("no_hot_water", Category::WaterHeaters),
    ("no hot water", Category::WaterHeaters),
    ("leak_detection", Category::LeakDetection),
    ("drain_cleaning", Category::DrainCleaning),
    ("camera_inspection", Category::VideoCameraInspection),
    ("emergency", Category::Emergency),
];

const KEYWORD_PATTERNS: &[(&str, Category)] = &[
    (r"water\s*heater|no\s*hot\s*water", Category::WaterHeaters),
    (r"toilet|wc", Category::ToiletRepairInstall),
    (r"leak|detect", Category::LeakDetection),
    (r"drain|clog|backup|hydro[-\s]?jet", Category::DrainCleaning),
    (r"camera", Category::VideoCameraInspection),
    (r"flood|burst|urgent|emergency", Category::Emergency),
];

static KEYWORD_RULES: LazyLock<Vec<(Regex, Category)>> = LazyLock::new(|| {
    KEYWORD_PATTERNS
        .iter()
        .map(|(pattern, category)| (Regex::new(pattern).expect("keyword pattern"), *category))
        .collect()
});

pub fn exact_match(s: &str) -> Option<Category> {
    Category::from_code(s)
}

pub fn synonym_match(s: &str) -> Option<Category> {
    SYNONYMS.iter().find(|(alias, _)| *alias == s).map(|(_, c)| *c)
}

pub fn keyword_match(s: &str) -> Option<Category> {
    KEYWORD_RULES.iter().find(|(re, _)| re.is_match(s)).map(|(_, c)| *c)
}

/// First taxonomy member whose un-namespaced tail occurs in the input.
pub fn tail_match(s: &str) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|c| c.tail().is_some_and(|tail| s.contains(tail)))
}

pub fn resolve(raw: &str) -> Resolution {
    let s = raw.trim().to_lowercase();
    STAGES
        .iter()
        .find_map(|(stage, matcher)| matcher(&s).map(|category| Resolution { category, stage: *stage }))
        .unwrap_or(Resolution { category: Category::Other, stage: Stage::Fallback })
}

/// Total: every input maps to a taxonomy member, `other` when nothing matches.
pub fn normalize(raw: &str) -> Category {
    resolve(raw).category
}
