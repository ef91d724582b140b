use super::{ParamPolicy, ParamRule};

/// Languages the demo site is published in. The first one is the primary.
pub const LANGUAGES: &[&str] = &["en", "de", "fr", "es"];

/// Parameter names treated as internal site search when no rule claims them.
pub const SEARCH_PARAMS: &[&str] = &["q", "query", "search", "s"];

/// Names a pagination parameter is normally called.
pub const PAGINATION_NAMES: &[&str] = &["page", "p", "pg", "paged", "offset", "start"];

/// Paths no crawler has business in. Order is the order they appear in
/// robots.txt.
pub const PROTECTED_PATHS: &[&str] = &[
    "/api/",
    "/admin/",
    "/cart",
    "/checkout",
    "/account/",
    "/search",
    "/_next/",
];

/// Carve-outs inside protected paths that must stay crawlable.
pub const ALLOWED_PATHS: &[&str] = &["/_next/static/"];

const COLOR_SYNONYMS: &[(&str, &str)] = &[
    ("schwarz", "black"),
    ("noir", "black"),
    ("negro", "black"),
    ("blau", "blue"),
    ("bleu", "blue"),
    ("azul", "blue"),
    ("rot", "red"),
    ("rouge", "red"),
    ("rojo", "red"),
    ("weiss", "white"),
    ("weiß", "white"),
    ("blanc", "white"),
    ("blanco", "white"),
    ("grün", "green"),
    ("vert", "green"),
    ("verde", "green"),
];

pub fn default_rules() -> Vec<ParamRule> {
    vec![
        ParamRule::new("color", ParamPolicy::Stable, "Color filter")
            .with_synonyms(COLOR_SYNONYMS),
        ParamRule::new("size", ParamPolicy::Stable, "Size filter"),
        ParamRule::new("material", ParamPolicy::Stable, "Material filter"),
        ParamRule::new("sort", ParamPolicy::Unstable, "Sort order of the listing"),
        ParamRule::new("order", ParamPolicy::Unstable, "Sort direction"),
        ParamRule::new("view", ParamPolicy::Unstable, "Grid or list layout"),
        ParamRule::new("per_page", ParamPolicy::Unstable, "Items per page"),
        ParamRule::new("utm_source", ParamPolicy::Blocked, "Campaign source tracking"),
        ParamRule::new("utm_medium", ParamPolicy::Blocked, "Campaign medium tracking"),
        ParamRule::new("utm_campaign", ParamPolicy::Blocked, "Campaign name tracking"),
        ParamRule::new("utm_term", ParamPolicy::Blocked, "Campaign keyword tracking"),
        ParamRule::new("utm_content", ParamPolicy::Blocked, "Campaign content tracking"),
        ParamRule::new("gclid", ParamPolicy::Blocked, "Google Ads click id"),
        ParamRule::new("fbclid", ParamPolicy::Blocked, "Facebook click id"),
        ParamRule::new("sessionid", ParamPolicy::Blocked, "Session identifier"),
        ParamRule::new("ref", ParamPolicy::Blocked, "Referral marker"),
    ]
}
