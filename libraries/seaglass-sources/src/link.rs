//! Share-link recognition.
//!
//! Users paste whole share messages, bare URLs, or just a playlist
//! id. Recognition extracts every plausible (service, id) pair so the
//! importer can try them in order.

use once_cell::sync::Lazy;
use regex::Regex;

/// A recognized playlist reference on a specific source service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLink {
    /// QQ Music playlist id.
    Qq(String),
    /// Netease Cloud Music playlist id.
    Netease(String),
}

static QQ_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // New web player: y.qq.com/n/ryqq/playlist/<id>
        r"y\.qq\.com/n/ryqq/playlist/(\d+)",
        // Mobile share page: i.y.qq.com/n2/m/share/details/taoge.html?...id=<id>
        r"i\.y\.qq\.com/n2/m/share/details/taoge\.html\?.*?\bid=(\d+)",
        // Legacy share links carry the id as a query parameter.
        r"y\.qq\.com\S*?\bid=(\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static NETEASE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Query-style: music.163.com/#/playlist?id=<id>, /m/playlist?id=<id>
        r"music\.163\.com\S*?\bid=(\d+)",
        // Path-style share links carry the id as a path segment.
        r"music\.163\.com/playlist/(\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\s*$").expect("valid regex"));

/// Extract candidate playlist references from user input.
///
/// URL-shaped input yields exactly one candidate for the matching
/// service. A bare numeric id is ambiguous and yields one candidate
/// per service, QQ first, for the caller to try in turn. Returns an
/// empty vec when nothing is recognized.
pub fn candidates(input: &str) -> Vec<SourceLink> {
    for pattern in QQ_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(input) {
            return vec![SourceLink::Qq(caps[1].to_string())];
        }
    }

    for pattern in NETEASE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(input) {
            return vec![SourceLink::Netease(caps[1].to_string())];
        }
    }

    if let Some(caps) = BARE_ID.captures(input) {
        let id = caps[1].to_string();
        return vec![SourceLink::Qq(id.clone()), SourceLink::Netease(id)];
    }

    Vec::new()
}
