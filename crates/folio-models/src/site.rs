//! Site profile written to `site.json`.

use serde::{Deserialize, Serialize};

/// Profile fields shown in the hero, about and contact sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProfile {
    pub hero_name: String,
    pub hero_subtitle: String,
    pub links: SiteLinks,
    pub contact_email: String,
    pub about_text: String,
}

/// External profile links. Empty strings when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLinks {
    pub github: String,
    pub linkedin: String,
}
