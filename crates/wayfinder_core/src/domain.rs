//! Domain enums shared between the pipeline and the persistence layer.

use serde::{Deserialize, Serialize};

/// Kind of microsite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SiteType {
    /// City-wide tourism microsite
    City,
    /// Single-attraction microsite
    Attraction,
}

/// Lifecycle status of a site.
///
/// A full-site generation run transitions the site to `Published`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SiteStatus {
    /// Created but not yet deployed
    Draft,
    /// Content generated and deployed
    Published,
    /// Retired, no longer served
    Archived,
}

/// Kind of page within a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    /// Landing page
    Home,
    /// Category listing page
    Category,
    /// Single attraction page
    Attraction,
    /// Long-form guide page
    Guide,
}

impl SiteType {
    /// Text form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteType::City => "CITY",
            SiteType::Attraction => "ATTRACTION",
        }
    }
}

impl SiteStatus {
    /// Text form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Draft => "DRAFT",
            SiteStatus::Published => "PUBLISHED",
            SiteStatus::Archived => "ARCHIVED",
        }
    }
}

impl PageType {
    /// Text form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Home => "HOME",
            PageType::Category => "CATEGORY",
            PageType::Attraction => "ATTRACTION",
            PageType::Guide => "GUIDE",
        }
    }
}

impl std::fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
