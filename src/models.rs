//! Core data models for the link-equity engine
//!
//! These types form the engine's input and output contract: raw link facts
//! coming in from collaborating ingestion layers, and per-page results,
//! aggregates, and recommendations going out.

use serde::{Deserialize, Serialize};

/// Structural placement of an internal link on its source page.
///
/// Content and navigation links carry distinct redistribution weights.
/// Structural tags (canonical, hreflang, pagination, meta) never transmit
/// equity and are dropped during graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPosition {
    Content,
    Navigation,
    Other,
    /// Canonical, hreflang, pagination, or meta link. Filtered out entirely.
    Structural,
}

impl LinkPosition {
    /// Parse a crawler-reported position label.
    ///
    /// Accepts the English and French labels emitted by common crawl exports
    /// ("Content"/"Contenu", "Navigation", and the structural tags). Unknown
    /// labels fall back to `Other`.
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "content" | "contenu" => LinkPosition::Content,
            "navigation" => LinkPosition::Navigation,
            "canonical" | "canonique" | "hreflang" | "pagination" | "meta" => {
                LinkPosition::Structural
            }
            _ => LinkPosition::Other,
        }
    }

    /// Whether this position survives graph construction.
    pub fn is_countable(&self) -> bool {
        !matches!(self, LinkPosition::Structural)
    }
}

/// A raw directed edge fact supplied by the ingestion layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLink {
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub anchor: String,
    /// HTTP status of the destination as observed by the crawler.
    pub status_code: u16,
    pub position: LinkPosition,
}

impl RawLink {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        anchor: impl Into<String>,
        status_code: u16,
        position: LinkPosition,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            anchor: anchor.into(),
            status_code,
            position,
        }
    }
}

/// Per-keyword external search performance for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordStat {
    pub query: String,
    pub clicks: u64,
    pub impressions: u64,
    /// Average ranking position (1 = top result).
    pub position: f64,
}

/// External search-performance aggregate for one URL.
///
/// Used only by the recommendation rules; the distribution algorithm itself
/// never reads this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPerformance {
    pub total_clicks: u64,
    pub total_impressions: u64,
    pub keywords: Vec<KeywordStat>,
}

/// Counts of internal links a page received, split by position.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LinksReceived {
    pub total: u32,
    pub content: u32,
    pub navigation: u32,
}

/// An anchor text and how many inbound links carried it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnchorCount {
    pub anchor: String,
    pub count: u32,
}

/// Final per-page record after distribution and normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub url: String,
    /// Normalized equity score in `[0, ceiling]`.
    pub score: f64,
    pub backlinks_count: u32,
    pub internal_links_received: LinksReceived,
    pub internal_links_sent: u32,
    pub status_code: u16,
    pub is_error: bool,
    pub category: String,
    /// Top 3 inbound anchor texts by frequency.
    pub top_anchors: Vec<AnchorCount>,
}

/// Rollup of pages sharing a derived category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub total_score: f64,
    pub avg_score: f64,
}

/// Sum of normalized equity parked on each status-code class.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusJuice {
    pub ok: f64,
    pub redirect_3xx: f64,
    pub client_error_4xx: f64,
    pub server_error_5xx: f64,
    pub other: f64,
}

impl StatusJuice {
    pub fn add(&mut self, status_code: u16, score: f64) {
        match status_code {
            200 => self.ok += score,
            300..=399 => self.redirect_3xx += score,
            400..=499 => self.client_error_4xx += score,
            500..=599 => self.server_error_5xx += score,
            _ => self.other += score,
        }
    }
}

/// Priority levels for recommendations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

/// A concrete supporting example attached to a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub url: String,
    /// Short human-readable evidence ("12 inbound links", "rank 7.2, 840 impressions").
    pub detail: String,
}

/// An actionable internal-linking recommendation produced by one rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stable rule identifier, e.g. `"error-leakage"`.
    pub id: String,
    pub priority: Priority,
    pub category: String,
    pub title: String,
    pub description: String,
    /// Quantified impact statement.
    pub impact: String,
    /// Capped list of supporting examples.
    pub examples: Vec<Example>,
}

/// Echo of the configuration an analysis ran with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub backlink_score: f64,
    pub transmission_rate: f64,
    pub content_weight: f64,
    pub navigation_weight: f64,
    pub max_iterations: u32,
    pub tolerance: f64,
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Per-page records, sorted by score descending.
    pub pages: Vec<PageResult>,
    pub total_pages: usize,
    /// Surviving internal edges after filtering.
    pub total_internal_links: usize,
    pub total_backlinks: u64,
    /// Detected dominant domain, if any URL parsed.
    pub domain: Option<String>,
    pub iterations_run: u32,
    pub converged: bool,
    pub categories: std::collections::BTreeMap<String, CategoryStats>,
    pub status_juice: StatusJuice,
    pub median_score: f64,
    /// Pages with external backlinks, by backlink count descending.
    pub top_backlink_sources: Vec<PageResult>,
    /// Non-200 pages still receiving internal links, by links received descending.
    pub error_pages_with_links: Vec<PageResult>,
    /// Percentage of internal link volume pointing at error pages.
    pub leakage_rate: f64,
    pub recommendations: Vec<Recommendation>,
    pub config: ConfigSummary,
}

/// Score movement for one page after an incremental recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub url: String,
    pub old_score: f64,
    pub new_score: f64,
    pub delta: f64,
}
