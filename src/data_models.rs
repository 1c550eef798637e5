use serde::{Deserialize, Serialize};

/// Tier labels, in priority order.
pub const PRIMARY_ALUMNI: &str = "Primary Alumni";
pub const PEER_ALUMNI: &str = "Peer Alumni";
pub const SKILLED_EMPLOYEE: &str = "Skilled Employee";
pub const COMPANY_EMPLOYEE: &str = "Company Employee";

/// One raw hit from the search provider.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RawResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Connection {
    pub name: String,
    /// Current role title as stated in the search hit.
    pub title: String,
    pub current_company: String,
    /// Dedup key within one cascade run.
    pub profile_link: String,
    pub snippet: String,
    pub connection_type: String,
    pub tier: u8,
    pub confidence: u8,

    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub skill_match_score: f64,
    #[serde(default)]
    pub seniority_score: f64,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub detected_seniority: u8,
}

impl Connection {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        title: String,
        current_company: String,
        profile_link: String,
        snippet: String,
        connection_type: String,
        tier: u8,
        confidence: u8,
    ) -> Connection {
        Connection {
            name,
            title,
            current_company,
            profile_link,
            snippet,
            connection_type,
            tier,
            confidence,
            quality_score: 0.0, // will be populated later by scorer.
            skill_match_score: 0.0,
            seniority_score: 0.0,
            relevance_score: 0.0,
            detected_seniority: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TierStats {
    pub tier_1_count: usize,
    pub tier_2_count: usize,
    pub tier_3_count: usize,
    pub tier_4_count: usize,
}

/// Outcome of one cascade run for a single employer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TierSearchResult {
    pub connections: Vec<Connection>,
    /// Accepted candidates across all tiers before the final cap.
    pub total_found: usize,
    pub tier_stats: TierStats,
    pub search_company: String,
    pub primary_institution: String,
}

/// One job posting as handed over by the job-search collaborator.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Job {
    pub company: String,
    pub title: String,
}

impl Job {
    pub fn new(company: String, title: String) -> Job {
        Job { company, title }
    }
}
