use std::collections::HashSet;

use crate::cache::ConnectionCache;
use crate::data_models::{
    COMPANY_EMPLOYEE, Connection, PEER_ALUMNI, PRIMARY_ALUMNI, SKILLED_EMPLOYEE, TierSearchResult,
    TierStats,
};
use crate::parser::ProfileParser;
use crate::scorer::ConnectionScorer;
use crate::search::SearchProvider;

/// Extra raw results requested from the provider beyond a tier's quota,
/// absorbing hits the parser drops.
const OVERFETCH: usize = 5;
/// Extra slots requested by fallback tiers to absorb cross-tier duplicate losses.
const DEDUP_BUFFER: usize = 3;
/// Referrers at or above mid-level are the sweet spot.
const TARGET_SENIORITY: u8 = 3;

/// Cascading four-tier search for referral contacts at one company:
/// primary-institution alumni, then peer alumni, then skill-matched
/// employees, then anyone. Lower tiers only run while the target count
/// is still short.
pub struct NetworkFinder<P> {
    primary_institution: String,
    peer_keyword: String,
    provider: P,
    parser: ProfileParser,
    cache: ConnectionCache,
}

impl<P: SearchProvider> NetworkFinder<P> {
    pub fn new(
        provider: P,
        cache: ConnectionCache,
        primary_institution: &str,
        peer_keyword: &str,
    ) -> NetworkFinder<P> {
        NetworkFinder {
            primary_institution: primary_institution.to_string(),
            peer_keyword: peer_keyword.to_string(),
            provider,
            parser: ProfileParser::new(peer_keyword),
            cache,
        }
    }

    pub fn primary_institution(&self) -> &str {
        &self.primary_institution
    }

    /// Runs one tier: serve parsed candidates from cache when fresh,
    /// otherwise search, parse, and cache the parsed list. Provider failures
    /// yield an empty tier and are not cached.
    async fn search_tier(
        &self,
        company: &str,
        query: &str,
        tier: u8,
        connection_type: &str,
        limit: usize,
    ) -> Vec<Connection> {
        let variant = format!("{query}_{tier}");

        if let Some(cached) = self.cache.get(company, &variant) {
            log::info!("tier {tier}: using cached results for {company}");
            return cached.into_iter().take(limit).collect();
        }

        let results = match self.provider.search(query, limit + OVERFETCH).await {
            Ok(results) => results,
            Err(e) => {
                log::error!("tier {tier}: search failed for {company}: {e:#}");
                return Vec::new();
            }
        };

        let connections: Vec<Connection> = results
            .iter()
            .filter_map(|item| self.parser.parse(item, connection_type, tier))
            .collect();

        if let Err(e) = self.cache.set(company, &variant, connections.clone()).await {
            log::error!("tier {tier}: could not persist cache for {company}: {e:#}");
        }

        connections.into_iter().take(limit).collect()
    }

    /// Accepts a tier's candidates into the running list, skipping profile
    /// links already seen and stopping at the target count. Returns how many
    /// were kept; tier statistics count kept candidates for every tier.
    fn accept(
        all: &mut Vec<Connection>,
        seen: &mut HashSet<String>,
        scorer: &ConnectionScorer,
        target_count: usize,
        candidates: Vec<Connection>,
    ) -> usize {
        let mut kept = 0;
        for conn in candidates {
            if all.len() >= target_count {
                break;
            }
            if seen.insert(conn.profile_link.clone()) {
                all.push(scorer.score(conn));
                kept += 1;
            }
        }
        kept
    }

    pub async fn find_connections_tiered(
        &self,
        company: &str,
        target_count: usize,
        job_title: &str,
        job_skills: &[String],
        include_employees: bool,
    ) -> TierSearchResult {
        let scorer = ConnectionScorer::new(job_title, job_skills, TARGET_SENIORITY);
        let company = company.trim();

        let mut all: Vec<Connection> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut stats = TierStats::default();

        // Tier 1: primary institution alumni, no quota check on acceptance
        log::info!(
            "searching {} alumni at {company}",
            self.primary_institution
        );
        let query = format!(
            r#"site:linkedin.com/in "{company}" "{}""#,
            self.primary_institution
        );
        for conn in self
            .search_tier(company, &query, 1, PRIMARY_ALUMNI, target_count)
            .await
        {
            // a provider may repeat a link within one response
            if seen.insert(conn.profile_link.clone()) {
                all.push(scorer.score(conn));
            }
        }
        stats.tier_1_count = all.len();

        // Tier 2: peer institution alumni, primary institution excluded
        if all.len() < target_count {
            log::info!("searching {} alumni at {company}", self.peer_keyword);
            let query = format!(
                r#"site:linkedin.com/in "{company}" "{}" -"{}""#,
                self.peer_keyword, self.primary_institution
            );
            let limit = target_count - all.len() + DEDUP_BUFFER;
            let tier2 = self.search_tier(company, &query, 2, PEER_ALUMNI, limit).await;
            stats.tier_2_count = Self::accept(&mut all, &mut seen, &scorer, target_count, tier2);
        }

        // Tier 3: employees matching the top job skills
        if all.len() < target_count && include_employees && !job_skills.is_empty() {
            log::info!("searching skilled employees at {company}");
            let skills_query = job_skills
                .iter()
                .take(3)
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(" OR ");
            let query = format!(r#"site:linkedin.com/in "{company}" ({skills_query})"#);
            let limit = target_count - all.len() + DEDUP_BUFFER;
            let tier3 = self
                .search_tier(company, &query, 3, SKILLED_EMPLOYEE, limit)
                .await;
            stats.tier_3_count = Self::accept(&mut all, &mut seen, &scorer, target_count, tier3);
        }

        // Tier 4: any employee
        if all.len() < target_count && include_employees {
            log::info!("searching employees at {company}");
            let query =
                format!(r#"site:linkedin.com/in "{company}" employee OR engineer OR manager"#);
            let limit = target_count - all.len() + DEDUP_BUFFER;
            let tier4 = self
                .search_tier(company, &query, 4, COMPANY_EMPLOYEE, limit)
                .await;
            stats.tier_4_count = Self::accept(&mut all, &mut seen, &scorer, target_count, tier4);
        }

        // one stable pass: tier ascending, quality descending within a tier
        all.sort_by(|a, b| {
            a.tier.cmp(&b.tier).then(
                b.quality_score
                    .partial_cmp(&a.quality_score)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });

        let total_found = all.len();
        all.truncate(target_count);

        TierSearchResult {
            connections: all,
            total_found,
            tier_stats: stats,
            search_company: company.to_string(),
            primary_institution: self.primary_institution.clone(),
        }
    }

    /// Convenience wrapper that returns only the ranked contact list.
    pub async fn find_people(
        &self,
        company: &str,
        limit: usize,
        job_title: &str,
        job_skills: &[String],
    ) -> Vec<Connection> {
        self.find_connections_tiered(company, limit, job_title, job_skills, true)
            .await
            .connections
    }
}
