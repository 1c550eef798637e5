use std::collections::{HashMap, HashSet};

use futures::StreamExt;

use crate::data_models::{Connection, Job};
use crate::finder::NetworkFinder;
use crate::search::SearchProvider;

/// How many employer cascades may run at once. Tiers inside one cascade
/// stay strictly sequential.
const DEFAULT_CONCURRENCY: usize = 4;

/// Finds connections for a whole batch of job postings, paying the search
/// cost once per distinct employer no matter how many postings share it.
pub struct BatchNetworkFinder<P> {
    finder: NetworkFinder<P>,
    concurrency: usize,
}

impl<P: SearchProvider> BatchNetworkFinder<P> {
    pub fn new(finder: NetworkFinder<P>) -> BatchNetworkFinder<P> {
        BatchNetworkFinder {
            finder,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn find_for_jobs(
        &self,
        jobs: &[Job],
        connections_per_job: usize,
        job_skills: &[String],
    ) -> HashMap<String, Vec<Connection>> {
        // group by trimmed employer; the first posting's title sets the
        // scoring context for the whole group
        let mut seen: HashSet<String> = HashSet::new();
        let mut companies: Vec<(String, String)> = Vec::new();
        for job in jobs {
            let company = job.company.trim().to_string();
            if company.is_empty() || !seen.insert(company.clone()) {
                continue;
            }
            companies.push((company, job.title.clone()));
        }

        futures::stream::iter(companies.into_iter().map(|(company, title)| async move {
            log::info!("finding connections at {company}");
            let result = self
                .finder
                .find_connections_tiered(&company, connections_per_job, &title, job_skills, true)
                .await;

            let stats = &result.tier_stats;
            log::info!(
                "{company}: {} primary, {} peer, {} skilled, {} other",
                stats.tier_1_count,
                stats.tier_2_count,
                stats.tier_3_count,
                stats.tier_4_count
            );
            (company, result.connections)
        }))
        .buffer_unordered(self.concurrency)
        .collect()
        .await
    }
}
