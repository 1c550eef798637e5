use std::collections::HashSet;

use crate::data_models::Connection;

/// Keyword vocabulary for inferring a seniority level from a role title.
const SENIORITY_LEVELS: &[(&str, u8)] = &[
    ("intern", 1),
    ("trainee", 1),
    ("junior", 2),
    ("associate", 2),
    ("analyst", 2),
    ("engineer", 3),
    ("developer", 3),
    ("senior", 4),
    ("lead", 5),
    ("staff", 5),
    ("principal", 6),
    ("manager", 6),
    ("director", 7),
    ("head", 7),
    ("vp", 8),
    ("vice president", 8),
    ("cto", 9),
    ("ceo", 9),
    ("founder", 9),
    ("co-founder", 9),
    ("chief", 9),
];

/// Assumed mid-level when a title matches no seniority keyword.
const DEFAULT_SENIORITY: u8 = 3;

/// Scores how good a candidate is as a referral contact for one job context.
///
/// Pure given its inputs: no I/O, no state beyond the candidate it annotates.
pub struct ConnectionScorer {
    job_title: String,
    job_skills: Vec<String>,
    target_seniority: u8,
}

impl ConnectionScorer {
    pub fn new(job_title: &str, job_skills: &[String], target_seniority: u8) -> ConnectionScorer {
        ConnectionScorer {
            job_title: job_title.to_lowercase(),
            job_skills: job_skills.iter().map(|s| s.to_lowercase()).collect(),
            target_seniority,
        }
    }

    /// Highest level among matched keywords, mid-level when nothing matches.
    pub fn extract_seniority(title: &str) -> u8 {
        let title_lower = title.to_lowercase();
        SENIORITY_LEVELS
            .iter()
            .filter(|(keyword, _)| title_lower.contains(keyword))
            .map(|&(_, level)| level)
            .max()
            .unwrap_or(DEFAULT_SENIORITY)
    }

    /// Fraction of the job's skills mentioned in the profile text.
    fn skill_match(&self, profile_text: &str) -> f64 {
        if self.job_skills.is_empty() {
            return 0.5;
        }
        let profile_lower = profile_text.to_lowercase();
        let matched = self
            .job_skills
            .iter()
            .filter(|skill| profile_lower.contains(skill.as_str()))
            .count();
        matched as f64 / self.job_skills.len() as f64
    }

    /// Word overlap between the job title and the candidate's role title.
    fn role_relevance(&self, title: &str) -> f64 {
        let job_words: HashSet<&str> = self.job_title.split_whitespace().collect();
        if job_words.is_empty() {
            return 0.5;
        }
        let title_lower = title.to_lowercase();
        let title_words: HashSet<&str> = title_lower.split_whitespace().collect();
        let common = job_words.intersection(&title_words).count();
        common as f64 / job_words.len() as f64
    }

    /// People at or above the target seniority make the best referrers.
    fn seniority_fit(&self, title: &str) -> f64 {
        let profile_seniority = Self::extract_seniority(title);
        if profile_seniority >= self.target_seniority {
            1.0
        } else if profile_seniority + 1 == self.target_seniority {
            0.7
        } else {
            0.4
        }
    }

    /// Attaches the four derived scores to the candidate.
    pub fn score(&self, mut conn: Connection) -> Connection {
        let profile_text = format!("{} {}", conn.title, conn.snippet);

        let skill_match = self.skill_match(&profile_text);
        let seniority_fit = self.seniority_fit(&conn.title);
        let role_relevance = self.role_relevance(&conn.title);

        // weighted quality score
        let quality = seniority_fit * 40.0 + skill_match * 35.0 + role_relevance * 25.0;

        conn.quality_score = round1(quality);
        conn.skill_match_score = round1(skill_match * 100.0);
        conn.seniority_score = round1(seniority_fit * 100.0);
        conn.relevance_score = round1(role_relevance * 100.0);
        conn.detected_seniority = Self::extract_seniority(&conn.title);
        conn
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
fn candidate(role: &str, snippet: &str) -> Connection {
    Connection::new(
        "Test Person".into(),
        role.into(),
        "Acme".into(),
        "https://linkedin.com/in/test".into(),
        snippet.into(),
        "Primary Alumni".into(),
        1,
        50,
    )
}

#[test]
fn test_extract_seniority_levels() {
    assert_eq!(ConnectionScorer::extract_seniority("Software Intern"), 1);
    assert_eq!(ConnectionScorer::extract_seniority("Junior Analyst"), 2);
    assert_eq!(ConnectionScorer::extract_seniority("Software Engineer"), 3);
    assert_eq!(ConnectionScorer::extract_seniority("Senior Developer"), 4);
    assert_eq!(ConnectionScorer::extract_seniority("Staff Engineer"), 5);
    assert_eq!(ConnectionScorer::extract_seniority("Engineering Manager"), 6);
    assert_eq!(ConnectionScorer::extract_seniority("Head of Platform"), 7);
    assert_eq!(ConnectionScorer::extract_seniority("VP Engineering"), 8);
    assert_eq!(ConnectionScorer::extract_seniority("Co-Founder and CTO"), 9);
    // no keyword at all
    assert_eq!(ConnectionScorer::extract_seniority("Ninja"), 3);
}

#[test]
fn test_extract_seniority_takes_maximum_keyword() {
    // both "engineer" (3) and "director" (7) match
    assert_eq!(
        ConnectionScorer::extract_seniority("Director of Engineering, ex-engineer"),
        7
    );
}

#[test]
fn test_seniority_fit_bands() {
    let scorer = ConnectionScorer::new("", &[], 3);
    let at_target = scorer.score(candidate("Software Engineer", ""));
    assert_eq!(at_target.seniority_score, 100.0);

    let one_below = scorer.score(candidate("Junior Analyst", ""));
    assert_eq!(one_below.seniority_score, 70.0);

    let far_below = scorer.score(candidate("Intern", ""));
    assert_eq!(far_below.seniority_score, 40.0);

    let above = scorer.score(candidate("VP Engineering", ""));
    assert_eq!(above.seniority_score, 100.0);
}

#[test]
fn test_skill_match_fraction() {
    let skills = vec!["Rust".to_string(), "Python".to_string(), "Kafka".to_string()];
    let scorer = ConnectionScorer::new("", &skills, 3);

    let conn = scorer.score(candidate("Engineer", "Building services in rust and python"));
    assert!((conn.skill_match_score - 66.7).abs() < 0.05);

    let none = scorer.score(candidate("Engineer", "Completely unrelated background"));
    assert_eq!(none.skill_match_score, 0.0);
}

#[test]
fn test_defaults_with_empty_job_context() {
    let scorer = ConnectionScorer::new("", &[], 3);
    let conn = scorer.score(candidate("Senior Engineer", "some snippet"));

    // skill match and role relevance both fall back to 0.5
    assert_eq!(conn.skill_match_score, 50.0);
    assert_eq!(conn.relevance_score, 50.0);
    // quality collapses to seniority_fit*40 + 30
    assert_eq!(conn.quality_score, 70.0);
}

#[test]
fn test_role_relevance_word_overlap() {
    let scorer = ConnectionScorer::new("Backend Software Engineer", &[], 3);
    let conn = scorer.score(candidate("Software Engineer", ""));
    // 2 of 3 job-title words overlap
    assert!((conn.relevance_score - 66.7).abs() < 0.05);

    let miss = scorer.score(candidate("Sales Representative", ""));
    assert_eq!(miss.relevance_score, 0.0);
}

#[test]
fn test_quality_score_bounds() {
    let skills = vec!["rust".to_string()];
    let scorer = ConnectionScorer::new("senior rust engineer", &skills, 3);

    // everything matches: must cap at 100
    let best = scorer.score(candidate("senior rust engineer", "rust expert"));
    assert_eq!(best.quality_score, 100.0);

    // nothing matches: still non-negative, floored by the 0.4 seniority band
    let worst = scorer.score(candidate("Intern", ""));
    assert!(worst.quality_score >= 0.0);
    assert_eq!(worst.quality_score, 16.0);

    for conn in [best, worst] {
        assert!(conn.quality_score >= 0.0 && conn.quality_score <= 100.0);
        assert!(conn.skill_match_score >= 0.0 && conn.skill_match_score <= 100.0);
        assert!(conn.seniority_score >= 0.0 && conn.seniority_score <= 100.0);
        assert!(conn.relevance_score >= 0.0 && conn.relevance_score <= 100.0);
    }
}
