//! # Resume Matcher & Ranker
//! Screens resumes against a job description (TF-IDF match score, skill
//! lexicon, experience years) and ranks batches by match score.
//!
//! Tiering is first-match-wins:
//! - score ≥ 70 and ≥ 5 skills → `highly_recommended`
//! - score ≥ 50 and ≥ 3 skills → `recommended`
//! - score ≥ 30                → `maybe`
//! - otherwise                 → `reject`

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::PatternTables;
use crate::similarity;
use crate::text::{anon_hash, is_blank, keyword_hits, round_to};

pub const UNKNOWN_RESUME_ID: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    HighlyRecommended,
    Recommended,
    Maybe,
    Reject,
}

impl Recommendation {
    pub fn from_scores(match_score: f64, skills_count: usize) -> Self {
        if match_score >= 70.0 && skills_count >= 5 {
            Recommendation::HighlyRecommended
        } else if match_score >= 50.0 && skills_count >= 3 {
            Recommendation::Recommended
        } else if match_score >= 30.0 {
            Recommendation::Maybe
        } else {
            Recommendation::Reject
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::HighlyRecommended => "highly_recommended",
            Recommendation::Recommended => "recommended",
            Recommendation::Maybe => "maybe",
            Recommendation::Reject => "reject",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub match_score: f64,
    pub skills_found: Vec<String>,
    pub skills_count: usize,
    pub experience_years: u32,
    pub recommendation: Recommendation,
}

impl ScreeningResult {
    fn rejected() -> Self {
        Self {
            match_score: 0.0,
            skills_found: Vec::new(),
            skills_count: 0,
            experience_years: 0,
            recommendation: Recommendation::Reject,
        }
    }
}

/// One resume in a ranking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeItem {
    #[serde(default = "unknown_id")]
    pub id: String,
    #[serde(default)]
    pub text: String,
}

fn unknown_id() -> String {
    UNKNOWN_RESUME_ID.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResume {
    pub resume_id: String,
    /// 1-based position after sorting by match score (descending, stable).
    pub rank: usize,
    #[serde(flatten)]
    pub result: ScreeningResult,
}

#[derive(Debug, Clone)]
pub struct ResumeScreener {
    tables: Arc<PatternTables>,
}

impl ResumeScreener {
    pub fn new(tables: Arc<PatternTables>) -> Self {
        Self { tables }
    }

    /// Skills from the lexicon present in `text` (case-insensitive), lexicon order.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        keyword_hits(&lowered, &self.tables.tech_skills)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Largest year count captured by any experience pattern; 0 when none match.
    pub fn extract_experience_years(&self, text: &str) -> u32 {
        let lowered = text.to_lowercase();
        self.tables
            .experience
            .iter()
            .flat_map(|re| re.captures_iter(&lowered))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }

    /// Screen one resume. Either input blank → zero result, `reject`.
    pub fn screen(&self, resume_text: &str, job_description: &str) -> ScreeningResult {
        if is_blank(resume_text) || is_blank(job_description) {
            return ScreeningResult::rejected();
        }

        let match_score = match similarity::tfidf_cosine(job_description, resume_text) {
            Ok(sim) => round_to(sim * 100.0, 2),
            Err(e) => {
                debug!(id = %anon_hash(resume_text), error = %e, "similarity unavailable; match score 0");
                0.0
            }
        };

        let skills_found = self.extract_skills(resume_text);
        let skills_count = skills_found.len();
        let experience_years = self.extract_experience_years(resume_text);
        let recommendation = Recommendation::from_scores(match_score, skills_count);

        debug!(
            id = %anon_hash(resume_text),
            match_score,
            skills_count,
            experience_years,
            recommendation = recommendation.as_str(),
            "resume screened"
        );

        ScreeningResult {
            match_score,
            skills_found,
            skills_count,
            experience_years,
            recommendation,
        }
    }

    /// Screen every resume, sort by match score (descending; ties keep input
    /// order) and assign 1-based ranks.
    pub fn rank(&self, resumes: &[ResumeItem], job_description: &str) -> Vec<RankedResume> {
        let mut ranked: Vec<RankedResume> = resumes
            .iter()
            .map(|r| RankedResume {
                resume_id: r.id.clone(),
                rank: 0,
                result: self.screen(&r.text, job_description),
            })
            .collect();

        // `sort_by` is stable
        ranked.sort_by(|a, b| b.result.match_score.total_cmp(&a.result.match_score));

        for (idx, r) in ranked.iter_mut().enumerate() {
            r.rank = idx + 1;
        }
        ranked
    }
}
