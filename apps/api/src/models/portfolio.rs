use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub resume_json: Value,
    pub career_goal: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GithubProjectRow {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub project_name: String,
    pub description: Option<String>,
    pub technologies: Value,
    pub impact: Option<String>,
    pub relevance_score: Option<f64>,
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GithubSkillRow {
    pub skill_id: Uuid,
    pub user_id: Uuid,
    pub skill_name: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GithubContributionRow {
    pub contribution_id: Uuid,
    pub user_id: Uuid,
    pub repo_name: String,
    pub pr_title: Option<String>,
    pub pr_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeInput {
    pub user_id: Uuid,
    pub resume_json: Value,
    pub career_goal: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubProjectInput {
    pub user_id: Uuid,
    pub project_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub impact: Option<String>,
    pub relevance_score: Option<f64>,
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubSkillInput {
    pub user_id: Uuid,
    pub skill_name: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubContributionInput {
    pub user_id: Uuid,
    pub repo_name: String,
    pub pr_title: Option<String>,
    pub pr_date: Option<NaiveDate>,
}
