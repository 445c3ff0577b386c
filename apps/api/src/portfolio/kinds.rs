use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{require_text, Record};
use crate::models::portfolio::{
    GithubContributionInput, GithubContributionRow, GithubProjectInput, GithubProjectRow,
    GithubSkillInput, GithubSkillRow, ResumeInput, ResumeRow,
};

#[async_trait]
impl Record for ResumeRow {
    type Input = ResumeInput;

    const TABLE: &'static str = "resumes";
    const ID_COLUMN: &'static str = "resume_id";
    const LABEL: &'static str = "Resume";

    fn id(&self) -> Uuid {
        self.resume_id
    }

    fn validate(input: &ResumeInput) -> Result<(), String> {
        if input.resume_json.is_null() {
            return Err("resume_json is required".to_string());
        }
        Ok(())
    }

    async fn insert(pool: &PgPool, input: &ResumeInput) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO resumes (resume_id, user_id, resume_json, career_goal)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.user_id)
        .bind(&input.resume_json)
        .bind(&input.career_goal)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &ResumeInput,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE resumes SET user_id = $1, resume_json = $2, career_goal = $3
            WHERE resume_id = $4
            RETURNING *
            "#,
        )
        .bind(input.user_id)
        .bind(&input.resume_json)
        .bind(&input.career_goal)
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl Record for GithubProjectRow {
    type Input = GithubProjectInput;

    const TABLE: &'static str = "github_projects";
    const ID_COLUMN: &'static str = "project_id";
    const LABEL: &'static str = "Project";

    fn id(&self) -> Uuid {
        self.project_id
    }

    fn validate(input: &GithubProjectInput) -> Result<(), String> {
        require_text("project_name", &input.project_name)?;
        if let Some(score) = input.relevance_score {
            if !(0.0..=100.0).contains(&score) {
                return Err(format!("relevance_score must be within 0..=100, got {score}"));
            }
        }
        if input.technologies.iter().any(|t| t.trim().is_empty()) {
            return Err("technologies must not contain empty entries".to_string());
        }
        Ok(())
    }

    async fn insert(pool: &PgPool, input: &GithubProjectInput) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO github_projects
                (project_id, user_id, project_name, description, technologies,
                 impact, relevance_score, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.user_id)
        .bind(&input.project_name)
        .bind(&input.description)
        .bind(Json(&input.technologies))
        .bind(&input.impact)
        .bind(input.relevance_score)
        .bind(input.last_updated)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &GithubProjectInput,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE github_projects
            SET user_id = $1, project_name = $2, description = $3, technologies = $4,
                impact = $5, relevance_score = $6, last_updated = $7
            WHERE project_id = $8
            RETURNING *
            "#,
        )
        .bind(input.user_id)
        .bind(&input.project_name)
        .bind(&input.description)
        .bind(Json(&input.technologies))
        .bind(&input.impact)
        .bind(input.relevance_score)
        .bind(input.last_updated)
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl Record for GithubSkillRow {
    type Input = GithubSkillInput;

    const TABLE: &'static str = "github_skills";
    const ID_COLUMN: &'static str = "skill_id";
    const LABEL: &'static str = "Skill";

    fn id(&self) -> Uuid {
        self.skill_id
    }

    fn validate(input: &GithubSkillInput) -> Result<(), String> {
        require_text("skill_name", &input.skill_name)
    }

    async fn insert(pool: &PgPool, input: &GithubSkillInput) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO github_skills (skill_id, user_id, skill_name, category) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(input.user_id)
        .bind(&input.skill_name)
        .bind(&input.category)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &GithubSkillInput,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE github_skills SET user_id = $1, skill_name = $2, category = $3 WHERE skill_id = $4 RETURNING *",
        )
        .bind(input.user_id)
        .bind(&input.skill_name)
        .bind(&input.category)
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl Record for GithubContributionRow {
    type Input = GithubContributionInput;

    const TABLE: &'static str = "github_contributions";
    const ID_COLUMN: &'static str = "contribution_id";
    const LABEL: &'static str = "Contribution";

    fn id(&self) -> Uuid {
        self.contribution_id
    }

    fn validate(input: &GithubContributionInput) -> Result<(), String> {
        require_text("repo_name", &input.repo_name)
    }

    async fn insert(pool: &PgPool, input: &GithubContributionInput) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO github_contributions (contribution_id, user_id, repo_name, pr_title, pr_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.user_id)
        .bind(&input.repo_name)
        .bind(&input.pr_title)
        .bind(input.pr_date)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &GithubContributionInput,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE github_contributions
            SET user_id = $1, repo_name = $2, pr_title = $3, pr_date = $4
            WHERE contribution_id = $5
            RETURNING *
            "#,
        )
        .bind(input.user_id)
        .bind(&input.repo_name)
        .bind(&input.pr_title)
        .bind(input.pr_date)
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
