//! PostgREST client for the hosted `tasks` table.

use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::models::{Task, TaskDraft};

/// Hosted table owning all task rows.
const TASKS_TABLE: &str = "tasks";

/// Prefer header asking PostgREST to echo the rows a mutation matched.
/// Existence is inferred solely from whether any row comes back.
const RETURN_REPRESENTATION: &str = "return=representation";

/// Client for the hosted persistence service.
///
/// Cheap to clone; the inner `reqwest::Client` is reference-counted and
/// its headers are fixed at construction.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    rest_url: String,
}

impl SupabaseStore {
    /// Build a store from the project base URL and service key.
    ///
    /// # Errors
    /// Returns error if the key is not a valid header value or the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(api_key).context("Invalid Supabase API key")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .context("Invalid Supabase API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1/{TASKS_TABLE}", base_url.trim_end_matches('/')),
        })
    }

    /// Fetch all task rows.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Task>> {
        let response = self
            .client
            .get(&self.rest_url)
            .query(&[("select", "*")])
            .send()
            .await
            .context("Failed to query persistence service")?;

        let tasks: Vec<Task> = Self::read_rows(response).await?;
        debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Insert a row; the service assigns the id.
    ///
    /// Returns the created row, or `None` if the service confirmed nothing.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn insert(&self, draft: &TaskDraft) -> Result<Option<Task>> {
        let response = self
            .client
            .post(&self.rest_url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(draft)
            .send()
            .await
            .context("Failed to insert task")?;

        Ok(Self::read_rows::<Task>(response).await?.into_iter().next())
    }

    /// Look up a single task by id.
    #[instrument(skip(self))]
    pub async fn find(&self, id: i64) -> Result<Option<Task>> {
        let response = self
            .client
            .get(&self.rest_url)
            .query(&[("id", format!("eq.{id}")), ("select", "*".to_string())])
            .send()
            .await
            .context("Failed to query persistence service")?;

        Ok(Self::read_rows::<Task>(response).await?.into_iter().next())
    }

    /// Read only the `completed` flag of a task.
    #[instrument(skip(self))]
    pub async fn completed_of(&self, id: i64) -> Result<Option<bool>> {
        #[derive(Deserialize)]
        struct CompletedRow {
            completed: bool,
        }

        let response = self
            .client
            .get(&self.rest_url)
            .query(&[("id", format!("eq.{id}")), ("select", "completed".to_string())])
            .send()
            .await
            .context("Failed to query persistence service")?;

        let rows: Vec<CompletedRow> = Self::read_rows(response).await?;
        Ok(rows.into_iter().next().map(|r| r.completed))
    }

    /// Replace title and completed on a row.
    ///
    /// Returns the updated row, or `None` if no row matched the id.
    #[instrument(skip(self, draft))]
    pub async fn replace(&self, id: i64, draft: &TaskDraft) -> Result<Option<Task>> {
        let response = self
            .client
            .patch(&self.rest_url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(draft)
            .send()
            .await
            .context("Failed to update task")?;

        Ok(Self::read_rows::<Task>(response).await?.into_iter().next())
    }

    /// Write the completed flag alone, leaving title untouched.
    #[instrument(skip(self))]
    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<Option<Task>> {
        let response = self
            .client
            .patch(&self.rest_url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&json!({ "completed": completed }))
            .send()
            .await
            .context("Failed to update task")?;

        Ok(Self::read_rows::<Task>(response).await?.into_iter().next())
    }

    /// Delete a row, returning it if anything matched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<Option<Task>> {
        let response = self
            .client
            .delete(&self.rest_url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION)
            .send()
            .await
            .context("Failed to delete task")?;

        Ok(Self::read_rows::<Task>(response).await?.into_iter().next())
    }

    /// Decode matched rows, surfacing non-2xx statuses as errors.
    async fn read_rows<T: DeserializeOwned>(response: reqwest::Response) -> Result<Vec<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Persistence service returned error status {status}: {body}"
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse persistence service response")
    }
}
