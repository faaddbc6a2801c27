use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::issue::{Issue, Transition, UserId};
use crate::jira::JiraClient;

/// Failure talking to the tracker. Both kinds route the dashboard into its
/// error mode; the split only changes the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("tracker error: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_status() || error.is_decode() || error.is_builder() {
            return Self::Protocol(error.to_string());
        }
        Self::Transport(error.to_string())
    }
}

#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Issue>, FetchError>;
    async fn list_transitions(&self, issue_key: &str) -> Result<Vec<Transition>, FetchError>;
    async fn apply_transition(&self, issue_key: &str, transition_id: &str)
    -> Result<(), FetchError>;
    async fn assign(&self, issue_key: &str, user: &UserId) -> Result<(), FetchError>;
    async fn current_user(&self) -> Result<UserId, FetchError>;
}

pub type SharedTracker = Arc<dyn IssueTracker>;

#[async_trait]
impl IssueTracker for JiraClient {
    async fn search(&self, query: &str) -> Result<Vec<Issue>, FetchError> {
        self.search_issues(query).await
    }

    async fn list_transitions(&self, issue_key: &str) -> Result<Vec<Transition>, FetchError> {
        self.transitions(issue_key).await
    }

    async fn apply_transition(
        &self,
        issue_key: &str,
        transition_id: &str,
    ) -> Result<(), FetchError> {
        self.do_transition(issue_key, transition_id).await
    }

    async fn assign(&self, issue_key: &str, user: &UserId) -> Result<(), FetchError> {
        self.set_assignee(issue_key, user).await
    }

    async fn current_user(&self) -> Result<UserId, FetchError> {
        self.myself().await
    }
}
