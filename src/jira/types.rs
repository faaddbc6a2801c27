use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiErrorBody {
    #[serde(default, rename = "errorMessages")]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiUser {
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

impl ApiUser {
    pub fn label(&self) -> Option<String> {
        self.display_name
            .clone()
            .or_else(|| self.name.clone())
            .or_else(|| self.account_id.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiStatus {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiWatches {
    #[serde(rename = "watchCount")]
    pub watch_count: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiIssueFields {
    #[serde(default)]
    pub summary: String,
    pub description: Option<String>,
    pub creator: Option<ApiUser>,
    pub assignee: Option<ApiUser>,
    pub status: Option<ApiStatus>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    pub watches: Option<ApiWatches>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiIssue {
    pub key: String,
    pub fields: ApiIssueFields,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSearchPage {
    #[serde(default)]
    pub issues: Vec<ApiIssue>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiTransition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiTransitions {
    #[serde(default)]
    pub transitions: Vec<ApiTransition>,
}
