use tracing::debug;

use super::*;
use crate::issue::Issue;

const MAX_RESULTS: &str = "100";
const SEARCH_FIELDS: &str = "summary,description,creator,assignee,status,created,updated,watches";

impl JiraClient {
    pub async fn search_issues(&self, query: &str) -> Result<Vec<Issue>, FetchError> {
        let request = self.client.get(self.endpoint("search")).query(&[
            ("jql", query),
            ("maxResults", MAX_RESULTS),
            ("fields", SEARCH_FIELDS),
        ]);
        let page = self
            .send(request)
            .await?
            .json::<ApiSearchPage>()
            .await
            .map_err(|error| FetchError::Protocol(format!("unreadable search result: {}", error)))?;
        debug!(count = page.issues.len(), "search returned");

        Ok(page
            .issues
            .into_iter()
            .map(|issue| map_issue(&self.base_url, issue))
            .collect())
    }
}

pub(super) fn map_issue(base_url: &str, issue: ApiIssue) -> Issue {
    let fields = issue.fields;
    Issue {
        permalink: permalink(base_url, &issue.key),
        key: issue.key,
        summary: fields.summary,
        description: fields
            .description
            .filter(|description| !description.trim().is_empty()),
        creator: fields
            .creator
            .and_then(|user| user.label())
            .unwrap_or_else(|| "unknown".to_string()),
        assignee: fields.assignee.and_then(|user| user.label()),
        status: fields
            .status
            .map(|status| status.name)
            .unwrap_or_else(|| "unknown".to_string()),
        created: fields.created,
        updated: fields.updated,
        watchers: fields.watches.and_then(|watches| watches.watch_count),
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiSearchPage, map_issue};

    #[test]
    fn maps_search_payload_with_optional_fields() {
        let payload = r#"{
            "issues": [
                {
                    "key": "OPS-3",
                    "fields": {
                        "summary": "Rotate certs",
                        "description": "Step one\n\nStep two",
                        "creator": {"displayName": "Alex Doe", "accountId": "abc"},
                        "assignee": null,
                        "status": {"name": "In Progress"},
                        "created": "2024-03-01T09:15:00.000+0000",
                        "updated": "2024-03-02T09:15:00.000+0000",
                        "watches": {"watchCount": 4, "isWatching": false}
                    }
                },
                {
                    "key": "OPS-4",
                    "fields": {"summary": "Bare", "description": "   "}
                }
            ]
        }"#;
        let page: ApiSearchPage = serde_json::from_str(payload).expect("parse page");
        let issues = page
            .issues
            .into_iter()
            .map(|issue| map_issue("https://example.atlassian.net", issue))
            .collect::<Vec<_>>();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].creator, "Alex Doe");
        assert_eq!(issues[0].assignee, None);
        assert_eq!(issues[0].watchers, Some(4));
        assert_eq!(issues[0].description.as_deref(), Some("Step one\n\nStep two"));
        assert_eq!(issues[0].permalink, "https://example.atlassian.net/browse/OPS-3");
        assert_eq!(issues[1].status, "unknown");
        assert_eq!(issues[1].creator, "unknown");
        assert_eq!(issues[1].description, None);
        assert_eq!(issues[1].watchers, None);
    }
}
