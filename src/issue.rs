use std::collections::HashMap;
use std::fmt::Write;

use chrono::DateTime;
use thiserror::Error;

use crate::config::Column;

const TRACKER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub description: Option<String>,
    pub creator: String,
    pub assignee: Option<String>,
    pub status: String,
    pub created: String,
    pub updated: String,
    pub watchers: Option<u32>,
    pub permalink: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserId {
    Account(String),
    Name(String),
}

impl UserId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Account(value) | Self::Name(value) => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSnapshot {
    pub alias: String,
    pub query: String,
    pub issues: Vec<Issue>,
}

impl IssueSnapshot {
    pub fn new(alias: impl Into<String>, query: impl Into<String>, issues: Vec<Issue>) -> Self {
        Self {
            alias: alias.into(),
            query: query.into(),
            issues,
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Issue> {
        self.issues.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderFault {
    #[error("{key}: unreadable {field} timestamp `{raw}`")]
    Timestamp {
        key: String,
        field: &'static str,
        raw: String,
    },
    #[error("{key}: date format produced no output")]
    DateFormat { key: String },
}

/// One formatted cell per configured column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRecord {
    cells: HashMap<Column, String>,
}

impl DisplayRecord {
    pub fn cell(&self, column: Column) -> &str {
        self.cells.get(&column).map(String::as_str).unwrap_or(MISSING)
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[(Column, &str)]) -> Self {
        Self {
            cells: cells
                .iter()
                .map(|(column, value)| (*column, value.to_string()))
                .collect(),
        }
    }
}

pub fn format_issue(
    issue: &Issue,
    columns: &[Column],
    date_format: &str,
) -> Result<DisplayRecord, RenderFault> {
    let mut cells = HashMap::with_capacity(columns.len());
    for column in columns {
        let value = match column {
            Column::Key => issue.key.clone(),
            Column::Summary => single_line(&issue.summary),
            Column::Status => issue.status.clone(),
            Column::Assignee => issue
                .assignee
                .clone()
                .unwrap_or_else(|| "unassigned".to_string()),
            Column::Creator => issue.creator.clone(),
            Column::Created => format_timestamp(&issue.key, "created", &issue.created, date_format)?,
            Column::Updated => format_timestamp(&issue.key, "updated", &issue.updated, date_format)?,
            Column::Watchers => issue
                .watchers
                .map(|count| count.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        };
        cells.insert(*column, value);
    }
    Ok(DisplayRecord { cells })
}

pub fn format_timestamp(
    key: &str,
    field: &'static str,
    raw: &str,
    date_format: &str,
) -> Result<String, RenderFault> {
    if raw.trim().is_empty() {
        return Ok(MISSING.to_string());
    }
    let parsed = DateTime::parse_from_str(raw.trim(), TRACKER_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw.trim()))
        .map_err(|_| RenderFault::Timestamp {
            key: key.to_string(),
            field,
            raw: raw.to_string(),
        })?;
    let mut formatted = String::new();
    write!(formatted, "{}", parsed.format(date_format)).map_err(|_| RenderFault::DateFormat {
        key: key.to_string(),
    })?;
    Ok(formatted)
}

fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
pub(crate) fn test_issue(key: &str, summary: &str) -> Issue {
    Issue {
        key: key.to_string(),
        summary: summary.to_string(),
        description: None,
        creator: "alex".to_string(),
        assignee: None,
        status: "Open".to_string(),
        created: "2024-03-01T09:15:00.000+0000".to_string(),
        updated: "2024-03-02T17:45:30.123+0100".to_string(),
        watchers: Some(2),
        permalink: format!("https://example.atlassian.net/browse/{}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderFault, format_issue, format_timestamp, test_issue};
    use crate::config::Column;

    #[test]
    fn formats_every_column_with_placeholders_for_missing_fields() {
        let mut issue = test_issue("OPS-1", "Fix   the\nbuild");
        issue.watchers = None;
        let columns = [
            Column::Key,
            Column::Summary,
            Column::Assignee,
            Column::Watchers,
            Column::Created,
        ];

        let record = format_issue(&issue, &columns, "%Y-%m-%d").expect("format issue");

        assert_eq!(record.cell(Column::Key), "OPS-1");
        assert_eq!(record.cell(Column::Summary), "Fix the build");
        assert_eq!(record.cell(Column::Assignee), "unassigned");
        assert_eq!(record.cell(Column::Watchers), "-");
        assert_eq!(record.cell(Column::Created), "2024-03-01");
        assert_eq!(record.cell(Column::Status), "-");
    }

    #[test]
    fn formats_timestamps_in_both_tracker_and_rfc3339_shapes() {
        let tracker = format_timestamp("A-1", "updated", "2024-03-02T17:45:30.123+0100", "%H:%M")
            .expect("tracker shape");
        assert_eq!(tracker, "17:45");

        let rfc = format_timestamp("A-1", "updated", "2024-03-02T08:05:00Z", "%d/%m %H:%M")
            .expect("rfc3339 shape");
        assert_eq!(rfc, "02/03 08:05");

        let empty = format_timestamp("A-1", "updated", "  ", "%H:%M").expect("empty");
        assert_eq!(empty, "-");
    }

    #[test]
    fn malformed_timestamp_is_a_render_fault() {
        let mut issue = test_issue("OPS-2", "Broken");
        issue.updated = "yesterday".to_string();

        let fault = format_issue(&issue, &[Column::Updated], "%Y").expect_err("fault");

        assert_eq!(
            fault,
            RenderFault::Timestamp {
                key: "OPS-2".to_string(),
                field: "updated",
                raw: "yesterday".to_string(),
            }
        );
    }
}
