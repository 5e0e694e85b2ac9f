//! The notification pass: find issues due tomorrow and comment on them.

use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info, instrument};

use crate::{
    base::{
        template::render_comment,
        types::{IssueContent, ItemsPageRequest, Res},
    },
    interaction::fetch::fetch_due_dated_items,
    runtime::Runtime,
};

/// Run one notification pass relative to `today`.
///
/// Returns the number of comments posted. Items are processed in order and
/// the first failed comment aborts the pass; comments already posted stay.
#[instrument(skip_all, fields(repository = %runtime.repository))]
pub async fn notify_due_tomorrow(runtime: &Runtime, today: NaiveDate) -> Res<usize> {
    let config = &runtime.config;
    let repository = &runtime.repository;

    // Validate before anything goes over the wire.
    let owner_type = config.owner_type()?;

    let request = ItemsPageRequest {
        owner_type,
        owner: repository.owner.clone(),
        project_number: config.project_id,
        due_date_field: config.due_date_field_name().to_string(),
        after: None,
    };

    let items = fetch_due_dated_items(&runtime.projects, &request).await?;

    info!("Found {} issues. Checking if they are due tomorrow...", items.len());
    debug!("{}", serde_json::to_string(&items)?);

    let fallback = config.fallback_assignee(&repository.owner);
    let mut posted = 0;

    for item in &items {
        let Some(issue) = &item.content else {
            continue;
        };

        let due_date = item.due_date.as_deref().unwrap_or_default();

        if !is_due_tomorrow(due_date, today) {
            info!("Issue {} is not due tomorrow", issue.number);
            continue;
        }

        let body = render_comment(&config.template, resolve_assignee(issue, fallback), due_date);

        runtime.issues.create_comment(&repository.owner, &repository.name, issue.number, &body).await?;
        posted += 1;
    }

    Ok(posted)
}

/// The first assignee of the issue, or `fallback` when it has none.
pub fn resolve_assignee<'a>(issue: &'a IssueContent, fallback: &'a str) -> &'a str {
    issue.assignees.first().map(String::as_str).unwrap_or(fallback)
}

/// Whether `due_date` falls on the calendar day after `today`.
///
/// Accepts plain `YYYY-MM-DD` dates and RFC 3339 timestamps; the latter are
/// converted to the local time zone first. Anything else is never due.
pub fn is_due_tomorrow(due_date: &str, today: NaiveDate) -> bool {
    let Some(tomorrow) = today.succ_opt() else {
        return false;
    };

    parse_due_date(due_date) == Some(tomorrow)
}

fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.with_timezone(&Local).date_naive())
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::base::types::IssueState;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_due_tomorrow_plain_dates() {
        let today = date(2024, 5, 1);

        assert!(is_due_tomorrow("2024-05-02", today));
        assert!(!is_due_tomorrow("2024-05-01", today));
        assert!(!is_due_tomorrow("2024-05-03", today));
        assert!(!is_due_tomorrow("2024-04-30", today));
    }

    #[test]
    fn test_is_due_tomorrow_crosses_boundaries() {
        assert!(is_due_tomorrow("2024-03-01", date(2024, 2, 29)));
        assert!(is_due_tomorrow("2025-01-01", date(2024, 12, 31)));
    }

    #[test]
    fn test_is_due_tomorrow_timestamps_use_local_zone() {
        let today = date(2024, 5, 1);
        let local_tomorrow_noon = Local.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();

        assert!(is_due_tomorrow(&local_tomorrow_noon.to_rfc3339(), today));
        assert!(!is_due_tomorrow(&(local_tomorrow_noon + chrono::Duration::days(1)).to_rfc3339(), today));
    }

    #[test]
    fn test_is_due_tomorrow_garbage() {
        let today = date(2024, 5, 1);

        assert!(!is_due_tomorrow("", today));
        assert!(!is_due_tomorrow("tomorrow", today));
        assert!(!is_due_tomorrow("2024-13-02", today));
    }

    #[test]
    fn test_resolve_assignee() {
        let assigned = IssueContent {
            number: 1,
            state: IssueState::Open,
            assignees: vec!["bob".to_string(), "carol".to_string()],
        };
        let unassigned = IssueContent {
            number: 2,
            state: IssueState::Open,
            assignees: vec![],
        };

        assert_eq!(resolve_assignee(&assigned, "alice"), "bob");
        assert_eq!(resolve_assignee(&unassigned, "alice"), "alice");
    }
}
