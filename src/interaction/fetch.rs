//! Paginated traversal of a project board's items.

use tracing::{debug, instrument, warn};

use crate::{
    base::types::{ItemsPageRequest, PageInfo, ProjectItem, Res},
    service::project::ProjectClient,
};

/// Fetch every open issue with a due date from the project described by `request`.
///
/// Pages are requested one after another, starting at `request.after`, until
/// the project reports no further page. Items keep the order GitHub returns
/// them in. A page without the expected project root ends the traversal
/// without an error; any client error fails the whole fetch.
#[instrument(skip_all, fields(owner = %request.owner, project = request.project_number))]
pub async fn fetch_due_dated_items(projects: &ProjectClient, request: &ItemsPageRequest) -> Res<Vec<ProjectItem>> {
    let mut request = request.clone();
    let mut items = Vec::new();
    let mut pages = 0usize;

    loop {
        pages += 1;

        let Some(page) = projects.fetch_items_page(&request).await?.into_page() else {
            warn!(
                "No project #{} found under {} `{}`; treating the page as empty.",
                request.project_number, request.owner_type, request.owner
            );
            break;
        };

        items.extend(page.items.into_iter().filter(ProjectItem::is_open_with_due_date));

        match page.page_info {
            Some(PageInfo {
                has_next_page: true,
                end_cursor: Some(cursor),
            }) => request.after = Some(cursor),
            Some(PageInfo { has_next_page: true, end_cursor: None }) => {
                warn!("Project reported another page without a cursor; stopping.");
                break;
            }
            _ => break,
        }
    }

    debug!("Fetched {} page(s), kept {} item(s).", pages, items.len());

    Ok(items)
}
