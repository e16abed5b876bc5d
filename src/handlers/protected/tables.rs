// GET /tables?search=<term>

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};

use crate::error::ConsoleError;
use crate::handlers::redirect_with;
use crate::middleware::SessionUser;
use crate::router::AppState;
use crate::views;

use super::SearchQuery;

/// List the schema's tables. A rejected search term still lists everything,
/// with a warning; an execution error renders an empty list.
pub async fn list_tables(
    State(state): State<AppState>,
    SessionUser { credentials, session }: SessionUser,
    Query(query): Query<SearchQuery>,
) -> Response {
    let outcome = state.browser.list_tables(&credentials, &query.search).await;

    let (tables, notice) = match outcome {
        Ok(listing) => (listing.tables, listing.notice),
        Err(e @ ConsoleError::Connection) => {
            e.log();
            return redirect_with(session, e.flash(), "/login");
        }
        Err(e) => {
            e.log();
            (vec![], Some(e.flash()))
        }
    };

    let (session, mut flashes) = session.take_flashes();
    flashes.extend(notice);
    let page = views::tables_page(
        &credentials.username,
        state.browser.schema(),
        &tables,
        &query.search,
        &flashes,
    );
    (session, Html(page)).into_response()
}
