// GET /table/:table_name?search=<term>

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};

use crate::database::ResultSet;
use crate::error::ConsoleError;
use crate::handlers::redirect_with;
use crate::middleware::SessionUser;
use crate::router::AppState;
use crate::views;

use super::SearchQuery;

/// Show a table's rows, optionally filtered across every column.
///
/// - invalid or unknown table: back to the table list
/// - no connection: back to the login page, session kept
/// - rejected search term: empty page with a warning, nothing queried
/// - execution error: empty page with the error
pub async fn view_table(
    State(state): State<AppState>,
    SessionUser { credentials, session }: SessionUser,
    Path(table_name): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let outcome = state
        .browser
        .view_table(&credentials, &table_name, &query.search)
        .await;

    let (result, notice) = match outcome {
        Ok(view) => (view.result, view.notice),
        Err(e @ (ConsoleError::InvalidTableName(_) | ConsoleError::TableNotFound(_))) => {
            e.log();
            return redirect_with(session, e.flash(), "/tables");
        }
        Err(e @ ConsoleError::Connection) => {
            e.log();
            return redirect_with(session, e.flash(), "/login");
        }
        Err(e @ ConsoleError::Execution(_)) => {
            e.log();
            (ResultSet::default(), Some(e.flash()))
        }
    };

    let (session, mut flashes) = session.take_flashes();
    flashes.extend(notice);
    let page = views::table_page(&credentials.username, &table_name, &result, &query.search, &flashes);
    (session, Html(page)).into_response()
}
