//! Tauri commands for movie search
//!
//! This module contains all Tauri commands that can be invoked from the frontend.
//! Each command returns the view model to render after the operation.

use tauri::State;

use crate::SessionState;
use moviesearch_core::{Notice, ViewModel};

/// Submit search text from the search box.
///
/// Identical text is ignored; blank text clears the search.
#[tauri::command]
pub async fn search_movies(
    state: State<'_, SessionState>,
    query: String,
) -> Result<ViewModel, String> {
    Ok(state.session().submit_query(&query).await)
}

/// Jump to a page (paged mode).
///
/// # Returns
/// * `Err(String)` if the page is out of range or the app runs in load-more mode
#[tauri::command]
pub async fn go_to_page(state: State<'_, SessionState>, page: u32) -> Result<ViewModel, String> {
    state
        .session()
        .go_to_page(page)
        .await
        .map_err(|e| e.to_string())
}

/// Advance one page (paged mode).
#[tauri::command]
pub async fn next_page(state: State<'_, SessionState>) -> Result<ViewModel, String> {
    state.session().next_page().await.map_err(|e| e.to_string())
}

/// Go back one page (paged mode).
#[tauri::command]
pub async fn previous_page(state: State<'_, SessionState>) -> Result<ViewModel, String> {
    state
        .session()
        .previous_page()
        .await
        .map_err(|e| e.to_string())
}

/// Append the next page of results (load-more mode).
#[tauri::command]
pub async fn load_more(state: State<'_, SessionState>) -> Result<ViewModel, String> {
    state.session().load_more().await.map_err(|e| e.to_string())
}

/// Refetch the current page after a failed search.
#[tauri::command]
pub async fn retry_search(state: State<'_, SessionState>) -> Result<ViewModel, String> {
    Ok(state.session().retry().await)
}

/// Open the detail overlay for a movie in the grid.
#[tauri::command]
pub async fn select_movie(
    state: State<'_, SessionState>,
    movie_id: u64,
) -> Result<ViewModel, String> {
    Ok(state.session().select_movie(movie_id).await)
}

/// Close the detail overlay.
#[tauri::command]
pub async fn close_movie(state: State<'_, SessionState>) -> Result<ViewModel, String> {
    Ok(state.session().close_movie().await)
}

/// Current view model, e.g. after a window reload.
#[tauri::command]
pub async fn current_view(state: State<'_, SessionState>) -> Result<ViewModel, String> {
    Ok(state.session().view().await)
}

/// Notices raised since the last call, for toast rendering.
#[tauri::command]
pub async fn take_notices(state: State<'_, SessionState>) -> Result<Vec<Notice>, String> {
    Ok(state.session().take_notices().await)
}
