//! Renderable view of the search state
//!
//! [`ViewModel`] is a pure function of [`SearchController`] state. A front end
//! draws exactly what it describes: loader, error indicator, movie grid,
//! pagination or "load more" control, and the detail overlay.

use serde::{Deserialize, Serialize};

use crate::config::PaginationMode;
use crate::controller::{QueryStatus, SearchController};
use crate::types::MovieSummary;

/// Pages shown around the current page
pub const PAGE_RANGE_DISPLAYED: u32 = 3;

/// Pages always shown at each end
pub const MARGIN_PAGES_DISPLAYED: u32 = 2;

/// Poster size used by the grid
const GRID_POSTER_SIZE: &str = "w500";

/// Backdrop size used by the detail overlay
const DETAIL_BACKDROP_SIZE: &str = "original";

/// One grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub poster_url: Option<String>,
}

impl From<&MovieSummary> for MovieCard {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url(GRID_POSTER_SIZE),
        }
    }
}

/// Content of the detail overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub backdrop_url: Option<String>,
}

impl From<&MovieSummary> for MovieDetail {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            backdrop_url: movie
                .backdrop_url(DETAIL_BACKDROP_SIZE)
                .or_else(|| movie.poster_url(DETAIL_BACKDROP_SIZE)),
        }
    }
}

/// Entry of a pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "page", rename_all = "snake_case")]
pub enum PageItem {
    Page(u32),
    /// Elided run of pages ("...")
    Break,
}

/// Numbered pagination bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationControl {
    pub current_page: u32,
    /// `min(total_pages, 500)`
    pub page_count: u32,
    pub items: Vec<PageItem>,
    pub has_previous: bool,
    pub has_next: bool,
    /// Set while a fetch is in flight
    pub disabled: bool,
}

impl PaginationControl {
    pub fn new(current_page: u32, page_count: u32, disabled: bool) -> Self {
        Self {
            current_page,
            page_count,
            items: page_items(current_page, page_count),
            has_previous: current_page > 1,
            has_next: current_page < page_count,
            disabled,
        }
    }
}

/// "Load more" button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadMoreControl {
    pub label: String,
    pub disabled: bool,
}

impl LoadMoreControl {
    pub fn new(fetching: bool) -> Self {
        let label = if fetching { "Loading..." } else { "Load more" };
        Self {
            label: label.to_string(),
            disabled: fetching,
        }
    }
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub query: String,
    pub page: u32,
    pub mode: PaginationMode,
    pub status: QueryStatus,
    /// Fetch in flight with nothing on screen yet
    pub show_loader: bool,
    pub show_error: bool,
    pub error_message: Option<String>,
    pub movies: Vec<MovieCard>,
    pub total_results: u32,
    pub pagination: Option<PaginationControl>,
    pub load_more: Option<LoadMoreControl>,
    pub selected: Option<MovieDetail>,
}

impl ViewModel {
    /// Derive the view from controller state.
    pub fn from_controller(controller: &SearchController) -> Self {
        let status = controller.status();
        let fetching = status == QueryStatus::Loading;
        let movies: Vec<MovieCard> = controller
            .visible_movies()
            .iter()
            .map(MovieCard::from)
            .collect();
        let page_count = controller.page_count();

        let pagination = match controller.mode() {
            PaginationMode::Paged if page_count > 1 => {
                Some(PaginationControl::new(controller.page(), page_count, fetching))
            }
            _ => None,
        };

        let load_more = match controller.mode() {
            PaginationMode::LoadMore
                if !movies.is_empty() && (controller.has_more() || fetching) =>
            {
                Some(LoadMoreControl::new(fetching))
            }
            _ => None,
        };

        Self {
            query: controller.query().to_string(),
            page: controller.page(),
            mode: controller.mode(),
            status,
            show_loader: fetching && movies.is_empty(),
            show_error: status == QueryStatus::Errored,
            error_message: controller.error().map(str::to_string),
            movies,
            total_results: controller.total_results(),
            pagination,
            load_more,
            selected: controller.selected().map(MovieDetail::from),
        }
    }
}

/// Lay out a pagination bar the way react-paginate does with a 3-page range
/// and 2 margin pages.
///
/// The range is split into fractional halves around the current page, so an
/// odd range stays centered. Positions are kept doubled to stay in integers.
///
/// # Example
/// ```
/// use moviesearch_core::view::{page_items, PageItem::{Break, Page}};
///
/// assert_eq!(
///     page_items(1, 45),
///     vec![Page(1), Page(2), Page(3), Break, Page(44), Page(45)]
/// );
/// ```
pub fn page_items(current_page: u32, page_count: u32) -> Vec<PageItem> {
    if page_count <= PAGE_RANGE_DISPLAYED {
        return (1..=page_count).map(PageItem::Page).collect();
    }

    let range = i64::from(PAGE_RANGE_DISPLAYED);
    let margin = i64::from(MARGIN_PAGES_DISPLAYED);
    let count = i64::from(page_count);
    let selected = i64::from(current_page.clamp(1, page_count)) - 1;

    // Doubled: `left2 / 2` and `right2 / 2` are the side widths.
    let mut left2 = range;
    let mut right2 = 2 * range - left2;
    if 2 * selected > 2 * count - right2 {
        right2 = 2 * (count - selected);
        left2 = 2 * range - right2;
    } else if 2 * selected < left2 {
        left2 = 2 * selected;
        right2 = 2 * range - left2;
    }
    let right_bound2 = if selected == 0 && range > 1 { right2 - 2 } else { right2 };

    let mut items = Vec::new();
    for index in 0..count {
        let page = index + 1;
        let in_margin = page <= margin || page > count - margin;
        let in_range =
            2 * index >= 2 * selected - left2 && 2 * index <= 2 * selected + right_bound2;

        if in_margin || in_range {
            items.push(PageItem::Page(page as u32));
        } else if items.last() != Some(&PageItem::Break) {
            items.push(PageItem::Break);
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Break, Page};
    use super::*;
    use crate::types::{QueryKey, ResultPage};
    use proptest::prelude::*;
    use std::time::Duration;

    fn movie(id: u64) -> MovieSummary {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Movie {id}"),
            "poster_path": format!("/{id}.jpg"),
            "overview": "A movie."
        }))
        .unwrap()
    }

    fn result_page(page: u32, count: u64, total_pages: u32) -> ResultPage {
        let start = u64::from(page - 1) * 20;
        ResultPage::new(
            page,
            (start..start + count).map(movie).collect(),
            total_pages,
            total_pages * 20,
        )
    }

    fn controller(mode: PaginationMode) -> SearchController {
        SearchController::new(mode, Duration::from_secs(300))
    }

    #[test]
    fn test_page_items_start() {
        assert_eq!(
            page_items(1, 45),
            vec![Page(1), Page(2), Page(3), Break, Page(44), Page(45)]
        );
    }

    #[test]
    fn test_page_items_middle() {
        assert_eq!(
            page_items(10, 45),
            vec![
                Page(1),
                Page(2),
                Break,
                Page(9),
                Page(10),
                Page(11),
                Break,
                Page(44),
                Page(45)
            ]
        );
    }

    #[test]
    fn test_page_items_near_edges() {
        assert_eq!(
            page_items(2, 45),
            vec![Page(1), Page(2), Page(3), Page(4), Break, Page(44), Page(45)]
        );
        assert_eq!(
            page_items(44, 45),
            vec![Page(1), Page(2), Break, Page(43), Page(44), Page(45)]
        );
        assert_eq!(
            page_items(5, 45),
            vec![Page(1), Page(2), Break, Page(4), Page(5), Page(6), Break, Page(44), Page(45)]
        );
    }

    #[test]
    fn test_page_items_end() {
        assert_eq!(
            page_items(45, 45),
            vec![Page(1), Page(2), Break, Page(43), Page(44), Page(45)]
        );
    }

    #[test]
    fn test_page_items_small_counts() {
        assert!(page_items(1, 0).is_empty());
        assert_eq!(page_items(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(
            page_items(1, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_idle_view() {
        let view = ViewModel::from_controller(&controller(PaginationMode::Paged));
        assert_eq!(view.status, QueryStatus::Idle);
        assert!(!view.show_loader);
        assert!(!view.show_error);
        assert!(view.movies.is_empty());
        assert!(view.pagination.is_none());
        assert!(view.selected.is_none());
    }

    #[test]
    fn test_loading_view_shows_loader() {
        let mut c = controller(PaginationMode::Paged);
        c.submit_query("batman");
        let view = ViewModel::from_controller(&c);
        assert!(view.show_loader);
        assert!(view.movies.is_empty());
    }

    #[test]
    fn test_ready_view_batman() {
        let mut c = controller(PaginationMode::Paged);
        let key = c.submit_query("batman").unwrap();
        c.resolve(&key, Ok(result_page(1, 20, 45)));

        let view = ViewModel::from_controller(&c);
        assert_eq!(view.movies.len(), 20);
        assert_eq!(
            view.movies[0].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/0.jpg")
        );
        let pagination = view.pagination.unwrap();
        assert_eq!(pagination.current_page, 1);
        assert_eq!(pagination.page_count, 45);
        assert!(!pagination.has_previous);
        assert!(pagination.has_next);
        assert!(!pagination.disabled);
        assert_eq!(view.total_results, 900);
    }

    #[test]
    fn test_single_page_has_no_pagination() {
        let mut c = controller(PaginationMode::Paged);
        let key = c.submit_query("heat").unwrap();
        c.resolve(&key, Ok(result_page(1, 3, 1)));
        assert!(ViewModel::from_controller(&c).pagination.is_none());
    }

    #[test]
    fn test_page_change_keeps_grid_without_loader() {
        let mut c = controller(PaginationMode::Paged);
        let key = c.submit_query("batman").unwrap();
        c.resolve(&key, Ok(result_page(1, 20, 45)));
        c.next_page().unwrap();

        let view = ViewModel::from_controller(&c);
        assert_eq!(view.status, QueryStatus::Loading);
        assert!(!view.show_loader);
        assert_eq!(view.movies.len(), 20);
        let pagination = view.pagination.unwrap();
        assert_eq!(pagination.current_page, 2);
        assert!(pagination.disabled);
    }

    #[test]
    fn test_new_query_hides_previous_pagination() {
        let mut c = controller(PaginationMode::Paged);
        let key = c.submit_query("batman").unwrap();
        c.resolve(&key, Ok(result_page(1, 20, 45)));
        c.submit_query("heat");

        let view = ViewModel::from_controller(&c);
        assert_eq!(view.status, QueryStatus::Loading);
        assert_eq!(view.movies.len(), 20);
        assert!(view.pagination.is_none());
        assert_eq!(view.total_results, 0);
    }

    #[test]
    fn test_error_view_hides_grid() {
        let mut c = controller(PaginationMode::Paged);
        let key = c.submit_query("batman").unwrap();
        c.resolve(
            &key,
            Err(crate::MovieSearchError::ServerError {
                status: 401,
                message: "Invalid API key".to_string(),
            }),
        );

        let view = ViewModel::from_controller(&c);
        assert!(view.show_error);
        assert!(!view.show_loader);
        assert!(view.movies.is_empty());
        assert!(view.pagination.is_none());
        assert_eq!(
            view.error_message.as_deref(),
            Some("Server returned 401: Invalid API key")
        );
    }

    #[test]
    fn test_load_more_control_states() {
        let mut c = controller(PaginationMode::LoadMore);
        let key = c.submit_query("batman").unwrap();
        c.resolve(&key, Ok(result_page(1, 20, 2)));

        let view = ViewModel::from_controller(&c);
        assert!(view.pagination.is_none());
        assert_eq!(view.load_more, Some(LoadMoreControl::new(false)));
        assert_eq!(view.load_more.as_ref().unwrap().label, "Load more");

        let next = c.load_more().unwrap().unwrap();
        let view = ViewModel::from_controller(&c);
        let control = view.load_more.unwrap();
        assert!(control.disabled);
        assert_eq!(control.label, "Loading...");

        c.resolve(&next, Ok(result_page(2, 20, 2)));
        let view = ViewModel::from_controller(&c);
        assert_eq!(view.movies.len(), 40);
        assert!(view.load_more.is_none());
    }

    #[test]
    fn test_selected_movie_detail() {
        let mut c = controller(PaginationMode::Paged);
        let key = c.submit_query("batman").unwrap();
        c.resolve(&key, Ok(result_page(1, 20, 45)));
        c.select(4);

        let detail = ViewModel::from_controller(&c).selected.unwrap();
        assert_eq!(detail.id, 4);
        assert_eq!(detail.overview, "A movie.");
        assert_eq!(
            detail.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/4.jpg")
        );

        c.dismiss();
        let view = ViewModel::from_controller(&c);
        assert!(view.selected.is_none());
        assert_eq!(view.movies.len(), 20);
    }

    #[test]
    fn test_view_serialization() {
        let mut c = controller(PaginationMode::Paged);
        let key = QueryKey::new("batman", 1);
        c.submit_query("batman");
        c.resolve(&key, Ok(result_page(1, 1, 45)));

        let json = serde_json::to_value(ViewModel::from_controller(&c)).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["mode"], "paged");
        assert_eq!(json["pagination"]["items"][0], serde_json::json!({"type": "page", "page": 1}));
        assert_eq!(json["pagination"]["items"][3], serde_json::json!({"type": "break"}));
    }

    proptest! {
        #[test]
        fn prop_pagination_never_exceeds_cap(current in 1u32..=500, total_pages in 0u32..5000) {
            let page_count = ResultPage::new(1, Vec::new(), total_pages, 0).page_count();
            prop_assume!(page_count >= 1);
            let current = current.min(page_count);
            let items = page_items(current, page_count);

            let pages: Vec<u32> = items
                .iter()
                .filter_map(|item| match item {
                    Page(n) => Some(*n),
                    Break => None,
                })
                .collect();

            prop_assert!(pages.iter().all(|&n| n >= 1 && n <= 500));
            prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(pages.contains(&current));
            prop_assert_eq!(pages.first().copied(), Some(1));
            prop_assert_eq!(pages.last().copied(), Some(page_count));
            prop_assert!(items.windows(2).all(|w| !(w[0] == Break && w[1] == Break)));
        }
    }
}
