use moviesearch_core::{PaginationMode, SearchSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "batman".to_string());
    let session = SearchSession::new()?;

    println!("Searching for '{}'...\n", query);
    let view = session.submit_query(&query).await;

    if view.show_error {
        println!("Search failed: {}", view.error_message.unwrap_or_default());
        return Ok(());
    }
    for notice in session.take_notices().await {
        println!("Notice: {:?}", notice);
    }

    println!("{} results:", view.total_results);
    for (i, movie) in view.movies.iter().enumerate() {
        println!("  {}. {} (ID: {})", i + 1, movie.title, movie.id);
    }

    if let Some(pagination) = &view.pagination {
        println!("\nPage {} of {}", pagination.current_page, pagination.page_count);
    }

    let next = match view.mode {
        PaginationMode::Paged if view.pagination.as_ref().is_some_and(|p| p.has_next) => {
            Some(session.next_page().await?)
        }
        PaginationMode::LoadMore if view.load_more.is_some() => Some(session.load_more().await?),
        _ => None,
    };

    if let Some(next) = next {
        println!("\nAfter advancing: page {}, {} movies on screen", next.page, next.movies.len());
        if let Some(first) = next.movies.first() {
            let detail = session.select_movie(first.id).await.selected;
            if let Some(detail) = detail {
                println!("\n{}\n{}", detail.title, detail.overview);
            }
        }
    }

    Ok(())
}
