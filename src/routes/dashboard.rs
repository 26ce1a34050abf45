use axum::{
    extract::State,
    http::Method,
    response::Html,
    routing::get,
    Router,
};
use bytes::Bytes;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    clients::GraphClient,
    error::AppError,
    models::NamedSummarySet,
    services::summary::{merge, render_grouped_table, SummaryExtractor},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/dashboard", get(render_dashboard))
        .layer(cors)
}

/// Spreadsheets only, and never the pre-merged summary exports that land in
/// the same folder. Extension match is case-sensitive, the exclusion is not.
fn is_candidate_file(name: &str) -> bool {
    name.ends_with(".xlsx") && !name.to_lowercase().contains("summary")
}

fn file_stem(name: &str) -> String {
    name.strip_suffix(".xlsx").unwrap_or(name).to_string()
}

/// Per-file failures contribute nothing: a failed download or an
/// unparseable workbook is logged and skipped, a workbook without the
/// summary sheet is skipped silently. Later files are always processed.
fn collect_summaries(
    extractor: &SummaryExtractor,
    downloads: impl IntoIterator<Item = (String, Result<Bytes, AppError>)>,
) -> NamedSummarySet {
    let mut summaries = NamedSummarySet::default();
    for (name, download) in downloads {
        let file_data = match download {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", name, e);
                continue;
            }
        };

        match extractor.extract(file_data) {
            Ok(Some(table)) => {
                summaries.insert(file_stem(&name), table);
            }
            Ok(None) => {
                tracing::debug!("{} has no summary sheet, skipping", name);
            }
            Err(e) => {
                tracing::error!("Failed to parse {}: {}", name, e);
            }
        }
    }
    summaries
}

#[axum::debug_handler]
async fn render_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let start = std::time::Instant::now();
    let config = &state.config;

    tracing::info!("Acquiring Graph access token...");
    let graph = GraphClient::connect(config).await?;

    let site_id = graph
        .site_id(&config.hostname, &config.site_relative_path)
        .await?;
    let drive_id = graph.drive_id(&site_id).await?;
    tracing::info!("Resolved drive {} for site {}", drive_id, site_id);

    let children = graph.list_children(&drive_id, &config.folder_path).await?;
    tracing::info!(
        "Folder '{}' has {} entries",
        config.folder_path,
        children.len()
    );

    let extractor = SummaryExtractor::new(&config.summary_sheet, &config.key_column);
    let mut downloads = Vec::new();
    for item in children.iter().filter(|item| is_candidate_file(&item.name)) {
        let download = graph.download_item(&drive_id, &item.id).await;
        downloads.push((item.name.clone(), download));
    }

    let summaries = collect_summaries(&extractor, downloads);
    tracing::info!(
        "Extracted {} summaries in {:?}",
        summaries.len(),
        start.elapsed()
    );

    let merged = merge(&summaries);
    if let Some(table) = &merged {
        tracing::info!(
            "Merged table has {} rows and {} columns",
            table.row_keys.len(),
            table.width()
        );
    }

    Ok(Html(render_grouped_table(merged.as_ref(), &config.key_column)))
}
