//! Reading daily records from disk or over HTTP.

use anyhow::Context;
use log::info;
use std::time::Duration;
use tmx_chart::state::AppState;
use tmx_core::reading::{parse_daily_csv, IngestReport};
use tmx_data::aggregation::aggregate;
use tmx_data::grid::Grid;

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch the raw CSV text from a path or an http(s) URL.
pub async fn read_source(source: &str) -> anyhow::Result<String> {
    if is_url(source) {
        let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        info!("Fetching {}", source);
        let response = client
            .get(source)
            .send()
            .await
            .with_context(|| format!("failed to fetch {source}"))?;
        if !response.status().is_success() {
            anyhow::bail!("bad response for {}: {}", source, response.status());
        }
        Ok(response.text().await?)
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("failed to read {source}"))
    }
}

pub async fn load_records(source: &str) -> anyhow::Result<IngestReport> {
    let text = read_source(source).await?;
    parse_daily_csv(&text).with_context(|| format!("failed to parse {source}"))
}

/// Load `source` and aggregate its trailing `window_years` years.
pub async fn load_grid(source: &str, window_years: usize) -> anyhow::Result<Grid> {
    let report = load_records(source).await?;
    let grid = aggregate(&report.records, window_years)?;
    info!(
        "Loaded {} records from {} into {} years ({} months without data)",
        report.records.len(),
        source,
        grid.years.len(),
        grid.missing_count()
    );
    Ok(grid)
}

/// Load `source` into `state` using its current window. Returns whether the
/// result was applied; a failed load is recorded in `state.error`.
pub async fn load_into(state: &mut AppState, source: &str) -> bool {
    let ticket = state.begin_load();
    let outcome = load_grid(source, state.window_years)
        .await
        .map_err(|e| format!("{e:#}"));
    state.finish_load(ticket, outcome)
}

#[cfg(test)]
mod tests {
    use super::{is_url, load_grid, load_into, read_source};
    use std::path::PathBuf;
    use tmx_chart::state::AppState;
    use tmx_core::month::MonthKey;

    const DAILY_CSV: &str = r#"date,max_temperature,min_temperature
2021-06-01,30,24
2023-01-15,31,22
2023-01-20,29,20
2023-01-21,bad,20
"#;

    async fn fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tmx-{}-{}.csv", std::process::id(), name));
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/temperature_daily.csv"));
        assert!(is_url("http://localhost:8080/t.csv"));
        assert!(!is_url("data/temperature_daily.csv"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = read_source("/nonexistent/tmx/daily.csv").await.unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tmx/daily.csv"));
    }

    #[tokio::test]
    async fn test_load_grid_window() {
        let path = fixture("window", DAILY_CSV).await;
        let source = path.to_string_lossy();

        let grid = load_grid(&source, 1).await.unwrap();
        assert_eq!(grid.years, vec![2023]);
        let january = grid.get(MonthKey::new(2023, 1).unwrap()).unwrap();
        assert_eq!(january.monthly_max, Some(31.0));
        assert_eq!(january.monthly_min, Some(20.0));
        assert_eq!(grid.missing_count(), 11);

        let grid = load_grid(&source, 10).await.unwrap();
        assert_eq!(grid.years, vec![2021, 2023]);
        assert_eq!(grid.cells().len(), 24);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_into_state() {
        let path = fixture("state", DAILY_CSV).await;
        let mut state = AppState::default();
        assert!(load_into(&mut state, &path.to_string_lossy()).await);
        assert!(!state.is_loading());
        assert!(state.error.is_none());
        assert_eq!(state.view.as_ref().unwrap().grid().years, vec![2021, 2023]);

        assert!(load_into(&mut state, "/nonexistent/tmx/daily.csv").await);
        assert!(state.error.as_deref().unwrap().contains("failed to read"));
        assert!(state.view.is_some());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_column_is_an_error() {
        let path = fixture("columns", "date,max_temperature\n2023-01-01,20\n").await;
        assert!(load_grid(&path.to_string_lossy(), 10).await.is_err());
        tokio::fs::remove_file(&path).await.unwrap();
    }
}
