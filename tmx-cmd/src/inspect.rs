//! Tooltip text for a single month.

use crate::load::load_into;
use crate::SourceArgs;
use tmx_chart::state::AppState;
use tmx_core::mode::Mode;
use tmx_core::month::MonthKey;

/// Load the source and describe `month` the way the hover tooltip does.
///
/// The pointer is placed on the cell's top-left corner in document
/// coordinates, so the reported position is where the tooltip would appear.
pub async fn run_inspect(source: &SourceArgs, mode: Mode, month: MonthKey) -> anyhow::Result<String> {
    let mut state = AppState::default();
    state.window_years = source.window_years()?;
    if state.mode() != mode {
        state.on_toggle();
    }
    load_into(&mut state, &source.input).await;
    if let Some(error) = state.error.take() {
        anyhow::bail!(error);
    }

    let Some(view) = state.view.as_ref() else {
        anyhow::bail!("no data loaded from {}", source.input);
    };
    let (Some(cell), Some(origin)) = (view.grid().get(month), view.cell_origin(month)) else {
        anyhow::bail!("{} is outside the loaded years {:?}", month, view.grid().years);
    };
    let cell = cell.clone();
    let margin = view.layout().margin;
    let tooltip = state.hover(&cell, origin.x + margin.left, origin.y + margin.top);
    log::debug!("tooltip at ({}, {})", tooltip.x, tooltip.y);
    Ok(tooltip.content.to_string())
}

#[cfg(test)]
mod tests {
    use super::run_inspect;
    use crate::SourceArgs;
    use tmx_core::mode::Mode;
    use tmx_core::month::MonthKey;

    const DAILY_CSV: &str = "date,max_temperature,min_temperature\n2023-01-15,31.4,22\n2023-01-20,29,19.5\n";

    async fn source(name: &str) -> SourceArgs {
        let path = std::env::temp_dir().join(format!("tmx-inspect-{}-{}.csv", std::process::id(), name));
        tokio::fs::write(&path, DAILY_CSV).await.unwrap();
        SourceArgs {
            input: path.to_string_lossy().into_owned(),
            years: 10,
        }
    }

    #[tokio::test]
    async fn test_inspect_month() {
        let source = source("month").await;
        let text = run_inspect(&source, Mode::Min, MonthKey::new(2023, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(text, "Date: 2023-01\nMax: 31 C, Min: 20 C");

        let text = run_inspect(&source, Mode::Max, MonthKey::new(2023, 4).unwrap())
            .await
            .unwrap();
        assert_eq!(text, "Date: 2023-04\nNo data");
        tokio::fs::remove_file(&source.input).await.unwrap();
    }

    #[tokio::test]
    async fn test_inspect_outside_window() {
        let source = source("outside").await;
        let err = run_inspect(&source, Mode::Max, MonthKey::new(2019, 1).unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("outside the loaded years"));
        tokio::fs::remove_file(&source.input).await.unwrap();
    }

    #[tokio::test]
    async fn test_inspect_unreadable_source() {
        let source = SourceArgs {
            input: "/nonexistent/tmx/inspect.csv".to_string(),
            years: 10,
        };
        assert!(run_inspect(&source, Mode::Max, MonthKey::new(2023, 1).unwrap())
            .await
            .is_err());
    }
}
