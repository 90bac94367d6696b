//! Grid JSON export and SVG rendering.

use crate::load::load_grid;
use crate::SourceArgs;
use anyhow::Context;
use log::info;
use tmx_chart::layout::MatrixLayout;
use tmx_chart::svg;
use tmx_chart::view::MatrixView;
use tmx_core::mode::Mode;

/// Aggregate the source and write the grid as pretty JSON to `output`, or to
/// stdout when no path is given.
pub async fn run_aggregate(source: &SourceArgs, output: Option<&str>) -> anyhow::Result<()> {
    let grid = load_grid(&source.input, source.window_years()?).await?;
    let json = serde_json::to_string_pretty(&grid)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write {path}"))?;
            info!("Wrote grid for {:?} to {}", grid.years, path);
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Read a layout override; missing keys keep their defaults.
pub async fn read_layout(path: Option<&str>) -> anyhow::Result<MatrixLayout> {
    let Some(path) = path else {
        return Ok(MatrixLayout::default());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read layout {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("invalid layout {path}"))
}

pub async fn run_render(
    source: &SourceArgs,
    mode: Mode,
    layout: Option<&str>,
    output: &str,
) -> anyhow::Result<()> {
    let layout = read_layout(layout).await?;
    let grid = load_grid(&source.input, source.window_years()?).await?;
    let view = MatrixView::new(grid, layout);
    let document = svg::render(&view, mode)?;
    tokio::fs::write(output, document)
        .await
        .with_context(|| format!("failed to write {output}"))?;
    info!(
        "Rendered {} matrix for {} years at {}x{} to {}",
        mode.statistic_label(),
        view.grid().years.len(),
        view.width(),
        view.height(),
        output
    );
    Ok(())
}
