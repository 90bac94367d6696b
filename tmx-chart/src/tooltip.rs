//! Hover content for a matrix cell.

use serde::Serialize;
use std::fmt;
use tmx_core::mode::Mode;
use tmx_core::month::{MonthCell, MonthKey};
use tmx_utils::numbers::round_half_up;

/// Distance from the pointer to the tooltip's top-left corner, both axes.
pub const TOOLTIP_OFFSET: f64 = 14.0;

/// What a tooltip says about one cell.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TooltipContent {
    NoData {
        key: MonthKey,
    },
    /// Whole-degree statistics. Both are reported whatever the mode;
    /// `selected` is the one driving the fill.
    Summary {
        key: MonthKey,
        mode: Mode,
        max: f64,
        min: f64,
        selected: f64,
    },
}

impl TooltipContent {
    /// Describe `cell` under `mode`.
    pub fn for_cell(cell: &MonthCell, mode: Mode) -> TooltipContent {
        let key = cell.key();
        match (cell.missing, cell.monthly_max, cell.monthly_min) {
            (false, Some(max), Some(min)) => {
                let (max, min) = (round_half_up(max), round_half_up(min));
                let selected = match mode {
                    Mode::Max => max,
                    Mode::Min => min,
                };
                TooltipContent::Summary {
                    key,
                    mode,
                    max,
                    min,
                    selected,
                }
            }
            _ => TooltipContent::NoData { key },
        }
    }

    pub fn key(&self) -> MonthKey {
        match self {
            TooltipContent::NoData { key } | TooltipContent::Summary { key, .. } => *key,
        }
    }
}

impl fmt::Display for TooltipContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TooltipContent::NoData { key } => write!(f, "Date: {key}\nNo data"),
            TooltipContent::Summary { key, max, min, .. } => {
                write!(f, "Date: {key}\nMax: {max} C, Min: {min} C")
            }
        }
    }
}

/// A positioned tooltip, in the same coordinate space as the pointer.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Tooltip {
    pub x: f64,
    pub y: f64,
    pub content: TooltipContent,
}

/// Build the tooltip for the pointer hovering over `cell`.
pub fn on_hover(cell: &MonthCell, pointer_x: f64, pointer_y: f64, mode: Mode) -> Tooltip {
    Tooltip {
        x: pointer_x + TOOLTIP_OFFSET,
        y: pointer_y + TOOLTIP_OFFSET,
        content: TooltipContent::for_cell(cell, mode),
    }
}

#[cfg(test)]
mod tests {
    use super::{on_hover, TooltipContent};
    use chrono::NaiveDate;
    use tmx_core::mode::Mode;
    use tmx_core::month::{DayReading, MonthCell, MonthKey};

    fn january() -> MonthCell {
        let key = MonthKey::new(2023, 1).unwrap();
        let day = |day: u32, tmax: f64, tmin: f64| DayReading {
            day,
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            tmax,
            tmin,
        };
        MonthCell::from_days(key, vec![day(15, 31.4, 22.5), day(20, 29.0, 19.5)])
    }

    #[test]
    fn test_position_offset() {
        let tooltip = on_hover(&january(), 100.0, 40.0, Mode::Max);
        assert_eq!((tooltip.x, tooltip.y), (114.0, 54.0));
    }

    #[test]
    fn test_summary_rounds_half_up() {
        let tooltip = on_hover(&january(), 0.0, 0.0, Mode::Max);
        let key = MonthKey::new(2023, 1).unwrap();
        assert_eq!(
            tooltip.content,
            TooltipContent::Summary {
                key,
                mode: Mode::Max,
                max: 31.0,
                min: 20.0,
                selected: 31.0,
            }
        );
        assert_eq!(tooltip.content.to_string(), "Date: 2023-01\nMax: 31 C, Min: 20 C");
    }

    #[test]
    fn test_toggle_only_changes_selected() {
        let max = on_hover(&january(), 0.0, 0.0, Mode::Max).content;
        let min = on_hover(&january(), 0.0, 0.0, Mode::Min).content;
        match (max, min) {
            (
                TooltipContent::Summary { max: a_max, min: a_min, selected: a, .. },
                TooltipContent::Summary { max: b_max, min: b_min, selected: b, .. },
            ) => {
                assert_eq!((a_max, a_min), (b_max, b_min));
                assert_eq!(a, 31.0);
                assert_eq!(b, 20.0);
            }
            other => panic!("expected summaries, got {other:?}"),
        }
        assert_eq!(max.to_string(), min.to_string());
    }

    #[test]
    fn test_missing_cell() {
        let key = MonthKey::new(2021, 11).unwrap();
        let tooltip = on_hover(&MonthCell::placeholder(key), 5.0, 5.0, Mode::Min);
        assert_eq!(tooltip.content, TooltipContent::NoData { key });
        assert_eq!(tooltip.content.key(), key);
        assert_eq!(tooltip.content.to_string(), "Date: 2021-11\nNo data");
    }

    #[test]
    fn test_negative_values_round_up() {
        let key = MonthKey::new(2023, 2).unwrap();
        let cell = MonthCell::from_days(
            key,
            vec![DayReading {
                day: 1,
                date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
                tmax: -0.5,
                tmin: -2.5,
            }],
        );
        match TooltipContent::for_cell(&cell, Mode::Min) {
            TooltipContent::Summary { max, min, .. } => {
                assert_eq!(max, 0.0);
                assert_eq!(min, -2.0);
            }
            other => panic!("expected a summary, got {other:?}"),
        }
    }
}
