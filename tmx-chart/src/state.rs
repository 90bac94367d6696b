//! Interaction state for a matrix session.
//!
//! `AppState` bundles the current view, the loading and error flags, the
//! display mode and the tooltip. All changes go through its methods; readers
//! take copies of the small values and borrow the view.

use crate::layout::MatrixLayout;
use crate::tooltip::{on_hover, Tooltip};
use crate::view::MatrixView;
use std::fmt::Display;
use tmx_core::mode::Mode;
use tmx_core::month::MonthCell;
use tmx_data::config::WINDOW_YEARS_DEFAULT;
use tmx_data::grid::Grid;

/// Owner of the current display mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModeState {
    mode: Mode,
}

impl ModeState {
    pub fn new(mode: Mode) -> Self {
        ModeState { mode }
    }

    pub fn get(&self) -> Mode {
        self.mode
    }

    /// Flip the mode and return the new value.
    pub fn toggle(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.mode
    }
}

/// The last tooltip shown and whether it is visible. Hiding keeps the last
/// position and content.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TooltipState {
    current: Option<Tooltip>,
    visible: bool,
}

impl TooltipState {
    pub fn show(&mut self, tooltip: Tooltip) {
        self.current = Some(tooltip);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The visible tooltip, if any.
    pub fn visible(&self) -> Option<&Tooltip> {
        self.current.as_ref().filter(|_| self.visible)
    }
}

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// Issues load tickets and decides which completed load may be applied.
///
/// Only the most recently issued ticket is current; results for older
/// tickets are dropped.
#[derive(Debug, Default, Clone)]
pub struct LoadSequencer {
    latest: u64,
    cancelled: bool,
}

impl LoadSequencer {
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        self.cancelled = false;
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        !self.cancelled && ticket.0 == self.latest
    }

    /// Invalidate the outstanding ticket without issuing a new one.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Store `value` in `slot` when `ticket` is still current. Returns
    /// whether it was stored.
    pub fn commit<T>(&self, ticket: LoadTicket, value: T, slot: &mut T) -> bool {
        if !self.is_current(ticket) {
            log::debug!("load {:?} superseded by {}, discarding", ticket, self.latest);
            return false;
        }
        *slot = value;
        true
    }
}

/// All mutable state of one matrix session.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: Option<MatrixView>,
    pub loading: bool,
    pub error: Option<String>,
    pub mode: ModeState,
    pub tooltip: TooltipState,
    pub window_years: usize,
    pub layout: MatrixLayout,
    loads: LoadSequencer,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(MatrixLayout::default())
    }
}

impl AppState {
    pub fn new(layout: MatrixLayout) -> Self {
        AppState {
            view: None,
            loading: false,
            error: None,
            mode: ModeState::default(),
            tooltip: TooltipState::default(),
            window_years: WINDOW_YEARS_DEFAULT,
            layout,
            loads: LoadSequencer::default(),
        }
    }

    /// Start a load. Any load still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.error = None;
        self.loads.begin()
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Stale outcomes are ignored and leave the state untouched; returns
    /// whether this one was applied. A failure keeps the previous view.
    pub fn finish_load<E: Display>(&mut self, ticket: LoadTicket, outcome: Result<Grid, E>) -> bool {
        if !self.loads.is_current(ticket) {
            log::info!("ignoring result of superseded load {:?}", ticket);
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(grid) => {
                let view = Some(MatrixView::new(grid, self.layout.clone()));
                self.loads.commit(ticket, view, &mut self.view);
                self.error = None;
                self.tooltip.hide();
            }
            Err(e) => {
                log::warn!("load failed: {e}");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    pub fn on_toggle(&mut self) -> Mode {
        self.mode.toggle()
    }

    pub fn hover(&mut self, cell: &MonthCell, pointer_x: f64, pointer_y: f64) -> Tooltip {
        let tooltip = on_hover(cell, pointer_x, pointer_y, self.mode.get());
        self.tooltip.show(tooltip);
        tooltip
    }

    pub fn on_leave(&mut self) {
        self.tooltip.hide();
    }

    /// Change the trailing window. The caller reloads; any load in flight
    /// for the old window is invalidated.
    pub fn set_window_years(&mut self, window_years: usize) {
        if window_years != self.window_years {
            self.window_years = window_years;
            self.loads.cancel();
            self.loading = false;
        }
    }
}
