//! Explicit state container behind the forecast view.
//!
//! Loads are split into [`ForecastState::begin_load`] and
//! [`ForecastState::finish_load`]. Each begin hands out a [`LoadTicket`]
//! and only the newest ticket may settle the state, so an older response
//! that arrives late cannot overwrite a newer one.

use crate::{Forecast, error::FetchError};

/// Identifies one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastState {
    forecasts: Vec<Forecast>,
    loading: bool,
    error: Option<String>,
    selected: Option<usize>,
    generation: u64,
}

impl ForecastState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forecasts(&self) -> &[Forecast] {
        &self.forecasts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_forecast(&self) -> Option<&Forecast> {
        self.selected.and_then(|i| self.forecasts.get(i))
    }

    /// The reload action is disabled while a load is in flight.
    pub fn can_reload(&self) -> bool {
        !self.loading
    }

    /// Mark a load as started: `loading` on, previous error cleared.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.generation)
    }

    /// Settle a load. Returns `false` if the ticket was superseded and the
    /// result was dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Forecast>, FetchError>,
    ) -> bool {
        if ticket.0 != self.generation {
            return false;
        }

        self.loading = false;
        match result {
            Ok(forecasts) => {
                self.forecasts = forecasts;
                if self.selected.is_some_and(|i| i >= self.forecasts.len()) {
                    self.selected = None;
                }
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        true
    }

    /// Expand `index`, or collapse it if it is already expanded.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.forecasts.len() {
            return;
        }

        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }
}
