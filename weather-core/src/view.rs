use tracing::{info, warn};

use crate::{source::ForecastSource, state::ForecastState};

/// A forecast list bound to the source it is loaded from.
#[derive(Debug)]
pub struct ForecastView {
    source: Box<dyn ForecastSource>,
    state: ForecastState,
}

impl ForecastView {
    /// Create a view without loading anything.
    pub fn new(source: Box<dyn ForecastSource>) -> Self {
        Self {
            source,
            state: ForecastState::new(),
        }
    }

    /// Create a view and run the initial load.
    pub async fn mount(source: Box<dyn ForecastSource>) -> Self {
        let mut view = Self::new(source);
        view.load_forecasts().await;
        view
    }

    pub fn state(&self) -> &ForecastState {
        &self.state
    }

    pub fn endpoint(&self) -> &str {
        self.source.endpoint()
    }

    /// Fetch and replace the forecast list. Failures end up in
    /// [`ForecastState::error`] and are never returned.
    pub async fn load_forecasts(&mut self) {
        let ticket = self.state.begin_load();
        let result = self.source.fetch_forecasts().await;

        match &result {
            Ok(list) => info!(count = list.len(), "forecasts loaded"),
            Err(err) => warn!(url = err.url(), error = %err, "failed to load forecasts"),
        }

        self.state.finish_load(ticket, result);
    }

    /// User-triggered reload. Does nothing while a load is in flight.
    pub async fn reload(&mut self) -> bool {
        if !self.state.can_reload() {
            return false;
        }
        self.load_forecasts().await;
        true
    }

    pub fn toggle(&mut self, index: usize) {
        self.state.toggle(index);
    }
}
