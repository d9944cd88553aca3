//! Plain-text rendering of a [`ForecastState`].

use crate::{Forecast, config::BACKEND_URL_ENV, model::DEFAULT_DATE_FORMAT, state::ForecastState};

pub const TITLE: &str = "Weather Forecast";
pub const LOADING_TEXT: &str = "Loading forecasts…";
pub const FOOTER_TEXT: &str = "Select a forecast to view details.";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Backend URL as the user configured it; `None` when unset.
    pub backend_label: Option<String>,
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            backend_label: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// One list row: formatted date, summary and Celsius temperature.
pub fn item_line(forecast: &Forecast, date_format: &str) -> String {
    format!(
        "{}  {}  {}°C",
        forecast.display_date(date_format),
        forecast.summary,
        forecast.temperature_c
    )
}

/// Lines of the expanded detail panel.
pub fn detail_lines(forecast: &Forecast) -> [String; 2] {
    [
        format!("Temperature F: {}°F", forecast.fahrenheit()),
        format!("Raw date: {}", forecast.date),
    ]
}

pub fn render_view(state: &ForecastState, opts: &RenderOptions) -> String {
    let mut lines = vec![TITLE.to_string()];

    lines.push(match &opts.backend_label {
        Some(url) => format!("Backend URL: {url}"),
        None => format!("Backend URL: unset: set {BACKEND_URL_ENV}"),
    });
    lines.push(if state.can_reload() {
        "[Reload]".to_string()
    } else {
        "[Reload] (disabled)".to_string()
    });
    lines.push(String::new());

    if state.is_loading() {
        lines.push(LOADING_TEXT.to_string());
    }
    if let Some(err) = state.error() {
        lines.push(format!("Error: {err}"));
    }

    for (i, forecast) in state.forecasts().iter().enumerate() {
        let expanded = state.selected() == Some(i);
        let marker = if expanded { 'v' } else { '>' };
        lines.push(format!("{marker} {}", item_line(forecast, &opts.date_format)));

        if expanded {
            lines.extend(detail_lines(forecast).map(|line| format!("    {line}")));
        }
    }

    lines.push(String::new());
    lines.push(FOOTER_TEXT.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn sample() -> Vec<Forecast> {
        vec![
            Forecast {
                date: "2025-01-05".into(),
                temperature_c: 0.0,
                summary: "Chilly".into(),
                temperature_f: None,
            },
            Forecast {
                date: "2025-01-06".into(),
                temperature_c: 100.0,
                summary: "Scorching".into(),
                temperature_f: None,
            },
        ]
    }

    fn loaded_state() -> ForecastState {
        let mut state = ForecastState::new();
        let ticket = state.begin_load();
        state.finish_load(ticket, Ok(sample()));
        state
    }

    #[test]
    fn item_line_shows_date_summary_and_celsius() {
        assert_eq!(
            item_line(&sample()[0], DEFAULT_DATE_FORMAT),
            "1/5/2025  Chilly  0°C"
        );
    }

    #[test]
    fn details_use_derived_fahrenheit() {
        let [f, raw] = detail_lines(&sample()[1]);
        assert_eq!(f, "Temperature F: 212°F");
        assert_eq!(raw, "Raw date: 2025-01-06");
    }

    #[test]
    fn only_selected_item_is_expanded() {
        let mut state = loaded_state();
        state.toggle(0);

        let out = render_view(&state, &RenderOptions::default());
        assert!(out.contains("v 1/5/2025  Chilly  0°C"));
        assert!(out.contains("Temperature F: 32°F"));
        assert!(out.contains("> 1/6/2025  Scorching  100°C"));
        assert!(!out.contains("212°F"));
    }

    #[test]
    fn loading_disables_reload() {
        let mut state = ForecastState::new();
        state.begin_load();

        let out = render_view(&state, &RenderOptions::default());
        assert!(out.contains(LOADING_TEXT));
        assert!(out.contains("[Reload] (disabled)"));
    }

    #[test]
    fn error_does_not_hide_stale_list() {
        let mut state = loaded_state();
        let ticket = state.begin_load();
        state.finish_load(
            ticket,
            Err(FetchError::Transport {
                url: "http://localhost/api/weatherforecast".into(),
                reason: "connection refused".into(),
            }),
        );

        let out = render_view(&state, &RenderOptions::default());
        assert!(out.contains("Error: Network request to http://localhost/api/weatherforecast"));
        assert!(out.contains("Chilly"));
        assert!(!out.contains(LOADING_TEXT));
    }

    #[test]
    fn header_reports_backend() {
        let state = ForecastState::new();

        let out = render_view(&state, &RenderOptions::default());
        assert!(out.contains("Backend URL: unset: set WEATHER_BACKEND_URL"));

        let opts = RenderOptions {
            backend_label: Some("http://svc:5000".into()),
            ..RenderOptions::default()
        };
        let out = render_view(&state, &opts);
        assert!(out.starts_with("Weather Forecast\nBackend URL: http://svc:5000\n"));
        assert!(out.ends_with(&format!("{FOOTER_TEXT}\n")));
    }
}
