//! Interactive loop behind `weather show`.

use std::fmt;

use inquire::{InquireError, Select};
use weather_core::{
    ForecastState, ForecastView, RenderOptions, render::item_line, render_view,
};

#[derive(Debug, Clone, PartialEq)]
pub enum MenuChoice {
    /// Toggle the detail panel of one forecast.
    Item { index: usize, label: String },
    Reload,
    Quit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuChoice::Item { label, .. } => f.write_str(label),
            MenuChoice::Reload => f.write_str("Reload"),
            MenuChoice::Quit => f.write_str("Quit"),
        }
    }
}

/// One entry per forecast, then `Reload` (only when allowed) and `Quit`.
pub fn menu_choices(state: &ForecastState, date_format: &str) -> Vec<MenuChoice> {
    let mut choices: Vec<MenuChoice> = state
        .forecasts()
        .iter()
        .enumerate()
        .map(|(index, forecast)| MenuChoice::Item {
            index,
            label: item_line(forecast, date_format),
        })
        .collect();

    if state.can_reload() {
        choices.push(MenuChoice::Reload);
    }
    choices.push(MenuChoice::Quit);
    choices
}

pub async fn run(view: &mut ForecastView, opts: &RenderOptions) -> anyhow::Result<()> {
    loop {
        println!("{}", render_view(view.state(), opts));

        let choices = menu_choices(view.state(), &opts.date_format);
        let cursor = view.state().selected().unwrap_or(0);

        let answer = Select::new("Forecasts:", choices)
            .with_starting_cursor(cursor)
            .with_help_message("↑↓ to move, enter to expand/collapse, esc to quit")
            .prompt();

        match answer {
            Ok(MenuChoice::Item { index, .. }) => view.toggle(index),
            Ok(MenuChoice::Reload) => {
                view.reload().await;
            }
            Ok(MenuChoice::Quit)
            | Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{Forecast, model::DEFAULT_DATE_FORMAT};

    fn state_with(n: usize) -> ForecastState {
        let mut state = ForecastState::new();
        let ticket = state.begin_load();
        let list = (0..n)
            .map(|i| Forecast {
                date: format!("2025-01-0{}", i + 1),
                temperature_c: i as f64,
                summary: "Cool".into(),
                temperature_f: None,
            })
            .collect();
        state.finish_load(ticket, Ok(list));
        state
    }

    #[test]
    fn items_then_reload_then_quit() {
        let choices = menu_choices(&state_with(2), DEFAULT_DATE_FORMAT);

        assert_eq!(choices.len(), 4);
        assert_eq!(
            choices[1],
            MenuChoice::Item {
                index: 1,
                label: "1/2/2025  Cool  1°C".into()
            }
        );
        assert_eq!(choices[2], MenuChoice::Reload);
        assert_eq!(choices[3], MenuChoice::Quit);
    }

    #[test]
    fn reload_hidden_while_loading() {
        let mut state = state_with(1);
        state.begin_load();

        let choices = menu_choices(&state, DEFAULT_DATE_FORMAT);
        assert!(!choices.contains(&MenuChoice::Reload));
        assert_eq!(choices.last(), Some(&MenuChoice::Quit));
    }

    #[test]
    fn choice_labels() {
        assert_eq!(MenuChoice::Reload.to_string(), "Reload");
        assert_eq!(
            MenuChoice::Item {
                index: 0,
                label: "x".into()
            }
            .to_string(),
            "x"
        );
    }
}
