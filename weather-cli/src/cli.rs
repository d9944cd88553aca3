use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::Text;
use weather_core::{Config, ForecastView, HttpForecastSource, RenderOptions, render_view};

use crate::menu;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather forecast viewer")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Backend base URL for this run; overrides config and WEATHER_BACKEND_URL.
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse forecasts interactively: expand details, reload.
    Show,

    /// Fetch forecasts once and print them.
    List {
        /// Expand the detail panel of the item at this position (0-based).
        #[arg(long)]
        details: Option<usize>,
    },

    /// Set or clear the backend URL stored in the config file.
    Configure {
        /// New backend URL; prompts when omitted.
        #[arg(long, conflicts_with = "clear")]
        url: Option<String>,

        /// Remove the stored URL and fall back to `/api`.
        #[arg(long)]
        clear: bool,
    },

    /// Print the config file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show => {
                let config = effective_config(self.backend_url)?;
                let mut view = mount_view(&config).await;
                menu::run(&mut view, &render_options(&config)).await?;
            }
            Command::List { details } => {
                let config = effective_config(self.backend_url)?;
                let mut view = mount_view(&config).await;

                if let Some(index) = details {
                    if !expand_details(&mut view, index) {
                        tracing::warn!(index, "no forecast at this position");
                    }
                }
                print!("{}", render_view(view.state(), &render_options(&config)));

                if view.state().error().is_some() {
                    bail!("failed to load forecasts from {}", view.endpoint());
                }
            }
            Command::Configure { url, clear } => {
                let mut config = Config::load()?;

                let url = if clear {
                    None
                } else if url.is_some() {
                    url
                } else {
                    prompt_backend_url(&config)?
                };

                config.set_backend_url(url);
                config.save()?;

                match config.configured_backend() {
                    Some(url) => println!("Backend URL set to {url}"),
                    None => println!("Backend URL cleared; using {}", config.resolved_base()),
                }
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

/// File config, then environment, then the command-line flag.
fn effective_config(flag: Option<String>) -> anyhow::Result<Config> {
    let config = Config::load()?.with_env_overrides().with_backend_override(flag);
    tracing::debug!(base = %config.resolved_base(), "configuration resolved");
    Ok(config)
}

async fn mount_view(config: &Config) -> ForecastView {
    ForecastView::mount(Box::new(HttpForecastSource::from_config(config))).await
}

/// Expand the item at `index`; `false` when there is no such item.
fn expand_details(view: &mut ForecastView, index: usize) -> bool {
    view.toggle(index);
    view.state().selected_forecast().is_some()
}

fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        backend_label: config.configured_backend().map(str::to_string),
        date_format: config.date_format.clone(),
    }
}

fn prompt_backend_url(config: &Config) -> anyhow::Result<Option<String>> {
    let current = config.configured_backend().unwrap_or_default();

    let answer = Text::new("Backend URL:")
        .with_default(current)
        .with_help_message("e.g. http://localhost:5000 (leave empty to use /api)")
        .prompt()
        .context("Failed to read backend URL")?;

    Ok(Some(answer))
}
