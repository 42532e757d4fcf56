//! Weather dashboard binary
//!
//! ```sh
//! # Backend on localhost:3000, Oxford on start
//! cargo run -p weather-dashboard
//!
//! # Another backend and start location
//! WEATHER_API_BASE=http://weather.internal:8080 cargo run -p weather-dashboard -- --lat 40.7 --lon -74.0
//! ```

use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use weather_context::WeatherProvider;
use weather_dashboard::{logging, run_app, Args, PollerConfig};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Validate before taking over the terminal so errors stay readable
    let config = match args.provider_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let log_path = args.log_path();
    if let Err(e) = logging::init(&log_path) {
        eprintln!("Warning: could not open log file {}: {}", log_path.display(), e);
    }

    tracing::info!(
        base_url = %config.base_url,
        coords = %config.initial_coords,
        policy = %config.fetch_policy,
        "Starting weather dashboard"
    );
    let provider = WeatherProvider::with_http(config);

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, provider, PollerConfig::default()).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let final_state = result?;
    tracing::info!(coords = %final_state.active_city_coords, "Dashboard closed");
    Ok(())
}
