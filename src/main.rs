use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use companion_auth::ApiKeyRegistry;
use companion_core::Config;
use companion_service::WeatherCompanion;
use companion_weather::{Location, OwmClient, OwmWeatherStation};

#[tokio::main]
async fn main() -> Result<()> {
    // An explicit config path may be given as the first argument
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    companion_core::init(&config.logging.filter)?;

    let validation = config.validate();
    if !validation.is_valid() {
        bail!("Invalid configuration: {}", validation.error_summary());
    }
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let users =
        ApiKeyRegistry::from_config(&config.users).context("Failed to load API users")?;

    let client =
        OwmClient::from_config(&config.weather).context("Failed to create weather client")?;
    let companion = WeatherCompanion::in_memory(Arc::new(OwmWeatherStation::new(client)));

    tracing::info!("Weather Companion started with {} API users", users.len());

    let Some(home) = config.weather.home else {
        println!("Weather Companion ready. Set [weather].home to see local conditions.");
        return Ok(());
    };

    let location = Location::new(home.latitude, home.longitude)?;
    match companion.get_current_state(&location).await {
        Ok(state) => {
            println!("Current weather at {}:", location);
            println!(
                "  Temperature: {:.1} K (feels like {:.1} K)",
                state.temperature(),
                state.feels_like()
            );
            println!("  Humidity:    {:.0}%", state.humidity());
            println!("  Pressure:    {:.0} hPa", state.pressure());
            if let Some(speed) = state.wind_speed() {
                println!("  Wind:        {:.1} m/s", speed);
            }
        }
        Err(e) => {
            tracing::error!("{}: {}", e, e.cause());
            println!("{}", e.user_message());
        }
    }

    Ok(())
}
