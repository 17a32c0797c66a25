use anyhow::Context;
use clap::{Parser, Subcommand};
use weather_core::{
    Config, LookupFailure, OpenWeatherProvider, WeatherQueryService, WeatherViewModel,
    icon_display_url,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API credential.
    Configure,

    /// Show current conditions for a city.
    Show {
        /// City name, e.g. "Recife" or "London".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved credentials to {}", Config::config_file_path()?.display());
    Ok(())
}

/// One lookup per process invocation: lookups are serialized by
/// construction, so no stale in-flight result can ever be rendered.
async fn show(city: &str) -> anyhow::Result<()> {
    let settings = Config::load()?.resolve()?;
    let service = WeatherQueryService::new(OpenWeatherProvider::new(settings));

    match service.lookup(city).await {
        Ok(vm) => {
            print_weather(&vm);
            Ok(())
        }
        Err(failure) => Err(anyhow::anyhow!(failure_message(&failure))),
    }
}

fn print_weather(vm: &WeatherViewModel) {
    println!("{}, {}", vm.city, vm.country_code);
    println!("  {}", vm.description);
    println!(
        "  temperature: {:.1} °C (min {:.1} / max {:.1})",
        vm.temperature_c, vm.temperature_min_c, vm.temperature_max_c
    );
    println!("  humidity:    {}%", vm.humidity_pct);
    println!("  wind:        {:.1} m/s", vm.wind_speed_mps);
    println!("  icon:        {}", icon_display_url(&vm.icon_id));
}

fn failure_message(failure: &LookupFailure) -> String {
    match failure {
        LookupFailure::EmptyQuery => {
            "Enter a city name to look up the weather.".to_string()
        }
        LookupFailure::ProviderRejected(reason) => {
            format!("The weather service rejected the lookup: {reason}. Check the city name and try again.")
        }
        LookupFailure::TransportError(reason) => {
            format!("Could not reach the weather service: {reason}. Please try again.")
        }
    }
}
