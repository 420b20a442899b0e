use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use commuteos::cli::{Cli, Command, LocationsCommand, SetLocation};
use commuteos::dashboard::{DashboardService, DashboardSnapshot};
use commuteos::error::classify;
use commuteos::models::{ConditionIcon, Location};
use commuteos::recommendation::CommuteKind;
use commuteos::{CommuteConfig, CommuteError, logging, web};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match classify(&e) {
                Some(err) => eprintln!("Error: {}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = CommuteConfig::load_from_path(cli.config)?;
    logging::init(&config.logging, cli.verbose)?;
    debug!("Loaded configuration: {config:?}");

    let service = DashboardService::from_config(&config)?;

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => {
            let snapshot = service.refresh().await?;
            print_locations(&snapshot.home, &snapshot.work);
            print_weather(&snapshot);
            print_commute(&snapshot);
            print_outfit(&snapshot);
        }
        Command::Weather => print_weather(&service.refresh().await?),
        Command::Commute => print_commute(&service.refresh().await?),
        Command::Outfit => print_outfit(&service.refresh().await?),
        Command::Search { query } => {
            let results = service.search(&query).await;
            if results.is_empty() {
                println!("No results for '{query}'");
            }
            for result in results {
                println!("{:>9.4}, {:>9.4}  {}", result.lat, result.lon, result.display_name);
            }
        }
        Command::Locations(LocationsCommand::Show) => {
            let locations = service.locations().await?;
            print_locations(&locations.home, &locations.work);
        }
        Command::Locations(LocationsCommand::Set(set)) => {
            let slot = set.slot;
            let location = resolve_location(&service, set).await?;
            println!("Saving {} as {}", location, slot.title());
            let snapshot = service.set_location(slot, location).await?;
            print_locations(&snapshot.home, &snapshot.work);
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            web::run(port, Arc::new(service), &config.server).await?;
        }
    }

    Ok(())
}

async fn resolve_location(service: &DashboardService, set: SetLocation) -> Result<Location> {
    if let Some(query) = set.query {
        let results = service.search(&query).await;
        let first = results
            .first()
            .ok_or_else(|| CommuteError::validation(format!("No results for '{query}'")))?;
        return Ok(DashboardService::choose_result(first));
    }

    match (set.lat, set.lon) {
        (Some(lat), Some(lon)) => Ok(match set.label {
            Some(label) => Location::with_label(lat, lon, label),
            None => DashboardService::pin(lat, lon),
        }),
        _ => Err(CommuteError::validation("Either --query or both --lat and --lon are required").into()),
    }
}

fn print_locations(home: &Location, work: &Location) {
    println!("Home: {} ({})", home.display_name("Home"), home.format_coordinates());
    println!("Work: {} ({})", work.display_name("Work"), work.format_coordinates());
}

fn print_weather(snapshot: &DashboardSnapshot) {
    let Some(weather) = &snapshot.weather else {
        println!("Weather unavailable");
        return;
    };

    let icon = match ConditionIcon::for_current(weather) {
        ConditionIcon::Sun => "☀",
        ConditionIcon::Cloud => "☁",
        ConditionIcon::Rain => "☂",
        ConditionIcon::Snow => "❄",
    };
    println!(
        "\n{icon} {} {} ({}), {}% chance of rain",
        weather.format_temperature(),
        weather.summary(),
        weather.description(),
        weather.precipitation_probability
    );

    for (index, day) in weather.daily.iter().enumerate() {
        println!(
            "  {:<5} {:>4.0}° / {:>4.0}°  {}",
            day.day_label(index),
            day.temperature_max,
            day.temperature_min,
            commuteos::models::weather::weather_code_to_description(day.weather_code)
        );
    }
}

fn print_commute(snapshot: &DashboardSnapshot) {
    if snapshot.options.is_empty() {
        println!("\nCommute unavailable");
        return;
    }

    println!("\nCommute");
    let commute = snapshot.commute.as_ref();
    for option in &snapshot.options {
        let (name, route) = match option.kind {
            CommuteKind::Rideshare => ("Rideshare", commute.and_then(|c| c.driving.as_ref())),
            CommuteKind::Bike => ("Bike", commute.and_then(|c| c.cycling.as_ref())),
        };
        let distance = route.map_or_else(|| "--".to_string(), |r| format!("{:.1} km", r.kilometers()));
        let price = option
            .price
            .map_or_else(|| "--".to_string(), |p| format!("${p:.2}"));
        let minutes = option
            .minutes
            .map_or_else(|| "--".to_string(), |m| format!("{m} min"));
        let best = if option.recommended { "  BEST OPTION" } else { "" };
        println!("  {name:<10} {price:>8} {minutes:>8} {distance:>9}{best}");
    }
}

fn print_outfit(snapshot: &DashboardSnapshot) {
    let Some(outfit) = &snapshot.outfit else {
        println!("\nOutfit unavailable");
        return;
    };

    println!("\nWear: {}", outfit.text);
    for note in &outfit.notes {
        println!("  {note}");
    }
    for advice in &snapshot.outfit_advice {
        println!("  {:<15} {}", advice.title, advice.text);
    }
}
