use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_cli::{plan_trip, Settings};
use trip_core::{TripSpec, TripType};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan a hike or bike trip and print it as JSON", long_about = None)]
struct Args {
    /// Place to start from (hike) or ride towards (bike)
    #[arg(long)]
    destination: String,

    /// Trip type: hike (alias trek) or bike
    #[arg(long = "type", default_value = "hike")]
    trip_type: String,

    /// Ride length in days (bike only, 2 or 3)
    #[arg(long)]
    days: Option<u32>,

    /// Narrate the route with the text service
    #[arg(long)]
    enrich: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trip_core=info".parse()?)
                .add_directive("plan_trip=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let trip_type: TripType = args.trip_type.parse()?;
    let trip = TripSpec::new(args.destination, trip_type, args.days);

    let settings = Settings::from_env();
    let ors = settings.ors_client()?;
    let chat = if args.enrich {
        Some(settings.chat_client()?)
    } else {
        None
    };

    tracing::info!("Planning {} trip for '{}'", trip.trip_type, trip.destination);
    let plan = plan_trip(&ors, &ors, chat.as_ref(), &trip, settings.retry).await?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
