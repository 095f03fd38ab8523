mod render;

use clap::{Parser, Subcommand};
use nearby_core::{Category, Coordinate, SearchQuery, SortKey};
use nearby_places::{Aggregator, PlacesClient};
use tracing_subscriber::EnvFilter;

/// Amsterdam Centraal, used when no location is given.
const DEFAULT_LAT: f64 = 52.378_001;
const DEFAULT_LNG: f64 = 4.899_570;

#[derive(Debug, Parser)]
#[command(name = "nearby")]
#[command(about = "Search nearby bars, cafes and restaurants")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List places around a location, merged across categories.
    Search {
        #[arg(long, default_value_t = DEFAULT_LAT, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, default_value_t = DEFAULT_LNG, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius in meters (defaults to `NEARBY_DEFAULT_RADIUS_METERS`).
        #[arg(long)]
        radius: Option<u32>,
        /// Category to include; repeat for several. Defaults to all.
        #[arg(long = "category", short = 'c')]
        categories: Vec<Category>,
        /// Ordering: rating, name, open-now or distance.
        #[arg(long, default_value_t = SortKey::Rating)]
        sort: SortKey,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show phone, address, photos and reviews for one place.
    Details {
        place_id: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = nearby_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = PlacesClient::from_config(&config)?;

    match cli.command {
        Commands::Search {
            lat,
            lng,
            radius,
            categories,
            sort,
            json,
        } => {
            let categories = if categories.is_empty() {
                Category::ALL.to_vec()
            } else {
                categories
            };
            let query = SearchQuery::new(
                Coordinate::new(lat, lng),
                radius.unwrap_or(config.default_radius_meters),
                categories,
            );
            tracing::debug!(?query, %sort, "running nearby search");

            let aggregator = Aggregator::new(client);
            let mut places = aggregator.aggregate(&query).await?;
            sort.sort(&mut places);

            if json {
                println!("{}", serde_json::to_string_pretty(&places)?);
            } else {
                print!("{}", render::place_list(&places));
            }
        }
        Commands::Details { place_id, json } => {
            let details = client.get_place_details(&place_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                let photo_urls: Vec<String> = details
                    .photos
                    .iter()
                    .map(|p| client.photo_url(&p.photo_reference).to_string())
                    .collect();
                print!("{}", render::place_details(&details, &photo_urls));
            }
        }
    }

    Ok(())
}
