use std::sync::Arc;

use dotenv::dotenv;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use wkt::ToWkt;

use routepick::surface::ClickHandle;
use routepick::util::trace::initialize_logger;
use routepick::{Config, Coordinate, HeadlessSurface, HttpBackend, MapSession};

/// Parses a `lat,lng` line.
fn parse_click(line: &str) -> Option<Coordinate> {
    let (lat, lng) = line.trim().split_once(',')?;
    let lat = lat.trim().parse().ok()?;
    let lng = lng.trim().parse().ok()?;

    Coordinate::new(lat, lng)
        .inspect_err(|err| warn!("{err}"))
        .ok()
}

async fn read_clicks(clicks: ClickHandle) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_click(&line) {
            Some(at) => {
                clicks.click(at);
            }
            None => warn!("Skipping click {line:?}, expected `lat,lng`"),
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load `.env` file, if present. It may carry `RUST_LOG`, so it is read
    // before the logger starts.
    let env_file = dotenv();
    initialize_logger();

    if env_file.is_err() {
        info!("No .env file, using the process environment");
    }

    let config = Config::from_env()?;
    info!("Routing through {}", config.backend.base_url);

    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    let (surface, clicks) = HeadlessSurface::new();

    let mut session = MapSession::open(
        surface,
        Arc::clone(&backend),
        backend,
        &config.view,
    );

    let (_, read) = tokio::join!(session.run(), read_clicks(clicks));
    read?;

    let surface = session.into_surface();
    match surface.polylines().first() {
        Some(route) => println!("{}", Coordinate::linestring(route).wkt_string()),
        None => println!("No route"),
    }

    Ok(())
}
