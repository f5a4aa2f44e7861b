//! Walt CLI - Command line interface for the dispatch server.

mod client;
mod error;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use client::HttpClient;

/// Walt CLI - dispatch server management tool
#[derive(Parser)]
#[command(name = "walt")]
#[command(about = "CLI for the Walt dispatch server", long_about = None)]
struct Cli {
    /// Dispatch server address
    #[arg(short, long, default_value = "http://[::1]:8080")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Health,

    /// Place an order and assign a driver
    #[command(name = "create-order")]
    CreateOrder {
        /// Customer ID
        #[arg(short, long)]
        customer: String,

        /// Restaurant ID
        #[arg(short, long)]
        restaurant: String,

        /// Delivery time, RFC 3339 (e.g. 2024-05-01T12:00:00Z)
        #[arg(short, long)]
        time: DateTime<Utc>,

        /// Explicit distance for this delivery
        #[arg(short, long)]
        distance: Option<f64>,
    },

    /// Show drivers ranked by total distance
    Rank {
        /// Only count deliveries to customers in this city
        #[arg(short, long)]
        city: Option<String>,
    },

    /// List registered drivers
    #[command(name = "list-drivers")]
    ListDrivers,

    /// Show a driver's accumulated distance
    #[command(name = "driver-distance")]
    DriverDistance {
        /// Driver ID
        id: String,
    },
}

#[derive(Serialize)]
struct OrderRequest {
    customer_id: String,
    restaurant_id: String,
    delivery_time: DateTime<Utc>,
    distance: Option<f64>,
}

#[derive(Deserialize)]
struct DeliveryView {
    id: String,
    driver_id: String,
    driver_name: String,
    city_id: String,
    delivery_time: String,
    distance: f64,
}

#[derive(Deserialize)]
struct RankRow {
    driver_id: String,
    driver_name: String,
    city_id: String,
    total_distance: f64,
}

#[derive(Deserialize)]
struct DriverView {
    id: String,
    name: String,
    city_id: String,
    city_name: String,
}

#[derive(Deserialize)]
struct DriverDistanceView {
    driver_id: String,
    total_distance: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = HttpClient::new(&cli.addr);

    match cli.command {
        Commands::Health => health(&client).await?,
        Commands::CreateOrder {
            customer,
            restaurant,
            time,
            distance,
        } => {
            let request = OrderRequest {
                customer_id: customer,
                restaurant_id: restaurant,
                delivery_time: time,
                distance,
            };
            create_order(&client, &request).await?;
        }
        Commands::Rank { city } => rank(&client, city).await?,
        Commands::ListDrivers => list_drivers(&client).await?,
        Commands::DriverDistance { id } => driver_distance(&client, &id).await?,
    }

    Ok(())
}

async fn health(client: &HttpClient) -> Result<(), Box<dyn std::error::Error>> {
    let status: serde_json::Value = client.get_json(&["health"]).await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

async fn create_order(
    client: &HttpClient,
    request: &OrderRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let delivery: DeliveryView = client.post_json(&["v1", "orders"], request).await?;

    println!("Delivery created:");
    println!("  ID:        {}", delivery.id);
    println!("  Driver:    {} ({})", delivery.driver_name, delivery.driver_id);
    println!("  City:      {}", delivery.city_id);
    println!("  Time:      {}", delivery.delivery_time);
    println!("  Distance:  {:.2}", delivery.distance);

    Ok(())
}

async fn rank(client: &HttpClient, city: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let query: Vec<(&str, &str)> = city.iter().map(|c| ("city_id", c.as_str())).collect();
    let rows: Vec<RankRow> = client
        .get_json_with_query(&["v1", "reports", "driver-rank"], &query)
        .await?;

    println!("Drivers by total distance ({}):", rows.len());
    println!("{:<4}  {:<36}  {:<16}  {:<12}  {}", "#", "ID", "NAME", "CITY", "DISTANCE");
    println!("{}", "-".repeat(86));

    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:<4}  {:<36}  {:<16}  {:<12}  {:.2}",
            rank + 1,
            row.driver_id,
            row.driver_name,
            row.city_id,
            row.total_distance
        );
    }

    Ok(())
}

async fn list_drivers(client: &HttpClient) -> Result<(), Box<dyn std::error::Error>> {
    let drivers: Vec<DriverView> = client.get_json(&["v1", "drivers"]).await?;

    println!("Drivers ({}):", drivers.len());
    println!("{:<36}  {:<16}  {}", "ID", "NAME", "CITY");
    println!("{}", "-".repeat(72));

    for driver in drivers {
        println!(
            "{:<36}  {:<16}  {} ({})",
            driver.id, driver.name, driver.city_name, driver.city_id
        );
    }

    Ok(())
}

async fn driver_distance(client: &HttpClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let view: DriverDistanceView = client
        .get_json(&["v1", "drivers", id, "distance"])
        .await?;
    println!("{}  {:.2}", view.driver_id, view.total_distance);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_parses_rfc3339_time() {
        let cli = Cli::try_parse_from([
            "walt",
            "create-order",
            "--customer",
            "c1",
            "--restaurant",
            "r1",
            "--time",
            "2024-05-01T12:00:00Z",
        ])
        .unwrap();

        match cli.command {
            Commands::CreateOrder { time, distance, .. } => {
                assert_eq!(time.to_rfc3339(), "2024-05-01T12:00:00+00:00");
                assert!(distance.is_none());
            }
            _ => panic!("expected create-order"),
        }
    }

    #[test]
    fn test_bad_time_is_rejected() {
        let result = Cli::try_parse_from([
            "walt",
            "create-order",
            "-c",
            "c1",
            "-r",
            "r1",
            "-t",
            "tomorrow",
        ]);
        assert!(result.is_err());
    }
}
