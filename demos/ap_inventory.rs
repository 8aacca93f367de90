//! Access point inventory example for the AirWave client library.
//!
//! This example demonstrates how to:
//! - Create an AirWave client
//! - Log in to the appliance
//! - Fetch and parse the access point list
//! - Search the inventory by id or name
//!
//! Usage:
//! ```
//! AIRWAVE_HOST=192.168.0.100 AIRWAVE_USERNAME=admin AIRWAVE_PASSWORD=secret \
//!     cargo run --example ap_inventory
//! ```
//!
//! Pass access point ids as arguments to restrict the listing:
//! `cargo run --example ap_inventory -- 123 124 125`

use airwave_xml::{AirWaveClient, ApList};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Get connection details from environment variables
    let host = env::var("AIRWAVE_HOST").expect("AIRWAVE_HOST environment variable must be set");
    let username =
        env::var("AIRWAVE_USERNAME").expect("AIRWAVE_USERNAME environment variable must be set");
    let password =
        env::var("AIRWAVE_PASSWORD").expect("AIRWAVE_PASSWORD environment variable must be set");

    // Optional access point ids from the command line
    let ap_ids: Vec<u64> = env::args()
        .skip(1)
        .map(|arg| arg.parse())
        .collect::<Result<_, _>>()?;

    println!("Connecting to {}...", host);
    let mut client = AirWaveClient::new(&host, &username, &password)?;

    let login = client.login().await?;
    if !login.is_success() {
        eprintln!("Login rejected with status {}", login.status);
        eprintln!("Check your credentials and the appliance address.");
        std::process::exit(1);
    }
    println!("Logged in.");

    // Fetch and parse the inventory
    let response = client.ap_list(&ap_ids).await?;
    let inventory = ApList::parse(&response.body)?;

    println!("\n=== Access Points ({}) ===", inventory.len());
    for ap in &inventory {
        println!(
            "{:>5}  {:<20} {:<15} up={}",
            ap.id,
            ap.name().unwrap_or("(unnamed)"),
            ap.text("lan_ip").unwrap_or("-"),
            ap.text("is_up").unwrap_or("?"),
        );
    }

    // Point lookups work by id or by name
    if let Some(name) = inventory.iter().next().and_then(|ap| ap.name()) {
        let found = inventory.search(name);
        println!("\nsearch({:?}) -> id {:?}", name, found.map(|ap| ap.id));
    }

    client.logout()?;
    Ok(())
}
