//! Access point detail report example.
//!
//! Fetches the detail record for one access point and prints every
//! field in the order the appliance reports them, then the configured
//! radios and the generated report list.
//!
//! Usage:
//! ```
//! AIRWAVE_HOST=192.168.0.100 AIRWAVE_USERNAME=admin AIRWAVE_PASSWORD=secret \
//!     cargo run --example ap_report -- 1
//! ```

use airwave_xml::{AirWaveClient, AirWaveError, ApDetail, ApGraphParams, Value};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let host = env::var("AIRWAVE_HOST").expect("AIRWAVE_HOST environment variable must be set");
    let username =
        env::var("AIRWAVE_USERNAME").expect("AIRWAVE_USERNAME environment variable must be set");
    let password =
        env::var("AIRWAVE_PASSWORD").expect("AIRWAVE_PASSWORD environment variable must be set");

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <ap_id>", args[0]);
        eprintln!("Example: {} 1", args[0]);
        std::process::exit(1);
    }
    let ap_id: u64 = args[1].parse()?;

    let mut client = AirWaveClient::new(&host, &username, &password)?;

    let login = client.login().await?;
    if !login.is_success() {
        eprintln!("Login rejected with status {}", login.status);
        std::process::exit(1);
    }

    let detail = match client.ap_detail(ap_id).await {
        Ok(response) => ApDetail::parse(&response.body)?,
        Err(AirWaveError::AuthenticationFailed { reason }) => {
            eprintln!("Session rejected by the appliance: {}", reason);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "=== AP {} (id {}) ===",
        detail.text("name").unwrap_or("?"),
        ap_id
    );
    for (key, value) in detail.iter() {
        match value {
            Value::Text(text) => println!("{:<24} {}", key, text),
            Value::Fields(fields) => println!("{:<24} ({} nested fields)", key, fields.len()),
        }
    }

    println!("\n=== Radios ===");
    for radio in detail.get_all("radio").filter_map(Value::as_fields) {
        println!(
            "index {}  interface {}  type {}",
            radio.text("@index").unwrap_or("?"),
            radio.text("radio_interface").unwrap_or("?"),
            radio.text("radio_type").unwrap_or("?"),
        );
    }

    // Graph URLs to embed alongside the report, last 24 hours
    let graph = ApGraphParams::new(ap_id, 0, 86400);
    println!("\n=== Graphs (last day) ===");
    println!("{}", client.ap_client_count_graph_url(&graph)?);
    println!("{}", client.ap_bandwidth_graph_url(&graph)?);

    // Report listings are XML when format=xml is requested, which the
    // client always does
    let reports = client.report_list(None).await?;
    println!("\n=== Report List ===");
    println!("Fetched {} ({} bytes)", reports.url, reports.body.len());

    client.logout()?;
    Ok(())
}
