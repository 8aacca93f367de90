//! RRD graph URL composition example.
//!
//! Graph URLs are pure string composition: no session is needed to
//! build them, only to fetch them. This prints every documented graph
//! series for one access point, ready to embed in a report or
//! dashboard.
//!
//! Usage:
//! ```
//! cargo run --example graph_urls -- 192.168.0.100 1 01:23:45:67:89:AB
//! ```

use airwave_xml::{AirWaveClient, ApGraphParams, QueryParams, RadioGraphParams};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <host> <ap_id> <ap_uid>", args[0]);
        eprintln!("Example: {} 192.168.0.100 1 01:23:45:67:89:AB", args[0]);
        std::process::exit(1);
    }
    let host = &args[1];
    let ap_id: u64 = args[2].parse()?;
    let ap_uid = &args[3];

    // Credentials play no part in URL composition
    let client = AirWaveClient::new(host.as_str(), "none", "none")?;

    // AP-scoped series over the last hour
    let ap_params = ApGraphParams::new(ap_id, 0, 3600);
    println!("=== Access Point Graphs (last hour) ===");
    println!("{}", client.ap_client_count_graph_url(&ap_params)?);
    println!("{}", client.ap_bandwidth_graph_url(&ap_params)?);
    println!("{}", client.dot11_counters_graph_url(&ap_params)?);

    // Radio-scoped series over the last day
    let radio_params = RadioGraphParams::new(ap_uid.as_str(), 0, 1, 86400);
    println!("\n=== Radio Graphs (last day) ===");
    println!("{}", client.radio_channel_graph_url(&radio_params)?);
    println!("{}", client.radio_noise_graph_url(&radio_params)?);
    println!("{}", client.radio_power_graph_url(&radio_params)?);
    println!("{}", client.radio_errors_graph_url(&radio_params)?);
    println!("{}", client.radio_goodput_graph_url(&radio_params)?);
    println!("{}", client.channel_utilization_graph_url(&radio_params)?);

    // A window that does not end now: the hour before last
    let earlier = ApGraphParams::new(ap_id, 0, 7200).end(3600);
    println!("\n=== Previous hour ===");
    println!("{}", client.ap_bandwidth_graph_url(&earlier)?);

    // Arbitrary parameters for series the named methods don't cover
    let mut custom = QueryParams::new();
    custom.insert("type", "ap_client_count");
    custom.insert("id", ap_id);
    custom.insert("start", "-604800s");
    custom.insert("end", "-0s");
    println!("\n=== Custom composition ===");
    println!("{}", client.rrd_graph_url(&custom)?);

    Ok(())
}
