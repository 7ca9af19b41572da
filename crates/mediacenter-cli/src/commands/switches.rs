use crate::OutputFormat;
use anyhow::Result;
use mediacenter_browser::{EngineSwitches, ProfileDirectory};
use serde_json::json;

/// Print the switches the host hands to the browser engine at startup
pub fn execute(profile: &ProfileDirectory, format: OutputFormat) -> Result<()> {
    let switches = EngineSwitches::for_profile(profile);

    if switches.cdm().is_none() {
        tracing::info!("No usable Widevine CDM configured; protected playback unavailable");
    }

    if format.is_json() {
        let map: serde_json::Map<String, serde_json::Value> = switches
            .iter()
            .map(|s| (s.name.to_string(), json!(s.value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for arg in switches.to_args() {
            println!("{}", arg);
        }
    }

    Ok(())
}
