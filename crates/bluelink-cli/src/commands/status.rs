//! Status command - fetch status snapshots

use anyhow::{bail, Result};
use bluelink_client::{BluelinkClient, Vehicle};

use crate::output::{OutputContext, StatusRow};

/// Show the status of one vehicle, or of every vehicle on the account
pub async fn status(
    client: &BluelinkClient,
    vehicle: Option<&str>,
    ctx: &OutputContext,
) -> Result<()> {
    let vehicles = select(client.list_vehicles().await?, vehicle)?;

    let mut rows = Vec::with_capacity(vehicles.len());
    for vehicle in &vehicles {
        ctx.info(&format!("Fetching status of {}", vehicle));
        let status = vehicle.status().await?;
        rows.push(StatusRow {
            vehicle: vehicle.name().to_string(),
            soc: status.soc(),
            range: status.range_left(),
            max_range: status.max_range(),
            charging: status.is_charging(),
            plugged_in: status.is_plugged_in(),
            locked: status.door_is_locked(),
            target_soc_ac: status.target_soc_ac(),
            target_soc_dc: status.target_soc_dc(),
            updated_at: status.updated_at().to_rfc3339(),
        });
    }

    ctx.print(&rows);
    Ok(())
}

/// Keep the vehicles matching an id, VIN or name; all of them without a query
fn select<'a>(vehicles: Vec<Vehicle<'a>>, query: Option<&str>) -> Result<Vec<Vehicle<'a>>> {
    let Some(query) = query else {
        return Ok(vehicles);
    };

    let selected: Vec<Vehicle<'a>> = vehicles
        .into_iter()
        .filter(|v| v.id() == query || v.vin() == query || v.name().eq_ignore_ascii_case(query))
        .collect();

    if selected.is_empty() {
        bail!("No vehicle matching '{}'", query);
    }
    Ok(selected)
}
