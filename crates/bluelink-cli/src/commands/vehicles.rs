//! Vehicles command - list the vehicles bound to the account

use anyhow::Result;
use bluelink_client::BluelinkClient;

use crate::output::{OutputContext, VehicleRow};

/// List all vehicles of the authenticated account
pub async fn vehicles(client: &BluelinkClient, ctx: &OutputContext) -> Result<()> {
    let vehicles = client.list_vehicles().await?;

    let rows: Vec<VehicleRow> = vehicles
        .iter()
        .map(|v| VehicleRow {
            id: v.id().to_string(),
            name: v.name().to_string(),
            vin: v.vin().to_string(),
            vehicle_type: v.vehicle_type().to_string(),
            brand: v.brand().to_string(),
        })
        .collect();

    ctx.print(&rows);
    Ok(())
}
