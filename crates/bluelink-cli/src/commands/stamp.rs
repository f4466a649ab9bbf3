//! Stamp command - draw a request stamp for diagnostics

use anyhow::Result;
use bluelink_client::Brand;
use bluelink_core::stamp::pool;

use crate::output::OutputContext;

/// Print one stamp drawn from the brand's pool
pub fn stamp(brand: Brand, ctx: &OutputContext) -> Result<()> {
    let pool = pool(brand);
    let stamp = pool.draw()?;

    ctx.print_kv(&[
        ("Brand", brand.to_string()),
        ("Pool Size", pool.len().to_string()),
        ("Stamp", stamp.to_string()),
    ]);
    Ok(())
}
