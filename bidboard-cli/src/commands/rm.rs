//! Delete an event.

use anyhow::Result;

use bidboard_core::store::EventGateway;

pub async fn run(gateway: &EventGateway, id: &str) -> Result<()> {
    gateway.remove(id).await?;
    println!("Removed {}", id);
    Ok(())
}
