//! Update fields on an existing event.

use anyhow::{Context, Result, bail};

use bidboard_core::event::{EventCategory, EventPatch};
use bidboard_core::store::EventGateway;

use super::new::parse_stamp;

pub struct UpdateArgs {
    pub id: String,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

pub async fn run(gateway: &EventGateway, args: UpdateArgs) -> Result<()> {
    let patch = EventPatch {
        title: args.title,
        start: args
            .start
            .as_deref()
            .map(parse_stamp)
            .transpose()?
            .map(|(dt, _)| dt),
        end: args
            .end
            .as_deref()
            .map(parse_stamp)
            .transpose()?
            .map(|(dt, _)| dt),
        all_day: None,
        description: args.description,
        location: args.location,
        color: None,
        category: args
            .category
            .as_deref()
            .map(|raw| {
                EventCategory::parse_lenient(raw)
                    .with_context(|| format!("Unknown category '{}'", raw))
            })
            .transpose()?,
    };

    if patch.is_empty() {
        bail!("Nothing to update; pass at least one field flag");
    }

    let updated = gateway.update(&args.id, &patch).await?;
    println!("Updated '{}' ({})", updated.title, updated.id);
    Ok(())
}
