//! `metaview system`: user, version and domain types of the server.

use serde_json::json;
use tracing::instrument;

use metaview_core::{
    application::{Aggregator, SystemLinks, SystemLoader},
    domain::{DisplayModel, SystemDm},
};

use crate::{
    cli::SystemArgs,
    commands::task_failed,
    config::AppConfig,
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: SystemArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let ctx = AppContext::from_config(&config, &output)?;

    let mut links = SystemLinks::from_base(&ctx.base_url);
    if let Some(layout) = args.layout {
        links = links.with_layout(layout);
    }

    let (handle, queue) = Aggregator::<SystemDm>::channel();
    let loader = SystemLoader::new(ctx.resolver()).load(links, handle);

    let mut shown = None;
    let mut presenter = |dm: &SystemDm| shown = Some(dm.clone());
    let aggregator = Aggregator::new(SystemDm::new()).run(queue, &mut presenter).await;
    loader.await.map_err(task_failed)?;

    let Some(system) = shown else {
        return Err(CliError::Incomplete {
            what: "System overview".into(),
            reasons: aggregator.failures().to_vec(),
        });
    };

    if output.is_json() {
        output.json(&json!({
            "user": system.user,
            "version": system.version,
            "domainTypes": system.domain_types.as_ref().map(|t| t.names().collect::<Vec<_>>()),
        }))?;
        return Ok(());
    }

    output.header(system.title())?;
    output.field("server", &ctx.base_url)?;
    if let Some(user) = &system.user {
        output.field("user", &user.user_name)?;
        if !user.roles.is_empty() {
            output.field("roles", &user.roles.join(", "))?;
        }
    }
    if let Some(version) = &system.version {
        output.field("spec version", &version.spec_version)?;
        if let Some(implementation) = &version.impl_version {
            output.field("impl version", implementation)?;
        }
    }
    if let Some(types) = &system.domain_types {
        output.field("domain types", &types.values.len().to_string())?;
        for name in types.names() {
            output.print(&format!("    {name}"))?;
        }
    }
    for (href, reason) in aggregator.failures() {
        output.warning(&format!("{href}: {reason}"))?;
    }
    Ok(())
}
