//! `metaview watch`: write server-pushed messages into a slot.

use tracing::instrument;

use metaview_adapters::PushListener;
use metaview_core::application::ports::SlotId;

use crate::{
    cli::WatchArgs,
    config::AppConfig,
    context::AppContext,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: WatchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let ctx = AppContext::from_config(&config, &output)?;
    let url = args.url.or(config.push.url);
    if let Some(url) = &url {
        output.info(&format!("Listening on {url}"))?;
    }

    let delivered = PushListener::new(url, ctx.slots.clone(), SlotId::new(args.slot))
        .listen()
        .await?;
    output.success(&format!("Stream closed after {delivered} message(s)"))?;
    Ok(())
}
