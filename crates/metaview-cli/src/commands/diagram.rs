//! `metaview diagram`: class diagram of a domain type.
//!
//! The type comes either from a saved response (`--file`) or from the server,
//! in which case the type and its member descriptions are aggregated first.

use std::path::Path;

use tracing::{info, instrument};

use metaview_core::{
    application::{Aggregator, DiagramPresenter, HandlerRegistry, TypeLoader, ports::SlotId},
    domain::{
        DiagramBuilder, DiagramDm, DiagramText, DisplayModel, DomainType, Layout, PayloadKind,
        TransferObject,
    },
};

use crate::{
    cli::DiagramArgs,
    commands::{read_payload, task_failed},
    config::AppConfig,
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: DiagramArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let layout = args.layout.as_deref().map(load_layout).transpose()?;

    match (&args.file, &args.type_name) {
        (Some(file), _) => {
            let domain_type = load_domain_type(file)?;
            let text = DiagramBuilder::new().build_for_type(&domain_type, layout.as_ref());
            if args.text_only {
                output.result(text.as_str())?;
                return Ok(());
            }
            let ctx = AppContext::from_config(&config, &output)?;
            render(&ctx, text, SlotId::new(args.slot.clone())).await
        }
        (None, Some(type_name)) => {
            let ctx = AppContext::from_config(&config, &output)?;
            remote(&ctx, type_name, layout, &args, &output).await
        }
        (None, None) => Err(CliError::InvalidInput {
            message: "give a domain type name or --file".into(),
            source: None,
        }),
    }
}

async fn render(ctx: &AppContext, text: DiagramText, slot: SlotId) -> CliResult<()> {
    let task = ctx.diagram_service().generate_diagram(text, slot);
    task.await.map_err(task_failed)
}

async fn remote(
    ctx: &AppContext,
    type_name: &str,
    layout: Option<Layout>,
    args: &DiagramArgs,
    output: &OutputManager,
) -> CliResult<()> {
    let model = if args.no_member_types {
        DiagramDm::without_member_types()
    } else {
        DiagramDm::new()
    };

    let (handle, queue) = Aggregator::<DiagramDm>::channel();
    if let Some(layout) = layout {
        handle.send(TransferObject::Layout(layout));
    }
    let loader = TypeLoader::new(ctx.resolver()).load(
        TypeLoader::type_link(&ctx.base_url, type_name),
        None,
        handle,
    );

    let aggregator = if args.text_only {
        let mut text = None;
        let mut presenter = |dm: &DiagramDm| {
            text = dm
                .meta_class()
                .map(|class| DiagramBuilder::new().build(&class, dm.layout()));
        };
        let aggregator = Aggregator::new(model).run(queue, &mut presenter).await;
        if let Some(text) = text {
            output.result(text.as_str())?;
        }
        aggregator
    } else {
        let slot = SlotId::new(args.slot.clone());
        let mut presenter = DiagramPresenter::new(ctx.diagram_service(), slot);
        let aggregator = Aggregator::new(model).run(queue, &mut presenter).await;
        if let Some(task) = presenter.take_task() {
            task.await.map_err(task_failed)?;
        }
        aggregator
    };
    // The loader has posted everything once the queue drained.
    let _ = loader.await;

    if !aggregator.model().is_rendered() {
        return Err(CliError::Incomplete {
            what: format!("Domain type {type_name}"),
            reasons: aggregator.failures().to_vec(),
        });
    }
    info!(type_name, "Diagram presented");
    Ok(())
}

fn load_domain_type(path: &Path) -> CliResult<DomainType> {
    let raw = read_payload(path)?;
    match HandlerRegistry::new().parse(PayloadKind::DomainType, &raw) {
        Ok(TransferObject::DomainType(domain_type)) => Ok(domain_type),
        Ok(other) => Err(unexpected(path, &other)),
        Err(e) => Err(CliError::Core(e.into())),
    }
}

fn load_layout(path: &Path) -> CliResult<Layout> {
    let raw = read_payload(path)?;
    match HandlerRegistry::new().parse(PayloadKind::Layout, &raw) {
        Ok(TransferObject::Layout(layout)) => Ok(layout),
        Ok(other) => Err(unexpected(path, &other)),
        Err(e) => Err(CliError::Core(e.into())),
    }
}

fn unexpected(path: &Path, obj: &TransferObject) -> CliError {
    CliError::InvalidInput {
        message: format!("'{}' holds a {} payload", path.display(), obj.kind()),
        source: None,
    }
}
