//! `metaview object`: a domain object together with its layout.

use tracing::instrument;

use metaview_core::{
    application::{Aggregator, ObjectLoader},
    domain::{DisplayModel, DomainObject, Link, ObjectDm},
};

use crate::{
    cli::ObjectArgs,
    commands::task_failed,
    config::AppConfig,
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(url = %args.url))]
pub async fn execute(args: ObjectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let ctx = AppContext::from_config(&config, &output)?;

    let (handle, queue) = Aggregator::<ObjectDm>::channel();
    let loader = ObjectLoader::new(ctx.resolver()).load(Link::new("self", args.url.clone()), handle);

    let mut shown = None;
    let mut presenter = |dm: &ObjectDm| {
        shown = dm.object().cloned().map(|object| (object, dm.layout().cloned()));
    };
    let aggregator = Aggregator::new(ObjectDm::new()).run(queue, &mut presenter).await;
    loader.await.map_err(task_failed)?;

    let Some((object, layout)) = shown else {
        return Err(CliError::Incomplete {
            what: format!("Object {}", args.url),
            reasons: aggregator.failures().to_vec(),
        });
    };

    if output.is_json() {
        output.json(&object)?;
        return Ok(());
    }

    output.header(&object.title)?;
    if let Some(domain_type) = &object.domain_type {
        output.field("type", domain_type)?;
    }
    // Layout order first, then whatever the layout leaves out.
    let mut ids: Vec<&str> = layout
        .as_ref()
        .map(|l| l.property_order())
        .unwrap_or_default()
        .into_iter()
        .filter(|id| object.members.contains_key(*id))
        .collect();
    for id in object.members.keys() {
        if !ids.contains(&id.as_str()) {
            ids.push(id);
        }
    }
    for id in ids {
        output.field(id, &member_value(&object, id))?;
    }
    Ok(())
}

fn member_value(object: &DomainObject, id: &str) -> String {
    match object.property_value(id) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
        None => object
            .members
            .get(id)
            .map(|m| format!("<{}>", m.member_type))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metaview_core::application::HandlerRegistry;
    use metaview_core::domain::{PayloadKind, TransferObject};

    #[test]
    fn member_values_are_unquoted_strings() {
        let obj = HandlerRegistry::new()
            .parse(
                PayloadKind::DomainObject,
                r#"{"title": "Bilbo", "members": {
                    "name": {"id": "name", "memberType": "property", "value": "Bilbo"},
                    "age": {"id": "age", "memberType": "property", "value": 111},
                    "rename": {"id": "rename", "memberType": "action"}
                }}"#,
            )
            .unwrap();
        let TransferObject::DomainObject(object) = obj else {
            panic!("expected domain object");
        };
        assert_eq!(member_value(&object, "name"), "Bilbo");
        assert_eq!(member_value(&object, "age"), "111");
        assert_eq!(member_value(&object, "rename"), "<action>");
    }
}
