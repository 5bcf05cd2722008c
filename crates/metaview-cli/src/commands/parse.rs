//! `metaview parse`: turn a saved JSON response into a transfer object.

use metaview_core::{application::HandlerRegistry, domain::TransferObject};
use tracing::{debug, instrument};

use crate::{
    cli::ParseArgs,
    commands::read_payload,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: ParseArgs, output: OutputManager) -> CliResult<()> {
    let raw = read_payload(&args.file)?;
    let registry = HandlerRegistry::new();

    let obj = match args.kind {
        Some(kind) => registry.parse(kind.into(), &raw),
        None => registry.parse_any(&raw),
    }
    .map_err(|e| CliError::Core(e.into()))?;
    debug!(kind = %obj.kind(), "Parsed payload");

    if output.is_json() {
        output.json(&obj)?;
        return Ok(());
    }

    output.success(&format!("Parsed {} payload", obj.kind()))?;
    for (key, value) in summary(&obj) {
        output.field(&key, &value)?;
    }
    output.field("links", &obj.links().len().to_string())?;
    Ok(())
}

/// Key facts of a payload, in display order.
fn summary(obj: &TransferObject) -> Vec<(String, String)> {
    let field = |k: &str, v: String| (k.to_string(), v);
    match obj {
        TransferObject::Menu(menu) => vec![
            field("menu", menu.named.clone()),
            field("actions", menu.service_actions().count().to_string()),
        ],
        TransferObject::MenuEntry(bar) => vec![field(
            "menus",
            bar.menus.iter().map(|m| m.named.as_str()).collect::<Vec<_>>().join(", "),
        )],
        TransferObject::Layout(layout) => vec![
            field("rows", layout.rows.len().to_string()),
            field("properties", layout.property_order().join(", ")),
            field("actions", layout.action_order().join(", ")),
        ],
        TransferObject::DomainType(t) => vec![
            field("type", t.canonical_name.clone()),
            field("properties", t.properties().count().to_string()),
            field("actions", t.actions().count().to_string()),
        ],
        TransferObject::DomainTypes(types) => {
            vec![field("types", types.names().collect::<Vec<_>>().join(", "))]
        }
        TransferObject::MemberDescription(d) => vec![
            field("member", d.id.clone()),
            field("kind", d.kind.to_string()),
            field("returns", d.return_type.clone().unwrap_or_else(|| "-".into())),
        ],
        TransferObject::ResultObject(r) => vec![
            field("result type", r.result_type.to_string()),
            field("title", r.result.title.clone()),
        ],
        TransferObject::ResultValue(r) => vec![
            field("result type", r.result_type.to_string()),
            field("value", r.result.value.to_string()),
        ],
        TransferObject::DomainObject(o) => vec![
            field("title", o.title.clone()),
            field("members", o.members.len().to_string()),
        ],
        TransferObject::User(u) => vec![
            field("user", u.user_name.clone()),
            field("roles", u.roles.join(", ")),
        ],
        TransferObject::Version(v) => vec![
            field("spec version", v.spec_version.clone()),
            field("impl version", v.impl_version.clone().unwrap_or_else(|| "-".into())),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metaview_core::domain::{PayloadKind, User};

    #[test]
    fn user_summary() {
        let obj = TransferObject::User(User {
            user_name: "sven".into(),
            roles: vec!["admin".into(), "user".into()],
            links: vec![],
        });
        assert_eq!(
            summary(&obj),
            vec![
                ("user".to_string(), "sven".to_string()),
                ("roles".to_string(), "admin, user".to_string()),
            ]
        );
    }

    #[test]
    fn domain_type_summary_counts_members() {
        let obj = HandlerRegistry::new()
            .parse(
                PayloadKind::DomainType,
                r#"{"canonicalName": "demo.Customer", "members": [
                    {"rel": "urn:org.restfulobjects:rels/property", "href": "http://x/properties/name"},
                    {"rel": "urn:org.restfulobjects:rels/action", "href": "http://x/actions/rename"}
                ]}"#,
            )
            .unwrap();
        let facts = summary(&obj);
        assert_eq!(facts[0].1, "demo.Customer");
        assert_eq!(facts[1].1, "1");
        assert_eq!(facts[2].1, "1");
    }
}
