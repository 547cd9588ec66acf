use crate::cli::{ImportArgs, MappingArgs};
use crate::context::CliContext;
use crate::output;
use aura_core::{AuraError, FileSource};
use aura_domain::ImportSession;
use serde_json::json;

/// Read the file into a session and apply any `HEADER=FIELD` overrides.
async fn open_session(file: &std::path::Path, overrides: &[String]) -> anyhow::Result<ImportSession> {
    let mut session = ImportSession::new();
    session.read_from(&FileSource::new(file)).await?;
    if let Some(mapping) = session.mapping_mut() {
        for pair in overrides {
            mapping.apply_override(pair)?;
        }
    }
    Ok(session)
}

pub async fn handle_mapping(args: MappingArgs) -> anyhow::Result<()> {
    let session = open_session(&args.file, &args.overrides).await?;
    let (Some(parsed), Some(mapping)) = (session.parsed(), session.mapping()) else {
        return Err(AuraError::Internal("Import session has no mapping".into()).into());
    };
    let entries: Vec<_> = mapping
        .entries()
        .iter()
        .map(|e| {
            json!({
                "header": e.header,
                "field": e.field,
                "label": e.field.map(|f| f.label()).unwrap_or("Don't Import"),
            })
        })
        .collect();
    output::output_success(json!({
        "file": args.file.display().to_string(),
        "headers": parsed.headers,
        "rows": parsed.row_count(),
        "mapping": entries,
        "preview": session.preview(),
    }))
}

pub async fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.file, &args.overrides).await?;
    let tag = ctx.import_tag(args.tag);
    let report = session.finish(&mut ctx.store, &tag)?;
    output::output_success(json!({
        "imported": report.imported_count(),
        "skipped": report.skipped,
        "total_leads": ctx.store.leads().len(),
        "leads": report.imported,
    }))
}
