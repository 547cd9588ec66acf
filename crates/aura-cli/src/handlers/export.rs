use crate::cli::ExportArgs;
use crate::context::CliContext;
use crate::output;
use aura_domain::LeadExporter;
use serde_json::json;

pub fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let selection = ctx.selection(&args.selection)?;
    let scope = selection.export_scope(ctx.store.leads());

    match args.dir {
        Some(dir) => {
            let prefix = ctx.config.effective_export_prefix();
            let path = LeadExporter::export_to_dir(&dir, prefix, &scope)?;
            output::output_success(json!({
                "path": path.display().to_string(),
                "count": scope.len(),
            }))
        }
        None => {
            println!("{}", selection.export(ctx.store.leads()));
            Ok(())
        }
    }
}
