use crate::cli::{SelectionArgs, SessionArgs};
use aura_core::{AppConfig, AuraError, AuraResult, FileSource};
use aura_domain::{
    Confirm, CrmOperations, EntityStore, ImportSession, LeadId, LeadSelection, ListId, TaskId,
};
use std::io::{BufRead, Write};
use uuid::Uuid;

/// State for one invocation: the config plus a fresh in-memory store.
pub struct CliContext {
    pub store: EntityStore,
    pub config: AppConfig,
}

impl CliContext {
    pub async fn load(args: &SessionArgs) -> anyhow::Result<Self> {
        let config = match &args.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };
        let store = if args.no_seed || !config.should_seed_demo_data() {
            EntityStore::new()
        } else {
            EntityStore::with_demo_data()
        };
        let mut ctx = Self { store, config };

        for path in &args.csv {
            let mut session = ImportSession::new();
            session.read_from(&FileSource::new(path)).await?;
            let tag = ctx.config.effective_import_tag().to_string();
            let report = session.finish(&mut ctx.store, &tag)?;
            tracing::debug!(
                "Preloaded {} leads from {}",
                report.imported_count(),
                path.display()
            );
        }

        for entry in &args.lists {
            ctx.preload_list(entry)?;
        }

        Ok(ctx)
    }

    fn preload_list(&mut self, entry: &str) -> anyhow::Result<()> {
        let (name, refs) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected NAME=LEAD[,LEAD...], got '{}'", entry))?;
        let ids = refs
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| self.resolve_lead(r))
            .collect::<AuraResult<Vec<_>>>()?;
        self.store.create_list(name.to_string(), ids)?;
        Ok(())
    }

    pub fn import_tag(&self, explicit: Option<String>) -> String {
        explicit.unwrap_or_else(|| self.config.effective_import_tag().to_string())
    }

    /// Find a lead by id, or by exact (case-insensitive) name.
    pub fn resolve_lead(&self, reference: &str) -> AuraResult<LeadId> {
        let leads = self.store.leads();
        if let Ok(id) = Uuid::parse_str(reference) {
            return leads
                .iter()
                .find(|l| l.id == id)
                .map(|l| l.id)
                .ok_or_else(|| AuraError::NotFound(format!("Lead {}", reference)));
        }
        let matches: Vec<LeadId> = leads
            .iter()
            .filter(|l| l.name.eq_ignore_ascii_case(reference.trim()))
            .map(|l| l.id)
            .collect();
        unique(matches, "Lead", reference)
    }

    /// Find a task by id, or by exact (case-insensitive) title.
    pub fn resolve_task(&self, reference: &str) -> AuraResult<TaskId> {
        let tasks = self.store.tasks();
        if let Ok(id) = Uuid::parse_str(reference) {
            return tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.id)
                .ok_or_else(|| AuraError::NotFound(format!("Task {}", reference)));
        }
        let matches: Vec<TaskId> = tasks
            .iter()
            .filter(|t| t.title.eq_ignore_ascii_case(reference.trim()))
            .map(|t| t.id)
            .collect();
        unique(matches, "Task", reference)
    }

    /// Find a list by id or name. Unknown ids pass through so the store
    /// reports them.
    pub fn resolve_list(&self, reference: &str) -> AuraResult<ListId> {
        if let Ok(id) = Uuid::parse_str(reference) {
            return Ok(id);
        }
        let matches: Vec<ListId> = self
            .store
            .lists()
            .iter()
            .filter(|l| l.name.eq_ignore_ascii_case(reference.trim()))
            .map(|l| l.id)
            .collect();
        unique(matches, "List", reference)
    }

    pub fn selection(&self, args: &SelectionArgs) -> AuraResult<LeadSelection> {
        let mut selection = LeadSelection::new();
        if args.all {
            selection.toggle_all(self.store.leads());
            return Ok(selection);
        }
        for reference in &args.leads {
            let id = self.resolve_lead(reference)?;
            if !selection.is_selected(id) {
                selection.toggle(id);
            }
        }
        Ok(selection)
    }
}

fn unique(matches: Vec<Uuid>, kind: &str, reference: &str) -> AuraResult<Uuid> {
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(AuraError::NotFound(format!("{} '{}'", kind, reference))),
        _ => Err(AuraError::Validation(format!(
            "{} name '{}' is ambiguous; use its id",
            kind, reference
        ))),
    }
}

/// Asks on stderr and reads the answer from stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        std::io::stderr().flush().ok();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
