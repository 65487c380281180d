//! The title-normalisation rule engine.
//!
//! [`Normalizer::normalize`] applies a fixed sequence of steps to a
//! working copy of a task: strip the external reminder prefix, tokenize
//! the title, resolve inline due/start/repeat tokens, consume modifiers
//! one rule category at a time, couple context and folder, derive status
//! from the title prefix, assign a pseudo due date when no explicit one
//! is in force, and reconcile the note banner. The order is load-bearing:
//! later steps read state established by earlier ones.

use super::dates::DateResolver;
use crate::task::config::NormalizeConfig;
use crate::task::domain::{
    Context, ContextCatalog, ContextId, NoteBannerCodec, Priority, Status, Task, TitleTokens,
};
use mockable::Clock;
use tracing::debug;

/// Per-pass due-date override state.
///
/// One normalisation pass tracks whether the user explicitly pinned the
/// due date (suppressing pseudo-date assignment), explicitly cleared it,
/// or said nothing, in which case the note banner from the previous pass
/// decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DueDateOverride {
    /// The due date was explicitly set this pass or recognised as
    /// user-entered.
    Explicit,
    /// The user asked for the due date override to be dropped.
    Cleared,
    /// Nothing said this pass; fall back to the note banner.
    Inherited,
}

impl DueDateOverride {
    const fn is_active(self, note_has_marker: bool) -> bool {
        match self {
            Self::Explicit => true,
            Self::Cleared => false,
            Self::Inherited => note_has_marker,
        }
    }
}

/// Result of one normalisation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// The normalised task.
    pub task: Task,
    /// Whether any field differs from the task as supplied.
    pub changed: bool,
}

/// Task normalisation service.
///
/// Catalogs are optional: without a context (resp. folder) catalog the
/// corresponding modifier category is skipped entirely and its literals
/// fall through to the tag rule.
///
/// # Examples
///
/// ```
/// use mockable::DefaultClock;
/// use taskmill::task::config::NormalizeConfig;
/// use taskmill::task::domain::Task;
/// use taskmill::task::services::Normalizer;
///
/// let config = NormalizeConfig::default();
/// let clock = DefaultClock;
/// let normalizer = Normalizer::new(&config, &clock);
///
/// let outcome = normalizer.normalize(&Task::new("Water the garden /star"));
/// assert!(outcome.task.is_starred());
/// assert!(outcome.changed);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a, C>
where
    C: Clock,
{
    config: &'a NormalizeConfig,
    clock: &'a C,
    contexts: Option<&'a ContextCatalog>,
    folders: Option<&'a ContextCatalog>,
}

impl<'a, C> Normalizer<'a, C>
where
    C: Clock,
{
    /// Creates a normaliser without catalogs.
    #[must_use]
    pub const fn new(config: &'a NormalizeConfig, clock: &'a C) -> Self {
        Self {
            config,
            clock,
            contexts: None,
            folders: None,
        }
    }

    /// Attaches the user's context catalog.
    #[must_use]
    pub const fn with_contexts(mut self, catalog: &'a ContextCatalog) -> Self {
        self.contexts = Some(catalog);
        self
    }

    /// Attaches the user's folder catalog.
    #[must_use]
    pub const fn with_folders(mut self, catalog: &'a ContextCatalog) -> Self {
        self.folders = Some(catalog);
        self
    }

    /// Normalises one task.
    ///
    /// Returns the normalised task and whether any field differs from the
    /// input. Normalisation settles: once a pass reports no change,
    /// further passes on the same calendar day report none either. A
    /// blank due-date override (a due token with no value) takes one
    /// extra pass to settle, since its banner marker next to a blank due
    /// date reads as a request to clear the date.
    #[must_use]
    pub fn normalize(&self, original: &Task) -> NormalizeOutcome {
        let mut task = original.clone();
        let resolver = DateResolver::new(self.config, self.clock);
        let codec = NoteBannerCodec::new(&*self.config.banner_sentinel, self.config.delimiter);
        let note_has_marker = codec.contains_override(task.note());

        self.strip_reminder_prefix(&mut task);

        let mut tokens = TitleTokens::parse(task.title(), self.config.delimiter, |text| {
            resolver.parse(text).is_some()
        });
        task.set_title(tokens.description());

        let mut override_state = DueDateOverride::Inherited;
        apply_due_date(&mut task, &tokens, &mut override_state, note_has_marker, &resolver);
        apply_start_date(&mut task, &tokens, &resolver);
        apply_repeat(&mut task, &tokens);

        consume_priority(&mut task, &mut tokens);
        self.consume_due_date_clear(&mut tokens, &mut override_state, note_has_marker);
        self.consume_star(&mut task, &mut tokens);
        self.consume_context(&mut task, &mut tokens);
        self.consume_status(&mut task, &mut tokens);
        self.consume_folder(&mut task, &mut tokens);
        self.consume_tags(&mut task, &mut tokens);

        self.couple_context_and_folder(&mut task);
        self.apply_title_status_overrides(&mut task);
        self.apply_pseudo_date(&mut task, override_state, note_has_marker, &resolver);
        self.reconcile_banner(&mut task, override_state, note_has_marker, &codec);
        task.truncate_note(self.config.max_note_length);

        let changed = task != *original;
        if changed {
            debug!(title = task.title(), "task normalised with changes");
        }
        NormalizeOutcome { task, changed }
    }

    /// Normalises a batch of tasks, returning only the changed ones.
    #[must_use]
    pub fn normalize_batch(&self, tasks: &[Task]) -> Vec<Task> {
        let mut changed_tasks = Vec::new();
        for task in tasks {
            let outcome = self.normalize(task);
            if outcome.changed {
                changed_tasks.push(outcome.task);
            }
        }
        debug!(
            inspected = tasks.len(),
            changed = changed_tasks.len(),
            "normalised task batch"
        );
        changed_tasks
    }

    /// Strips the prefix external calendar reminders put in emailed
    /// titles.
    fn strip_reminder_prefix(&self, task: &mut Task) {
        let stripped = task
            .title()
            .strip_prefix(&self.config.reminder_prefix)
            .map(ToOwned::to_owned);
        if let Some(title) = stripped {
            task.set_title(title);
        }
    }

    fn consume_due_date_clear(
        &self,
        tokens: &mut TitleTokens,
        override_state: &mut DueDateOverride,
        note_has_marker: bool,
    ) {
        if tokens.remove_modifier(&self.config.no_due_date_modifier)
            && override_state.is_active(note_has_marker)
        {
            *override_state = DueDateOverride::Cleared;
        }
    }

    fn consume_star(&self, task: &mut Task, tokens: &mut TitleTokens) {
        if tokens.remove_modifier(&self.config.star_modifier) && !task.is_starred() {
            task.set_starred(true);
        }
        if tokens.remove_modifier(&self.config.no_star_modifier) && task.is_starred() {
            task.set_starred(false);
        }
    }

    fn consume_context(&self, task: &mut Task, tokens: &mut TitleTokens) {
        let Some(catalog) = self.contexts else {
            return;
        };
        if tokens.remove_modifier(&self.config.no_context_modifier) {
            if resolved(task.context(), catalog).is_some() {
                task.set_context(None);
            }
        } else if let Some(found) = tokens.remove_first_match(|m| catalog.find_by_prefix_match(m)) {
            if resolved(task.context(), catalog) != Some(found) {
                task.set_context(Some(found.id()));
            }
        }
    }

    fn consume_status(&self, task: &mut Task, tokens: &mut TitleTokens) {
        if let Some(status) = tokens.remove_first_match(Status::from_keyword)
            && status != task.status()
        {
            task.set_status(status);
        }
        if task.status() == Status::None {
            task.set_status(self.config.default_status);
        }
    }

    fn consume_folder(&self, task: &mut Task, tokens: &mut TitleTokens) {
        let Some(catalog) = self.folders else {
            return;
        };
        if tokens.remove_modifier(&self.config.no_folder_modifier) {
            if resolved(task.folder(), catalog).is_some() {
                task.set_folder(None);
            }
        } else if let Some(found) =
            tokens.remove_first_match(|m| catalog.find_by_name_or_stripped(m))
        {
            if resolved(task.folder(), catalog) != Some(found) {
                task.set_folder(Some(found.id()));
            }
        }
    }

    /// Turns the remaining modifiers into tags. The "no tag" literal
    /// clears the existing tags first, so clearing and adding compose in
    /// one title.
    fn consume_tags(&self, task: &mut Task, tokens: &mut TitleTokens) {
        if tokens.remove_modifier(&self.config.no_tag_modifier) && !task.tags().is_empty() {
            task.clear_tags();
        }
        for modifier in tokens.drain_modifiers() {
            task.add_tag(modifier);
        }
    }

    /// Couples context and folder: a folder sharing its first letter with
    /// the work (resp. personal) context forces that context, and a work
    /// (resp. personal) task without a folder gets the default folder.
    fn couple_context_and_folder(&self, task: &mut Task) {
        self.force_context_for_folder(task, &self.config.work_context_name);
        self.force_context_for_folder(task, &self.config.personal_context_name);
        self.assign_default_folder(
            task,
            &self.config.work_context_name,
            &self.config.default_work_folder_name,
        );
        self.assign_default_folder(
            task,
            &self.config.personal_context_name,
            &self.config.default_personal_folder_name,
        );
    }

    fn force_context_for_folder(&self, task: &mut Task, context_name: &str) {
        let Some(contexts) = self.contexts else {
            return;
        };
        let Some(target) = contexts.find_by_exact_name(context_name) else {
            return;
        };
        if resolved(task.context(), contexts) == Some(target) {
            return;
        }
        let Some(folder) = self.folders.and_then(|catalog| resolved(task.folder(), catalog))
        else {
            return;
        };
        let folder_initial = folder.name().chars().next();
        let target_initial = target.name().chars().next();
        if let (Some(folder_char), Some(target_char)) = (folder_initial, target_initial)
            && folder_char.eq_ignore_ascii_case(&target_char)
        {
            task.set_context(Some(target.id()));
        }
    }

    fn assign_default_folder(&self, task: &mut Task, context_name: &str, folder_name: &str) {
        let Some(contexts) = self.contexts else {
            return;
        };
        let Some(target) = contexts.find_by_exact_name(context_name) else {
            return;
        };
        if resolved(task.context(), contexts) != Some(target) {
            return;
        }
        let Some(folders) = self.folders else {
            return;
        };
        if resolved(task.folder(), folders).is_some() {
            return;
        }
        if let Some(default_folder) = folders.find_by_exact_name(folder_name) {
            task.set_folder(Some(default_folder.id()));
        }
    }

    /// Derives status from the title prefix: waiting prefixes force the
    /// waiting status (and their absence reverts it), a leading reference
    /// marker forces the reference status likewise. Future tasks are left
    /// alone, and projects keep their waiting state.
    fn apply_title_status_overrides(&self, task: &mut Task) {
        let future = self.config.future_status;

        if !self.is_project(task) && task.status() != future {
            let waiting = task.title().starts_with(&self.config.waiting_prefix_short)
                || task.title().starts_with(&self.config.waiting_prefix_long);
            if waiting && task.status() != Status::Waiting {
                task.set_status(Status::Waiting);
            } else if !waiting && task.status() == Status::Waiting {
                task.set_status(self.config.default_status);
            }
        }

        if task.status() != future {
            let reference = task.title().starts_with(&self.config.reference_prefix);
            if reference && task.status() != Status::Reference {
                task.set_status(Status::Reference);
            } else if !reference && task.status() == Status::Reference {
                task.set_status(self.config.default_status);
            }
        }
    }

    /// Returns whether the task is a project or checklist: it has
    /// sub-tasks, carries the project tag, or its note carries one of the
    /// markers the external system stores in empty projects.
    fn is_project(&self, task: &Task) -> bool {
        task.children() > 0
            || task
                .tags()
                .iter()
                .any(|tag| tag.contains(&self.config.project_tag))
            || self
                .config
                .project_note_markers
                .iter()
                .any(|marker| task.note().contains(marker.as_str()))
    }

    /// Assigns the pseudo due date unless an override is in force or the
    /// current due date has been archived.
    fn apply_pseudo_date(
        &self,
        task: &mut Task,
        override_state: DueDateOverride,
        note_has_marker: bool,
        resolver: &DateResolver<'_, C>,
    ) {
        if override_state.is_active(note_has_marker) || resolver.is_archived(task.due_date()) {
            return;
        }
        let context_name = self
            .contexts
            .and_then(|catalog| resolved(task.context(), catalog))
            .map(Context::name);
        let pseudo = resolver.pseudo_date(context_name, task.status());
        if pseudo != task.due_date() {
            task.set_due_date(pseudo);
        }
    }

    fn reconcile_banner(
        &self,
        task: &mut Task,
        override_state: DueDateOverride,
        note_has_marker: bool,
        codec: &NoteBannerCodec,
    ) {
        let overriding = override_state.is_active(note_has_marker);
        let required = codec.required_banner(overriding, task.tags());
        if let Some(rebuilt) = codec.reconcile(task.note(), &required) {
            task.set_note(rebuilt);
        }
    }
}

/// Resolves a stored reference through the catalog. A dangling id (not
/// present in the catalog) behaves as no reference for the rules that
/// read it.
fn resolved(id: Option<ContextId>, catalog: &ContextCatalog) -> Option<&Context> {
    id.and_then(|value| catalog.find_by_id(value))
}

/// Applies the due-date token, or the provenance heuristic when the title
/// carries none.
///
/// A present token (even a blank one) marks the due date as an explicit
/// override. Without one, and only for tasks that arrived with some
/// classification (so the due date can be trusted), a blank due date with
/// a banner override clears the override, and a real date without one
/// becomes an override. This keeps a date entered directly in the
/// external system from being clobbered by the pseudo-date rule.
fn apply_due_date<C>(
    task: &mut Task,
    tokens: &TitleTokens,
    override_state: &mut DueDateOverride,
    note_has_marker: bool,
    resolver: &DateResolver<'_, C>,
) where
    C: Clock,
{
    if let Some(token) = tokens.due_date() {
        *override_state = DueDateOverride::Explicit;
        if let Some(due) = resolver.parse(token)
            && due != task.due_date()
        {
            task.set_due_date(due);
        }
    } else if task.has_classification() {
        if task.due_date().is_blank() && note_has_marker {
            *override_state = DueDateOverride::Cleared;
        } else if resolver.is_actual_date(task.due_date()) && !note_has_marker {
            *override_state = DueDateOverride::Explicit;
        }
    }
}

fn consume_priority(task: &mut Task, tokens: &mut TitleTokens) {
    if let Some(priority) = tokens.remove_first_match(Priority::from_keyword)
        && task.priority() != priority
    {
        task.set_priority(priority);
    }
}

fn apply_start_date<C>(task: &mut Task, tokens: &TitleTokens, resolver: &DateResolver<'_, C>)
where
    C: Clock,
{
    if let Some(token) = tokens.start_date()
        && let Some(start) = resolver.parse(token)
        && start != task.start_date()
    {
        task.set_start_date(start);
    }
}

fn apply_repeat(task: &mut Task, tokens: &TitleTokens) {
    if let Some(token) = tokens.repeat()
        && task.repeat() != token
    {
        task.set_repeat(token);
    }
}
