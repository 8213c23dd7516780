//! The template store.
//!
//! Loads templates recursively from a directory tree, replaces the previous
//! collection wholesale, warns about duplicate ids (last-loaded wins), and
//! republishes the objective registry's active set. Configuration anomalies
//! are non-fatal: the offending unit is skipped and loading continues.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use questline_core::clock::Clock;
use questline_core::error::EngineError;
use questline_engine::application::registry::ObjectiveRegistry;
use questline_engine::domain::quest::Quest;
use questline_engine::domain::task::Task;

use crate::template::Template;

/// Recognized template file extension.
const TEMPLATE_EXTENSION: &str = "yml";

/// Materialized into a missing template root (self-healing default).
const DEFAULT_TEMPLATE_FILE: &str = "\
# Questline example template.
example:
  task:
    0:
      objective: pickup exp
      condition:
        exp: 10
      goal:
        amount: 5
";

/// Summary of one load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Templates retained in the store (after duplicate overwrite).
    pub loaded: usize,
    /// Distinct ids that were declared more than once.
    pub duplicate_ids: usize,
    /// File units skipped because they failed to parse.
    pub skipped: usize,
}

/// Process-wide template collection.
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every template under `root`, replacing the current collection
    /// and recomputing the registry's active set.
    ///
    /// A missing root is materialized with a default example file first.
    /// Files with other extensions are ignored; unparseable files or
    /// declarations are warned about and skipped. Duplicate ids are warned
    /// about once per id; the last-loaded template wins. Readers observe
    /// either the old collection or the new one, never a partial mix.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TemplateIo`] only when the root itself cannot
    /// be read or the default file cannot be written.
    pub fn load_all(
        &self,
        root: &Path,
        registry: &ObjectiveRegistry,
    ) -> Result<LoadReport, EngineError> {
        if !root.exists() {
            materialize_default(root)?;
        }

        let mut loaded = Vec::new();
        let mut skipped = 0usize;
        load_path(root, &mut loaded, &mut skipped)?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for template in &loaded {
            *counts.entry(template.id.clone()).or_default() += 1;
        }
        let mut duplicate_ids = 0usize;
        for (id, count) in &counts {
            if *count > 1 {
                duplicate_ids += 1;
                tracing::warn!("{count} templates use duplicate id: {id}");
            }
        }

        let mut replacement = HashMap::with_capacity(loaded.len());
        for template in loaded {
            // Map overwrite: later files win for a duplicated id.
            replacement.insert(template.id.clone(), Arc::new(template));
        }
        let total = replacement.len();
        {
            let mut templates = self
                .templates
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *templates = replacement;
        }

        self.republish(registry);
        tracing::info!("{total} templates loaded");

        Ok(LoadReport {
            loaded: total,
            duplicate_ids,
            skipped,
        })
    }

    /// Recomputes the registry's active set from the current collection.
    pub fn republish(&self, registry: &ObjectiveRegistry) {
        let templates = self
            .templates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let referenced: Vec<&str> = templates
            .values()
            .flat_map(|template| template.tasks.iter().map(|task| task.objective.as_str()))
            .collect();
        registry.recompute_active_set(referenced);
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Template>> {
        self.templates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Number of loaded templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Instantiates a quest from a loaded template for one actor, binding
    /// each task to its registered objective type.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownObjective`] if the template id is not
    /// loaded or a task references an unregistered objective type.
    pub fn instantiate(
        &self,
        template_id: &str,
        registry: &ObjectiveRegistry,
        clock: &dyn Clock,
    ) -> Result<Quest, EngineError> {
        let template = self
            .get(template_id)
            .ok_or_else(|| EngineError::UnknownObjective(format!("template '{template_id}'")))?;
        let now = clock.now();
        let mut tasks = Vec::with_capacity(template.tasks.len());
        for spec in &template.tasks {
            let entry = registry
                .get(&spec.objective)
                .ok_or_else(|| EngineError::UnknownObjective(spec.objective.clone()))?;
            tasks.push(Task::new(
                spec.key.clone(),
                Arc::clone(entry.objective()),
                spec.config.clone(),
                now,
            ));
        }
        let deadline = template.duration.map(|duration| now + duration);
        Ok(Quest::new(template.id.clone(), tasks, now, deadline))
    }
}

/// Writes the default example file under a missing root.
fn materialize_default(root: &Path) -> Result<(), EngineError> {
    std::fs::create_dir_all(root).map_err(|source| EngineError::TemplateIo {
        path: root.to_path_buf(),
        source,
    })?;
    let path = root.join("example.yml");
    std::fs::write(&path, DEFAULT_TEMPLATE_FILE).map_err(|source| EngineError::TemplateIo {
        path,
        source,
    })?;
    Ok(())
}

/// Recursively loads templates: directories recurse, recognized files parse,
/// everything else is ignored. Errs only when `path` itself cannot be
/// listed; unreadable subtrees are warned about and skipped by the caller.
fn load_path(
    path: &Path,
    loaded: &mut Vec<Template>,
    skipped: &mut usize,
) -> Result<(), EngineError> {
    if path.is_dir() {
        let entries = std::fs::read_dir(path).map_err(|source| EngineError::TemplateIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut children: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect();
        // Deterministic load order so duplicate-id resolution is stable.
        children.sort();
        for child in children {
            // Only the root path is a hard error; an unreadable subtree is
            // skipped like an unreadable file.
            if let Err(error) = load_path(&child, loaded, skipped) {
                tracing::warn!(path = %child.display(), %error, "skipping unreadable directory");
                *skipped += 1;
            }
        }
        return Ok(());
    }

    if path.extension().and_then(|ext| ext.to_str()) != Some(TEMPLATE_EXTENSION) {
        return Ok(());
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "skipping unreadable template file");
            *skipped += 1;
            return Ok(());
        }
    };
    let value: serde_yaml::Value = match serde_yaml::from_str(&contents) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "skipping malformed template file");
            *skipped += 1;
            return Ok(());
        }
    };
    let Some(mapping) = value.as_mapping() else {
        tracing::warn!(path = %path.display(), "skipping template file: not a mapping");
        *skipped += 1;
        return Ok(());
    };

    for (id, body) in mapping {
        let Some(id) = crate::template::scalar_key(id) else {
            tracing::warn!(path = %path.display(), "skipping declaration with non-scalar id");
            *skipped += 1;
            continue;
        };
        match Template::from_declaration(id, body) {
            Ok(template) => loaded.push(template),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping template declaration");
                *skipped += 1;
            }
        }
    }
    Ok(())
}
