//! The template model and its YAML shape.
//!
//! ```yaml
//! daily_1:                # template id (one template per top-level key)
//!   task:
//!     0:                  # task key; order is significant
//!       objective: pickup exp
//!       condition:
//!         exp: 10
//!       goal:
//!         amount: 5
//!   duration: 3600        # optional quest deadline, seconds from start
//!   meta: {}              # interpreter extensions, not parsed here
//!   addon: {}             # reward/penalty addons, not parsed here
//! ```

use questline_core::error::EngineError;
use questline_engine::domain::task::{Goal, TaskConfig};

/// One task declaration within a template.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Task key (ordering-significant within the template).
    pub key: String,
    /// Name of the objective type this task binds to.
    pub objective: String,
    /// Condition configuration and goal.
    pub config: TaskConfig,
}

/// An immutable, file-defined quest blueprint.
#[derive(Debug, Clone)]
pub struct Template {
    /// Template id. Unique in intent, diagnostic-only: duplicates across
    /// files are warned about, and the last-loaded wins.
    pub id: String,
    /// Ordered task declarations.
    pub tasks: Vec<TaskSpec>,
    /// Optional quest lifetime; instantiation turns it into a deadline.
    pub duration: Option<chrono::Duration>,
}

impl Template {
    /// Parses one template from its top-level YAML declaration.
    ///
    /// Sections other than `task` and `duration` (`meta`, `addon`, ...) are
    /// tolerated and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TemplateParse`]-shaped messages (path filled
    /// in by the caller) for a missing/empty `task` section, a task without
    /// an `objective`, or malformed condition/goal nodes.
    pub fn from_declaration(id: String, body: &serde_yaml::Value) -> Result<Self, EngineError> {
        let parse_error = |message: String| EngineError::TemplateParse {
            path: std::path::PathBuf::new(),
            message,
        };

        let mapping = body
            .as_mapping()
            .ok_or_else(|| parse_error(format!("template '{id}' is not a mapping")))?;

        let task_section = mapping
            .get("task")
            .and_then(serde_yaml::Value::as_mapping)
            .ok_or_else(|| parse_error(format!("template '{id}' has no task section")))?;

        let mut tasks = Vec::with_capacity(task_section.len());
        for (key, entry) in task_section {
            let key = scalar_key(key)
                .ok_or_else(|| parse_error(format!("template '{id}' has a non-scalar task key")))?;
            tasks.push(parse_task(&id, key, entry).map_err(|message| parse_error(message))?);
        }
        if tasks.is_empty() {
            return Err(parse_error(format!("template '{id}' declares no tasks")));
        }

        let duration = mapping
            .get("duration")
            .and_then(serde_yaml::Value::as_i64)
            .map(chrono::Duration::seconds);

        Ok(Self {
            id,
            tasks,
            duration,
        })
    }
}

fn parse_task(template_id: &str, key: String, entry: &serde_yaml::Value) -> Result<TaskSpec, String> {
    let mapping = entry
        .as_mapping()
        .ok_or_else(|| format!("task '{key}' in template '{template_id}' is not a mapping"))?;

    let objective = mapping
        .get("objective")
        .and_then(serde_yaml::Value::as_str)
        .ok_or_else(|| format!("task '{key}' in template '{template_id}' has no objective"))?
        .to_owned();

    let mut config = TaskConfig::default();
    if let Some(conditions) = mapping
        .get("condition")
        .and_then(serde_yaml::Value::as_mapping)
    {
        for (name, value) in conditions {
            let name = scalar_key(name).ok_or_else(|| {
                format!("task '{key}' in template '{template_id}' has a non-scalar condition name")
            })?;
            let value = serde_json::to_value(value).map_err(|e| {
                format!("condition '{name}' of task '{key}' in template '{template_id}': {e}")
            })?;
            config.conditions.insert(name, value);
        }
    }
    if let Some(goal) = mapping.get("goal") {
        config.goal = serde_yaml::from_value::<Goal>(goal.clone()).map_err(|e| {
            format!("goal of task '{key}' in template '{template_id}': {e}")
        })?;
    }

    Ok(TaskSpec {
        key,
        objective,
        config,
    })
}

/// Renders a YAML scalar key as a string (numeric task keys are common).
pub(crate) fn scalar_key(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn declaration(yaml: &str) -> (String, serde_yaml::Value) {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let mapping = value.as_mapping().unwrap();
        let (id, body) = mapping.iter().next().unwrap();
        (scalar_key(id).unwrap(), body.clone())
    }

    #[test]
    fn test_parses_tasks_in_declaration_order() {
        // Arrange
        let (id, body) = declaration(
            r"
daily_1:
  task:
    0:
      objective: pickup exp
      condition:
        exp: 10
      goal:
        amount: 5
    gather:
      objective: bed leave
  duration: 3600
  meta:
    ignored: true
",
        );

        // Act
        let template = Template::from_declaration(id, &body).unwrap();

        // Assert
        assert_eq!(template.id, "daily_1");
        assert_eq!(template.tasks.len(), 2);
        assert_eq!(template.tasks[0].key, "0");
        assert_eq!(template.tasks[0].objective, "pickup exp");
        assert_eq!(template.tasks[0].config.conditions["exp"], json!(10));
        assert_eq!(template.tasks[0].config.goal.amount, 5);
        assert_eq!(template.tasks[1].key, "gather");
        assert_eq!(template.tasks[1].config.goal.amount, 1);
        assert_eq!(template.duration, Some(chrono::Duration::seconds(3600)));
    }

    #[test]
    fn test_rejects_template_without_tasks() {
        // Arrange
        let (id, body) = declaration("empty:\n  duration: 10\n");

        // Act / Assert
        assert!(Template::from_declaration(id, &body).is_err());
    }

    #[test]
    fn test_rejects_task_without_objective() {
        // Arrange
        let (id, body) = declaration("bad:\n  task:\n    0:\n      condition:\n        exp: 1\n");

        // Act / Assert
        assert!(Template::from_declaration(id, &body).is_err());
    }
}
