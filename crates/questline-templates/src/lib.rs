//! Questline Templates — declarative quest blueprints.
//!
//! Templates are loaded recursively from a directory tree of YAML files,
//! one template per top-level declaration key. Loading fully replaces the
//! previous collection and republishes the objective registry's active set.

pub mod store;
pub mod template;
