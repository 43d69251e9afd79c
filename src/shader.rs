//! Shader source composition.

use std::collections::HashSet;

use crate::structs::StructDef;

/// Joins struct declarations ahead of `body`, forming a complete WGSL
/// module source.
///
/// Each declaration is emitted once: repeated descriptors (same shader
/// name) are skipped after their first occurrence, so per-buffer struct
/// lists can be passed as collected. A blank line separates declarations,
/// and the body follows the prologue on its own line.
#[must_use]
pub fn compose_shader(defs: &[StructDef], body: &str) -> String {
    let mut inserted = HashSet::new();
    let decls: Vec<String> = defs
        .iter()
        .filter(|def| inserted.insert(def.name.clone()))
        .map(StructDef::to_wgsl)
        .collect();
    format!("{}\n{}", decls.join("\n"), body)
}
