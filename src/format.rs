//! Final output assembly. The backends produce a body plus a dependency
//! set; rendering prepends the right preamble. Dependencies live in a
//! `BTreeSet`, so the emitted list is sorted and deduplicated by
//! construction.

use std::collections::BTreeSet;

/// Backend output before final assembly. For C++ the dependencies are
/// complete `#include` lines; for proto they are import paths.
#[derive(Debug, Default)]
pub struct Emission {
    pub deps: BTreeSet<String>,
    pub body: String,
}

impl Emission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dependency line. Empty strings are ignored so fallback
    /// mappings without a header can pass one through unconditionally.
    pub fn add_dep(&mut self, dep: &str) {
        if !dep.is_empty() {
            self.deps.insert(dep.to_string());
        }
    }
}

/// Assemble a C++ header: generation banner, include guard pragma, sorted
/// include list, then the body.
pub fn render_cpp(emission: &Emission) -> String {
    let mut out = String::from("// Auto-generated by dtsgen\n#pragma once\n\n");
    for dep in &emission.deps {
        out.push_str(dep);
        out.push('\n');
    }
    if !emission.deps.is_empty() {
        out.push('\n');
    }
    out.push_str(&emission.body);
    out
}

/// Assemble a proto3 schema: syntax line, sorted imports, then the body.
pub fn render_proto(emission: &Emission) -> String {
    let mut out = String::from("syntax = \"proto3\";\n\n");
    for dep in &emission.deps {
        out.push_str(&format!("import \"{}\";\n", dep));
    }
    if !emission.deps.is_empty() {
        out.push('\n');
    }
    out.push_str(&emission.body);
    out
}
