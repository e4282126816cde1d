use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::core::Analysis;

/// Flat component listing: one line per strongly connected component, member
/// labels space-separated, components in reverse topological order. Members
/// within a line are sorted so identical input yields identical bytes.
pub struct ComponentsFormatter;

impl ComponentsFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, analysis: &Analysis) -> String {
        let mut out = String::new();
        for component in &analysis.components {
            let mut labels: Vec<String> = component
                .iter()
                .map(|&index| analysis.graph[index].label())
                .collect();
            labels.sort();
            out.push_str(&labels.join(" "));
            out.push('\n');
        }
        out
    }

    pub fn format_to_file(&self, analysis: &Analysis, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(analysis))?;
        Ok(())
    }
}

impl Default for ComponentsFormatter {
    fn default() -> Self {
        Self::new()
    }
}
