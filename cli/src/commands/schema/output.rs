//! Output formatting for schema command results.

use super::execute::SchemaResult;
use crate::output::Outputable;

impl Outputable for SchemaResult {
    fn to_table(&self) -> String {
        if self.relationships_only {
            return self.relationships_table();
        }
        if self.types.is_empty() {
            return "No collections found.".to_string();
        }
        self.sdl.trim_end().to_string()
    }
}

impl SchemaResult {
    fn relationships_table(&self) -> String {
        if self.relationships.is_empty() {
            return "No relationships found.".to_string();
        }

        let mut lines = vec![format!("Relationships ({}):", self.relationships.len())];
        for edge in &self.relationships {
            lines.push(format!(
                "  {}.{} -> {} ({}, via {})",
                edge.source, edge.field, edge.target, edge.cardinality, edge.source_field
            ));
            lines.push(format!("  {}.{} -> [{}]", edge.target, edge.foreign_field, edge.source));
        }
        lines.join("\n")
    }
}
