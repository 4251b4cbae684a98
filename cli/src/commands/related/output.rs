//! Output formatting for related command results.

use super::execute::RelatedResult;
use crate::output::{format_records, Outputable};

impl Outputable for RelatedResult {
    fn to_table(&self) -> String {
        let mut lines = vec![
            format!(
                "{} {} -> {} ({}):",
                self.type_name,
                self.id,
                self.field,
                self.records.len()
            ),
            String::new(),
        ];
        lines.extend(format_records(&self.records));
        lines.join("\n")
    }
}
