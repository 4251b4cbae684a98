//! Output formatting for get command results.

use super::execute::GetResult;
use crate::output::{format_record, Outputable};

impl Outputable for GetResult {
    fn to_table(&self) -> String {
        match &self.record {
            Some(record) => {
                let mut lines = vec![format!("{} {}:", self.collection, self.id)];
                lines.extend(format_record(record));
                lines.join("\n")
            }
            None => format!("{} {}: not found", self.collection, self.id),
        }
    }
}
