//! Output formatting for resolve command results.

use db::Resolved;

use super::execute::ResolveResult;
use crate::output::{format_record, format_records, format_value, Outputable};

impl Outputable for ResolveResult {
    fn to_table(&self) -> String {
        match &self.result {
            Resolved::Null => format!("{}: null", self.field),
            Resolved::Value(value) => format!("{}: {}", self.field, format_value(value)),
            Resolved::Boolean(b) => format!("{}: {}", self.field, b),
            Resolved::Meta { count } => format!("{}: count {}", self.field, count),
            Resolved::Record(record) => {
                let mut lines = vec![format!("{}:", self.field)];
                lines.extend(format_record(record));
                lines.join("\n")
            }
            Resolved::Records(records) => {
                let mut lines = vec![format!("{} ({}):", self.field, records.len()), String::new()];
                lines.extend(format_records(records));
                lines.join("\n")
            }
        }
    }
}
