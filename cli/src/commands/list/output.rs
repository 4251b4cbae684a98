//! Output formatting for list command results.

use super::execute::ListResult;
use crate::output::{format_records, Outputable};

impl Outputable for ListResult {
    fn to_table(&self) -> String {
        let mut lines = vec![
            format!("{} ({}):", self.collection, self.records.len()),
            String::new(),
        ];
        lines.extend(format_records(&self.records));
        lines.join("\n")
    }
}
