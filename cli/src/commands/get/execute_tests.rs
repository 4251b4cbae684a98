//! Execute tests for get command.

#[cfg(test)]
mod tests {
    use super::super::GetCmd;
    use db::Value;
    use rstest::{fixture, rstest};

    crate::execute_test_fixture! {
        fixture_name: blog,
        json: db::fixtures::BLOG,
    }

    crate::execute_test_fixture! {
        fixture_name: string_ids,
        json: r#"{"tags": [{"id": "rust", "label": "Rust"}, {"id": "json", "label": "JSON"}]}"#,
    }

    crate::execute_test! {
        test_name: test_get_numeric_id,
        fixture: blog,
        cmd: GetCmd {
            collection: "posts".to_string(),
            id: "2".to_string(),
        },
        assertions: |result| {
            let record = result.record.expect("post 2 should exist");
            assert_eq!(record["id"], Value::Int(2));
            assert_eq!(record["title"], Value::from("Sic Dolor amet"));
        },
    }

    crate::execute_test! {
        test_name: test_get_string_id,
        fixture: string_ids,
        cmd: GetCmd {
            collection: "tags".to_string(),
            id: "json".to_string(),
        },
        assertions: |result| {
            assert_eq!(result.record.unwrap()["label"], Value::from("JSON"));
        },
    }

    crate::execute_test! {
        test_name: test_get_missing_id,
        fixture: blog,
        cmd: GetCmd {
            collection: "posts".to_string(),
            id: "42".to_string(),
        },
        assertions: |result| {
            assert_eq!(result.collection, "posts");
            assert!(result.record.is_none());
        },
    }

    crate::execute_error_test! {
        test_name: test_get_unknown_collection,
        fixture: blog,
        cmd: GetCmd {
            collection: "authors".to_string(),
            id: "1".to_string(),
        },
        message: "authors",
    }
}
