//! Output formatting tests for get command.

#[cfg(test)]
mod tests {
    use super::super::execute::GetResult;
    use db::test_utils::load_store;
    use rstest::{fixture, rstest};

    const FOUND_TABLE: &str = "\
posts 1:
  id: 1
  title: Lorem Ipsum
  views: 254";

    #[fixture]
    fn found_result() -> GetResult {
        let store = load_store(r#"{"posts": [{"id": 1, "title": "Lorem Ipsum", "views": 254}]}"#);
        GetResult {
            collection: "posts".to_string(),
            id: "1".to_string(),
            record: store.collection("posts").map(|posts| posts[0].clone()),
        }
    }

    #[fixture]
    fn missing_result() -> GetResult {
        GetResult {
            collection: "posts".to_string(),
            id: "42".to_string(),
            record: None,
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_found,
        fixture: found_result,
        fixture_type: GetResult,
        expected: FOUND_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_missing,
        fixture: missing_result,
        fixture_type: GetResult,
        expected: "posts 42: not found",
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: found_result,
        fixture_type: GetResult,
        assertions: {
            "collection": "posts",
            "record": serde_json::json!({"id": 1, "title": "Lorem Ipsum", "views": 254}),
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_missing,
        fixture: missing_result,
        fixture_type: GetResult,
        assertions: {
            "record": serde_json::Value::Null,
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: found_result,
        fixture_type: GetResult,
        contains: ["collection: posts", "title: Lorem Ipsum"],
    }
}
