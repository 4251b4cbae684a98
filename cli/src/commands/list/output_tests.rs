//! Output formatting tests for list command.

#[cfg(test)]
mod tests {
    use super::super::execute::ListResult;
    use db::test_utils::load_store;
    use rstest::{fixture, rstest};

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const POSTS_TABLE: &str = "\
posts (2):

id  title           views
1   Lorem Ipsum     254
2   Sic Dolor amet  65";

    const EMPTY_TABLE: &str = "\
posts (0):

No records found.";

    // =========================================================================
    // Fixtures
    // =========================================================================

    #[fixture]
    fn posts_result() -> ListResult {
        let store = load_store(
            r#"{"posts": [
                {"id": 1, "title": "Lorem Ipsum", "views": 254},
                {"id": 2, "title": "Sic Dolor amet", "views": 65}
            ]}"#,
        );
        ListResult {
            collection: "posts".to_string(),
            records: store.collection("posts").unwrap_or_default().to_vec(),
        }
    }

    #[fixture]
    fn empty_result() -> ListResult {
        ListResult {
            collection: "posts".to_string(),
            records: vec![],
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: posts_result,
        fixture_type: ListResult,
        expected: POSTS_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: ListResult,
        expected: EMPTY_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: posts_result,
        fixture_type: ListResult,
        assertions: {
            "collection": "posts",
            "records": serde_json::json!([
                {"id": 1, "title": "Lorem Ipsum", "views": 254},
                {"id": 2, "title": "Sic Dolor amet", "views": 65}
            ]),
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: posts_result,
        fixture_type: ListResult,
        contains: ["collection: posts", "records[2]{id,title,views}:"],
    }
}
