//! Output formatting tests for resolve command.

#[cfg(test)]
mod tests {
    use super::super::execute::ResolveResult;
    use db::test_utils::load_store;
    use db::{Record, Resolved, Value};
    use rstest::{fixture, rstest};

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const RECORD_TABLE: &str = "\
Post:
  id: 1
  title: Lorem Ipsum";

    const RECORDS_TABLE: &str = "\
allPosts (1):

id  title
1   Lorem Ipsum";

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn post() -> Record {
        let store = load_store(r#"{"posts": [{"id": 1, "title": "Lorem Ipsum"}]}"#);
        store.collection("posts").unwrap_or_default()[0].clone()
    }

    fn resolved(field: &str, mutation: bool, result: Resolved) -> ResolveResult {
        ResolveResult {
            field: field.to_string(),
            mutation,
            result,
        }
    }

    #[fixture]
    fn record_result() -> ResolveResult {
        resolved("Post", false, Resolved::Record(post()))
    }

    #[fixture]
    fn records_result() -> ResolveResult {
        resolved("allPosts", false, Resolved::Records(vec![post()]))
    }

    #[fixture]
    fn meta_result() -> ResolveResult {
        resolved("_allPostsMeta", false, Resolved::Meta { count: 2 })
    }

    #[fixture]
    fn removed_result() -> ResolveResult {
        resolved("removePost", true, Resolved::Boolean(true))
    }

    #[fixture]
    fn null_result() -> ResolveResult {
        resolved("Post", false, Resolved::Null)
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_table_test! {
        test_name: test_to_table_record,
        fixture: record_result,
        fixture_type: ResolveResult,
        expected: RECORD_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_records,
        fixture: records_result,
        fixture_type: ResolveResult,
        expected: RECORDS_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_meta,
        fixture: meta_result,
        fixture_type: ResolveResult,
        expected: "_allPostsMeta: count 2",
    }

    crate::output_table_test! {
        test_name: test_to_table_boolean,
        fixture: removed_result,
        fixture_type: ResolveResult,
        expected: "removePost: true",
    }

    crate::output_table_test! {
        test_name: test_to_table_null,
        fixture: null_result,
        fixture_type: ResolveResult,
        expected: "Post: null",
    }

    #[rstest]
    fn test_to_table_value() {
        use crate::output::Outputable;
        let result = resolved("title", false, Resolved::Value(Value::List(vec![Value::Int(1)])));
        assert_eq!(result.to_table(), "title: [1]");
    }

    crate::output_json_test! {
        test_name: test_format_json_meta,
        fixture: meta_result,
        fixture_type: ResolveResult,
        assertions: {
            "field": "_allPostsMeta",
            "mutation": false,
            "result": serde_json::json!({"count": 2}),
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_null,
        fixture: null_result,
        fixture_type: ResolveResult,
        assertions: {
            "result": serde_json::Value::Null,
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_records,
        fixture: records_result,
        fixture_type: ResolveResult,
        assertions: {
            "result": serde_json::json!([{"id": 1, "title": "Lorem Ipsum"}]),
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: removed_result,
        fixture_type: ResolveResult,
        contains: ["field: removePost", "mutation: true", "result: true"],
    }
}
