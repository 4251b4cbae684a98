//! Output formatting tests for schema command.

#[cfg(test)]
mod tests {
    use super::super::execute::{EdgeSummary, FieldSummary, SchemaResult, TypeSummary};
    use rstest::{fixture, rstest};

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const SDL: &str = "\
type Post {
  id: ID!
  title: String!
}
";

    const RELATIONSHIPS_TABLE: &str = "\
Relationships (1):
  Comment.Post -> Post (many-to-one, via post_id)
  Post.Comments -> [Comment]";

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn edge() -> EdgeSummary {
        EdgeSummary {
            source: "Comment".to_string(),
            source_field: "post_id".to_string(),
            target: "Post".to_string(),
            cardinality: "many-to-one".to_string(),
            field: "Post".to_string(),
            foreign_field: "Comments".to_string(),
        }
    }

    #[fixture]
    fn schema_result() -> SchemaResult {
        SchemaResult {
            sdl: SDL.to_string(),
            types: vec![TypeSummary {
                name: "Post".to_string(),
                collection: "posts".to_string(),
                fields: vec![
                    FieldSummary {
                        name: "id".to_string(),
                        type_name: "ID!".to_string(),
                    },
                    FieldSummary {
                        name: "title".to_string(),
                        type_name: "String!".to_string(),
                    },
                ],
            }],
            relationships: vec![edge()],
            relationships_only: false,
        }
    }

    #[fixture]
    fn relationships_result() -> SchemaResult {
        SchemaResult {
            relationships: vec![edge()],
            relationships_only: true,
            ..SchemaResult::default()
        }
    }

    #[fixture]
    fn empty_result() -> SchemaResult {
        SchemaResult::default()
    }

    #[fixture]
    fn no_relationships_result() -> SchemaResult {
        SchemaResult {
            relationships_only: true,
            ..SchemaResult::default()
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_table_test! {
        test_name: test_to_table_sdl,
        fixture: schema_result,
        fixture_type: SchemaResult,
        expected: SDL.trim_end(),
    }

    crate::output_table_test! {
        test_name: test_to_table_relationships,
        fixture: relationships_result,
        fixture_type: SchemaResult,
        expected: RELATIONSHIPS_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: SchemaResult,
        expected: "No collections found.",
    }

    crate::output_table_test! {
        test_name: test_to_table_no_relationships,
        fixture: no_relationships_result,
        fixture_type: SchemaResult,
        expected: "No relationships found.",
    }

    crate::output_table_contains_test! {
        test_name: test_to_table_relationships_name_both_sides,
        fixture: relationships_result,
        fixture_type: SchemaResult,
        contains: ["Comment.Post -> Post", "Post.Comments -> [Comment]", "via post_id"],
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: schema_result,
        fixture_type: SchemaResult,
        assertions: {
            "sdl": SDL,
            "types": serde_json::json!([{
                "name": "Post",
                "collection": "posts",
                "fields": [
                    {"name": "id", "type": "ID!"},
                    {"name": "title", "type": "String!"}
                ]
            }]),
        },
    }

    #[rstest]
    fn test_format_json_skips_display_flag(schema_result: SchemaResult) {
        use crate::output::{OutputFormat, Outputable};
        let parsed: serde_json::Value =
            serde_json::from_str(&schema_result.format(OutputFormat::Json)).unwrap();
        assert!(parsed.get("relationships_only").is_none());
        assert_eq!(parsed["relationships"][0]["foreign_field"], "Comments");
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: schema_result,
        fixture_type: SchemaResult,
        contains: ["relationships[1]", "types[1]"],
    }
}
