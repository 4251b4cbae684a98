//! Core schema definition types and field inference.
//!
//! Field descriptors are derived from the records of one collection: the
//! field set is the union of keys, and each field's kind is the most
//! permissive kind observed across records.

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::{Record, Value};

/// Kind of a record field.
///
/// Scalars widen in the order `Boolean < Integer < Float < String`.
/// `Identifier` is never observed from values; it is assigned by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Opaque key (`id`, `*_id`, elements of `*_ids`)
    Identifier,
    /// Integer data
    Integer,
    /// Floating point data
    Float,
    /// String/text data
    String,
    /// Boolean data
    Boolean,
    /// Homogeneous list of another kind
    List(Box<FieldKind>),
}

impl FieldKind {
    /// Returns the GraphQL type name for this kind.
    pub fn graphql_type(&self) -> String {
        match self {
            FieldKind::Identifier => "ID".to_string(),
            FieldKind::Integer => "Int".to_string(),
            FieldKind::Float => "Float".to_string(),
            FieldKind::String => "String".to_string(),
            FieldKind::Boolean => "Boolean".to_string(),
            FieldKind::List(inner) => format!("[{}]", inner.graphql_type()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Float)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::List(_))
    }

    fn rank(&self) -> u8 {
        match self {
            FieldKind::Boolean => 0,
            FieldKind::Integer => 1,
            FieldKind::Float => 2,
            FieldKind::Identifier | FieldKind::String | FieldKind::List(_) => 3,
        }
    }

    fn scalar_of(value: &Value) -> FieldKind {
        match value {
            Value::Bool(_) => FieldKind::Boolean,
            Value::Int(_) => FieldKind::Integer,
            Value::Float(_) => FieldKind::Float,
            Value::Str(_) | Value::List(_) => FieldKind::String,
        }
    }

    /// Least kind that both `self` and `other` fit into.
    fn widen(self, other: FieldKind) -> FieldKind {
        if self == other {
            return self;
        }
        match (self, other) {
            (FieldKind::List(a), FieldKind::List(b)) => FieldKind::List(Box::new(a.widen(*b))),
            (FieldKind::List(_), _) | (_, FieldKind::List(_)) => FieldKind::String,
            (a, b) => {
                if a.rank() >= b.rank() {
                    a
                } else {
                    b
                }
            }
        }
    }
}

/// Represents a field of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name (e.g., "id", "title", "user_id")
    pub name: String,

    /// Inferred field kind
    pub kind: FieldKind,

    /// Whether some record may lack a value for this field
    pub nullable: bool,
}

impl FieldDescriptor {
    /// GraphQL type reference, `!`-suffixed when the field is not nullable.
    pub fn graphql_type(&self) -> String {
        if self.nullable {
            self.kind.graphql_type()
        } else {
            format!("{}!", self.kind.graphql_type())
        }
    }
}

/// True for `id`, `*_id` and `*_ids` field names.
pub fn is_identifier_name(name: &str) -> bool {
    name == "id" || name.ends_with("_id") || name.ends_with("_ids")
}

/// Shape observed for a field across records.
#[derive(Debug)]
enum Shape {
    Scalar(FieldKind),
    /// List with the widened element kind, `None` while only empty lists were seen
    List(Option<FieldKind>),
    Mixed,
}

impl Shape {
    fn of(value: &Value) -> Shape {
        match value {
            Value::List(items) => Shape::List(
                items
                    .iter()
                    .map(FieldKind::scalar_of)
                    .reduce(FieldKind::widen),
            ),
            scalar => Shape::Scalar(FieldKind::scalar_of(scalar)),
        }
    }

    /// Merges two shapes; the flag is false when the top-level kinds differ.
    fn merge(self, other: Shape) -> (Shape, bool) {
        match (self, other) {
            (Shape::Scalar(a), Shape::Scalar(b)) => {
                let uniform = a == b;
                (Shape::Scalar(a.widen(b)), uniform)
            }
            (Shape::List(a), Shape::List(b)) => {
                let element = match (a, b) {
                    (Some(a), Some(b)) => Some(a.widen(b)),
                    (a, b) => a.or(b),
                };
                (Shape::List(element), true)
            }
            _ => (Shape::Mixed, false),
        }
    }

    fn into_kind(self, name: &str) -> FieldKind {
        let identifier = is_identifier_name(name);
        match self {
            Shape::Scalar(_) if identifier => FieldKind::Identifier,
            Shape::List(_) if identifier => FieldKind::List(Box::new(FieldKind::Identifier)),
            Shape::Scalar(kind) => kind,
            Shape::List(element) => FieldKind::List(Box::new(element.unwrap_or(FieldKind::String))),
            Shape::Mixed => FieldKind::String,
        }
    }
}

#[derive(Debug)]
struct Observation {
    shape: Shape,
    count: usize,
    uniform: bool,
}

/// Infer the field descriptors of one collection.
///
/// Fields appear in first-seen order. A field is nullable when a record omits
/// it or when its values do not share one top-level kind. `id` is always a
/// non-null identifier.
pub fn infer_fields(records: &[Record]) -> IndexMap<String, FieldDescriptor> {
    let mut observed: IndexMap<&str, Observation> = IndexMap::new();

    for record in records {
        for (name, value) in record {
            let shape = Shape::of(value);
            match observed.get_mut(name.as_str()) {
                Some(entry) => {
                    let previous = std::mem::replace(&mut entry.shape, Shape::Mixed);
                    let (merged, uniform) = previous.merge(shape);
                    entry.shape = merged;
                    entry.uniform &= uniform;
                    entry.count += 1;
                }
                None => {
                    observed.insert(
                        name.as_str(),
                        Observation {
                            shape,
                            count: 1,
                            uniform: true,
                        },
                    );
                }
            }
        }
    }

    observed
        .into_iter()
        .map(|(name, obs)| {
            let is_id = name == "id";
            let descriptor = FieldDescriptor {
                name: name.to_string(),
                nullable: !is_id && (obs.count < records.len() || !obs.uniform),
                kind: if is_id {
                    FieldKind::Identifier
                } else {
                    obs.shape.into_kind(name)
                },
            };
            (name.to_string(), descriptor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn records(json: serde_json::Value) -> Vec<Record> {
        json.as_array()
            .unwrap()
            .iter()
            .map(|r| crate::value::record_from_json(r.as_object().unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn test_infers_basic_fields() {
        let fields = infer_fields(&records(json!([
            {"id": 1, "title": "Lorem Ipsum", "views": 254, "user_id": 123},
            {"id": 2, "title": "Sic Dolor amet", "views": 65, "user_id": 456},
        ])));

        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "title", "views", "user_id"]);
        assert_eq!(fields["id"].kind, FieldKind::Identifier);
        assert_eq!(fields["title"].kind, FieldKind::String);
        assert_eq!(fields["views"].kind, FieldKind::Integer);
        assert_eq!(fields["user_id"].kind, FieldKind::Identifier);
        assert!(fields.values().all(|f| !f.nullable));
    }

    #[test]
    fn test_union_of_fields_in_first_seen_order() {
        let fields = infer_fields(&records(json!([
            {"id": 1, "title": "a"},
            {"id": 2, "body": "b", "title": "c"},
        ])));
        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "title", "body"]);
        assert!(!fields["title"].nullable);
        assert!(fields["body"].nullable);
    }

    #[rstest]
    #[case(json!([{"id": 1, "v": true}, {"id": 2, "v": 3}]), FieldKind::Integer)]
    #[case(json!([{"id": 1, "v": 3}, {"id": 2, "v": 1.5}]), FieldKind::Float)]
    #[case(json!([{"id": 1, "v": 1.5}, {"id": 2, "v": "x"}]), FieldKind::String)]
    #[case(json!([{"id": 1, "v": [1]}, {"id": 2, "v": "x"}]), FieldKind::String)]
    fn test_widening_marks_nullable(#[case] data: serde_json::Value, #[case] expected: FieldKind) {
        let fields = infer_fields(&records(data));
        assert_eq!(fields["v"].kind, expected);
        assert!(fields["v"].nullable);
    }

    #[test]
    fn test_list_kinds_widen_element_wise() {
        let fields = infer_fields(&records(json!([
            {"id": 1, "scores": [1, 2], "tags": []},
            {"id": 2, "scores": [2.5], "tags": []},
        ])));
        assert_eq!(fields["scores"].kind, FieldKind::List(Box::new(FieldKind::Float)));
        assert!(!fields["scores"].nullable);
        assert_eq!(fields["tags"].kind, FieldKind::List(Box::new(FieldKind::String)));
    }

    #[test]
    fn test_identifier_names_override_observed_kind() {
        let fields = infer_fields(&records(json!([
            {"id": "a", "user_ids": [1, 2], "post_id": 7},
        ])));
        assert_eq!(fields["id"].kind, FieldKind::Identifier);
        assert_eq!(fields["user_ids"].kind, FieldKind::List(Box::new(FieldKind::Identifier)));
        assert_eq!(fields["post_id"].kind, FieldKind::Identifier);
    }

    #[test]
    fn test_id_is_never_nullable() {
        let fields = infer_fields(&records(json!([{"id": 1}, {"id": "two"}])));
        assert_eq!(fields["id"].kind, FieldKind::Identifier);
        assert!(!fields["id"].nullable);
    }

    #[test]
    fn test_empty_records() {
        assert!(infer_fields(&[]).is_empty());
    }

    #[rstest]
    #[case(FieldKind::Identifier, "ID")]
    #[case(FieldKind::Integer, "Int")]
    #[case(FieldKind::Float, "Float")]
    #[case(FieldKind::String, "String")]
    #[case(FieldKind::Boolean, "Boolean")]
    #[case(FieldKind::List(Box::new(FieldKind::Identifier)), "[ID]")]
    fn test_graphql_types(#[case] kind: FieldKind, #[case] expected: &str) {
        assert_eq!(kind.graphql_type(), expected);
    }

    #[test]
    fn test_descriptor_graphql_type_non_null() {
        let field = FieldDescriptor {
            name: "title".to_string(),
            kind: FieldKind::String,
            nullable: false,
        };
        assert_eq!(field.graphql_type(), "String!");
    }
}
