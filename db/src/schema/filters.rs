//! Filter synthesis and predicate semantics.
//!
//! Every collection accepts a filter object whose keys are derived from its
//! fields:
//!
//! | Field kind | Keys |
//! |------------|------|
//! | any scalar | `f`, `f_neq` |
//! | Integer, Float | `f_lt`, `f_lte`, `f_gt`, `f_gte` |
//! | List-of(T) | `f` (contains), `f_in`, `f_nin` |
//! | (always) | `q` (free text), `ids` (identifier set) |
//!
//! A record matches a filter when it matches every supplied key.

use indexmap::IndexMap;
use serde::Serialize;

use super::definition::{FieldDescriptor, FieldKind};
use crate::value::{Record, Value};

/// Key of the free-text predicate.
pub const SEARCH_KEY: &str = "q";

/// Key of the identifier-set predicate.
pub const IDS_KEY: &str = "ids";

/// How a filter key is evaluated against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredicateKind {
    /// `f`: field equals the value
    Equals,
    /// `f_neq`: field is absent or differs from the value
    NotEquals,
    /// `f_lt`
    LessThan,
    /// `f_lte`
    LessOrEqual,
    /// `f_gt`
    GreaterThan,
    /// `f_gte`
    GreaterOrEqual,
    /// `f` on a list field: the list contains the value
    Contains,
    /// `f_in`: the list shares an element with the candidates
    In,
    /// `f_nin`: the list shares no element with the candidates
    NotIn,
    /// `q`: some field's text contains the value, case-insensitively
    Search,
    /// `ids`: the record id is one of the candidates
    Ids,
}

/// A single filter key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    /// Field the predicate reads; `None` for `q`, which reads every field
    pub field: Option<String>,

    pub kind: PredicateKind,

    /// Kind of the argument accepted for this key
    pub input: FieldKind,
}

impl Predicate {
    fn on(field: &str, kind: PredicateKind, input: FieldKind) -> Self {
        Self {
            field: Some(field.to_string()),
            kind,
            input,
        }
    }

    /// Evaluate the predicate against one record.
    pub fn matches(&self, record: &Record, argument: &Value) -> bool {
        let field = self.field.as_deref().unwrap_or("id");
        let value = record.get(field);

        match self.kind {
            PredicateKind::Equals => value.is_some_and(|v| v.loosely_eq(argument)),
            PredicateKind::NotEquals => !value.is_some_and(|v| v.loosely_eq(argument)),
            PredicateKind::LessThan => compare(value, argument, |a, b| a < b),
            PredicateKind::LessOrEqual => compare(value, argument, |a, b| a <= b),
            PredicateKind::GreaterThan => compare(value, argument, |a, b| a > b),
            PredicateKind::GreaterOrEqual => compare(value, argument, |a, b| a >= b),
            PredicateKind::Contains => value.is_some_and(|v| match argument {
                Value::List(needles) => needles.iter().all(|n| v.contains(n)),
                needle => v.contains(needle),
            }),
            PredicateKind::In => value.is_some_and(|v| intersects(v, argument)),
            PredicateKind::NotIn => !value.is_some_and(|v| intersects(v, argument)),
            PredicateKind::Search => {
                let needle = argument.to_string().to_lowercase();
                record
                    .values()
                    .any(|v| v.to_string().to_lowercase().contains(&needle))
            }
            PredicateKind::Ids => value.is_some_and(|id| argument.contains(id)),
        }
    }
}

fn compare(value: Option<&Value>, argument: &Value, op: fn(f64, f64) -> bool) -> bool {
    match (value.and_then(Value::as_f64), argument.as_f64()) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

fn intersects(value: &Value, candidates: &Value) -> bool {
    match candidates {
        Value::List(items) => items.iter().any(|candidate| value.contains(candidate)),
        candidate => value.contains(candidate),
    }
}

/// Filter keys accepted by one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterDescriptor {
    predicates: IndexMap<String, Predicate>,
}

impl FilterDescriptor {
    pub fn get(&self, key: &str) -> Option<&Predicate> {
        self.predicates.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.predicates.iter().map(|(key, p)| (key.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Build the filter keys of a collection from its fields.
///
/// `q` and `ids` are always present and take precedence over synthesized keys
/// with the same name.
pub fn synthesize_filters(fields: &IndexMap<String, FieldDescriptor>) -> FilterDescriptor {
    let mut predicates = IndexMap::new();
    predicates.insert(
        SEARCH_KEY.to_string(),
        Predicate {
            field: None,
            kind: PredicateKind::Search,
            input: FieldKind::String,
        },
    );
    predicates.insert(
        IDS_KEY.to_string(),
        Predicate::on("id", PredicateKind::Ids, FieldKind::List(Box::new(FieldKind::Identifier))),
    );

    for descriptor in fields.values() {
        for (key, predicate) in field_predicates(descriptor) {
            predicates.entry(key).or_insert(predicate);
        }
    }

    FilterDescriptor { predicates }
}

fn field_predicates(descriptor: &FieldDescriptor) -> Vec<(String, Predicate)> {
    let name = descriptor.name.as_str();
    let kind = &descriptor.kind;

    if let FieldKind::List(element) = kind {
        let element = element.as_ref().clone();
        let candidates = FieldKind::List(Box::new(element.clone()));
        return vec![
            (name.to_string(), Predicate::on(name, PredicateKind::Contains, element)),
            (format!("{name}_in"), Predicate::on(name, PredicateKind::In, candidates.clone())),
            (format!("{name}_nin"), Predicate::on(name, PredicateKind::NotIn, candidates)),
        ];
    }

    let mut predicates = vec![
        (name.to_string(), Predicate::on(name, PredicateKind::Equals, kind.clone())),
        (format!("{name}_neq"), Predicate::on(name, PredicateKind::NotEquals, kind.clone())),
    ];
    if kind.is_numeric() {
        for (suffix, predicate_kind) in [
            ("lt", PredicateKind::LessThan),
            ("lte", PredicateKind::LessOrEqual),
            ("gt", PredicateKind::GreaterThan),
            ("gte", PredicateKind::GreaterOrEqual),
        ] {
            predicates.push((
                format!("{name}_{suffix}"),
                Predicate::on(name, predicate_kind, kind.clone()),
            ));
        }
    }
    predicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definition::infer_fields;
    use crate::value::record_from_json;
    use rstest::rstest;
    use serde_json::json;

    fn record(json: serde_json::Value) -> Record {
        record_from_json(json.as_object().unwrap()).unwrap()
    }

    fn post() -> Record {
        record(json!({"id": 1, "title": "Lorem Ipsum", "views": 254, "user_id": 123, "tag_ids": [1, 2]}))
    }

    fn descriptor() -> FilterDescriptor {
        synthesize_filters(&infer_fields(&[post()]))
    }

    #[test]
    fn test_synthesized_keys() {
        let keys: Vec<_> = descriptor().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "q", "ids", "id", "id_neq", "title", "title_neq", "views", "views_neq", "views_lt",
                "views_lte", "views_gt", "views_gte", "user_id", "user_id_neq", "tag_ids",
                "tag_ids_in", "tag_ids_nin",
            ]
        );
    }

    #[test]
    fn test_predicate_inputs() {
        let filters = descriptor();
        assert_eq!(filters.get("views_lt").unwrap().input, FieldKind::Integer);
        assert_eq!(filters.get("tag_ids").unwrap().input, FieldKind::Identifier);
        assert_eq!(
            filters.get("tag_ids_in").unwrap().input,
            FieldKind::List(Box::new(FieldKind::Identifier))
        );
        assert_eq!(filters.get("q").unwrap().input, FieldKind::String);
    }

    #[test]
    fn test_reserved_keys_win() {
        let fields = infer_fields(&[record(json!({"id": 1, "q": 5}))]);
        let filters = synthesize_filters(&fields);
        assert_eq!(filters.get("q").unwrap().kind, PredicateKind::Search);
        assert_eq!(filters.get("q_lt").unwrap().kind, PredicateKind::LessThan);
    }

    #[rstest]
    #[case("id", json!("1"), true)]
    #[case("id_neq", json!(1), false)]
    #[case("title", json!("Lorem Ipsum"), true)]
    #[case("title", json!("lorem ipsum"), false)]
    #[case("views_lt", json!(300), true)]
    #[case("views_lte", json!(254), true)]
    #[case("views_gt", json!(254), false)]
    #[case("views_gte", json!(254), true)]
    #[case("user_id", json!(123), true)]
    #[case("tag_ids", json!(2), true)]
    #[case("tag_ids", json!(3), false)]
    #[case("tag_ids_in", json!([3, 1]), true)]
    #[case("tag_ids_nin", json!([3, 1]), false)]
    #[case("tag_ids_nin", json!([3, 4]), true)]
    #[case("q", json!("IPSUM"), true)]
    #[case("q", json!("dolor"), false)]
    #[case("ids", json!([2, "1"]), true)]
    #[case("ids", json!([2, 3]), false)]
    fn test_predicate_semantics(#[case] key: &str, #[case] argument: serde_json::Value, #[case] expected: bool) {
        let filters = descriptor();
        let predicate = filters.get(key).unwrap();
        let argument = Value::from_json(&argument).unwrap().unwrap();
        assert_eq!(predicate.matches(&post(), &argument), expected, "key {key}");
    }

    #[test]
    fn test_absent_field_semantics() {
        let filters = descriptor();
        let bare = record(json!({"id": 9}));
        let value = Value::Int(1);
        assert!(!filters.get("views_lt").unwrap().matches(&bare, &value));
        assert!(!filters.get("title").unwrap().matches(&bare, &value));
        assert!(filters.get("title_neq").unwrap().matches(&bare, &value));
        assert!(filters.get("tag_ids_nin").unwrap().matches(&bare, &value));
    }
}
