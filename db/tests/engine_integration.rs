//! Integration tests for the schema and resolver engine.
//!
//! These tests drive the public API end to end: load a store, compose the
//! schema, then answer root and object field invocations the way a query
//! executor would.

use db::{compose_schema, Arguments, OverrideConfig, RecordStore, Resolved, Resolvers};
use serde_json::{json, Value as Json};

const BLOG: &str = include_str!("../src/fixtures/blog.json");
const AUTHORED: &str = include_str!("../src/fixtures/authored.json");
const OVERRIDES: &str = include_str!("../src/fixtures/overrides.json");

fn args(value: Json) -> Arguments {
    value.as_object().cloned().expect("arguments should be an object")
}

fn blog() -> RecordStore {
    RecordStore::from_json_str(BLOG).expect("Failed to load blog fixture")
}

fn authored() -> (RecordStore, OverrideConfig) {
    let store = RecordStore::from_json_str(AUTHORED).expect("Failed to load authored fixture");
    let overrides = serde_json::from_str(OVERRIDES).expect("Failed to parse overrides");
    (store, overrides)
}

fn ids(resolved: &Resolved) -> Vec<i64> {
    match resolved {
        Resolved::Records(records) => records.iter().filter_map(|r| r["id"].as_i64()).collect(),
        other => panic!("expected records, got {other:?}"),
    }
}

// ==================== Query Tests ====================

#[test]
fn test_lookup_returns_the_stored_record() {
    let store = blog();
    let graph = compose_schema(&store, &OverrideConfig::new()).unwrap();
    let resolvers = Resolvers::new(&graph);

    for record in store.collection("posts").unwrap() {
        let id = record["id"].to_json();
        let found = resolvers.resolve_query(&store, "Post", &args(json!({ "id": id }))).unwrap();
        assert_eq!(found, Resolved::Record(record.clone()));
    }
}

#[test]
fn test_unfiltered_list_is_the_collection_in_order() {
    let store = blog();
    let graph = compose_schema(&store, &OverrideConfig::new()).unwrap();
    let resolvers = Resolvers::new(&graph);

    let all = resolvers.resolve_query(&store, "allComments", &Arguments::new()).unwrap();
    assert_eq!(all, Resolved::Records(store.collection("comments").unwrap().to_vec()));
}

#[test]
fn test_count_matches_list_length() {
    let store = blog();
    let graph = compose_schema(&store, &OverrideConfig::new()).unwrap();
    let resolvers = Resolvers::new(&graph);

    let windows = [
        json!({}),
        json!({"page": 0, "perPage": 1}),
        json!({"page": 1, "perPage": 1}),
        json!({"page": 5, "perPage": 1}),
        json!({"filter": {"q": "lorem"}}),
    ];
    for window in windows {
        let list = resolvers.resolve_query(&store, "allPosts", &args(window.clone())).unwrap();
        let meta = resolvers.resolve_query(&store, "_allPostsMeta", &args(window)).unwrap();
        assert_eq!(meta, Resolved::Meta { count: ids(&list).len() });
    }
}

#[test]
fn test_reverse_relationship_with_filter() {
    let store = blog();
    let graph = compose_schema(&store, &OverrideConfig::new()).unwrap();
    let resolvers = Resolvers::new(&graph);
    let john = store.collection("users").unwrap()[0].clone();

    let posts = resolvers
        .resolve_field(&store, "User", "Posts", &john, &args(json!({"filter": {"q": "lorem"}})))
        .unwrap();
    assert_eq!(ids(&posts), vec![1]);

    let none = resolvers
        .resolve_field(&store, "User", "Posts", &john, &args(json!({"filter": {"q": "dolor"}})))
        .unwrap();
    assert!(ids(&none).is_empty());
}

// ==================== Mutation Tests ====================

#[test]
fn test_many_to_one_after_create() {
    let mut store = blog();
    let graph = compose_schema(&store, &OverrideConfig::new()).unwrap();
    let resolvers = Resolvers::new(&graph);

    let created = resolvers
        .resolve_mutation(
            &mut store,
            "createPost",
            &args(json!({"id": 3, "title": "Fresh", "views": 0, "user_id": 456})),
        )
        .unwrap();
    let Resolved::Record(post) = created else {
        panic!("expected a record");
    };

    let user = resolvers.resolve_field(&store, "Post", "User", &post, &Arguments::new()).unwrap();
    assert_eq!(user.to_json()["name"], json!("Jane Doe"));
}

#[test]
fn test_update_merges_fields() {
    let mut store = blog();
    let graph = compose_schema(&store, &OverrideConfig::new()).unwrap();
    let resolvers = Resolvers::new(&graph);

    resolvers
        .resolve_mutation(&mut store, "updatePost", &args(json!({"id": 1, "title": "Renamed"})))
        .unwrap();
    let post = resolvers.resolve_query(&store, "Post", &args(json!({"id": 1}))).unwrap();
    assert_eq!(
        post.to_json(),
        json!({"id": 1, "title": "Renamed", "views": 254, "user_id": 123})
    );
}

#[test]
fn test_remove_missing_id_changes_nothing() {
    let mut store = blog();
    let graph = compose_schema(&store, &OverrideConfig::new()).unwrap();
    let resolvers = Resolvers::new(&graph);
    let before = store.collection("posts").unwrap().len();

    let removed = resolvers
        .resolve_mutation(&mut store, "removePost", &args(json!({"id": 42})))
        .unwrap();
    assert_eq!(removed, Resolved::Boolean(false));
    assert_eq!(store.collection("posts").unwrap().len(), before);
}

// ==================== Override Tests ====================

#[test]
fn test_override_names_replace_convention() {
    let (store, overrides) = authored();
    let graph = compose_schema(&store, &overrides).unwrap();
    let post = graph.object_type("Post").unwrap();
    let user = graph.object_type("User").unwrap();

    assert!(post.field("Author").is_some());
    assert!(post.field("User").is_none());
    assert!(user.field("AuthoredPosts").is_some());
    assert!(user.field("Posts").is_none());

    let resolvers = Resolvers::new(&graph);
    let john = store.collection("users").unwrap()[0].clone();
    let authored = resolvers
        .resolve_field(&store, "User", "AuthoredPosts", &john, &Arguments::new())
        .unwrap();
    assert_eq!(ids(&authored), vec![1, 3]);
}

#[test]
fn test_many_to_many_both_directions() {
    let (store, overrides) = authored();
    let graph = compose_schema(&store, &overrides).unwrap();
    let resolvers = Resolvers::new(&graph);

    let first_post = store.collection("posts").unwrap()[0].clone();
    let fans = resolvers
        .resolve_field(&store, "Post", "Fans", &first_post, &Arguments::new())
        .unwrap();
    assert_eq!(ids(&fans), vec![456, 789]);

    let jane = store.collection("users").unwrap()[1].clone();
    let favorited = resolvers
        .resolve_field(&store, "User", "Favorited", &jane, &Arguments::new())
        .unwrap();
    assert_eq!(ids(&favorited), vec![1]);

    let filtered = resolvers
        .resolve_field(&store, "Post", "Fans", &first_post, &args(json!({"filter": {"name": "Alice Smith"}})))
        .unwrap();
    assert_eq!(ids(&filtered), vec![789]);
}

#[test]
fn test_sdl_mentions_every_root_field() {
    let (store, overrides) = authored();
    let graph = compose_schema(&store, &overrides).unwrap();
    let sdl = graph.to_sdl();

    for field in graph.query_fields().chain(graph.mutation_fields()) {
        assert!(sdl.contains(&format!("  {}", field.name)), "missing {}", field.name);
    }
    assert!(sdl.contains("Fans(filter: UserFilter): [User]"));
    assert!(sdl.contains("Favorited(filter: PostFilter): [Post]"));
}
