use std::{
    num::NonZeroUsize,
    sync::{
        Mutex,
        atomic::{AtomicI64, Ordering},
    },
};

use operation::{FieldSelection, FragmentSpread, InlineFragment, Operation, Selection};
use pretty_assertions::assert_eq;
use schema::{AbstractTypeContext, Schema, SchemaBuilder};
use serde_json::json;
use value::ResolvedValue;

use crate::{
    CancellationToken, CompletionConfig, DefaultFieldResolver, ErrorCode, Executor, FnResolver, ResolverContext,
};

fn star_wars() -> SchemaBuilder {
    let mut builder = SchemaBuilder::new();
    builder
        .add_object("Query", &[], &[("hero", "Character"), ("requiredHero", "Character!")])
        .add_object("Mutation", &[], &[("increment", "Int!"), ("promote", "Character")])
        .add_interface("Character", &[("name", "String!"), ("friends", "[Character]")])
        .add_object("Human", &["Character"], &[("name", "String!"), ("friends", "[Character]")])
        .add_object(
            "Droid",
            &["Character"],
            &[("name", "String!"), ("friends", "[Character]"), ("primaryFunction", "String")],
        );
    builder
}

fn root_value() -> ResolvedValue {
    let luke = json!({
        "__typename": "Human",
        "name": "Luke Skywalker",
        "friends": [
            {"__typename": "Droid", "name": "R2-D2", "primaryFunction": "Astromech"},
            {"__typename": "Human", "name": "Han Solo"}
        ]
    });
    json!({"hero": luke.clone(), "requiredHero": luke}).into()
}

fn field(name: &str) -> FieldSelection {
    FieldSelection::new(name)
}

fn with_name(name: &str, selections: impl IntoIterator<Item = Selection>) -> Selection {
    field(name).selections(selections).into()
}

/// Reads fields from the parent object like the default resolver, recording the path of each
/// resolved field.
fn recording(seen: &Mutex<Vec<String>>) -> FnResolver<impl Fn(ResolverContext<'_>) -> ResolvedValue + '_> {
    FnResolver::new(move |ctx: ResolverContext<'_>| {
        seen.lock().unwrap().push(ctx.path.to_string());
        match ctx.parent() {
            Some(ResolvedValue::Object(object)) => object.field(&ctx.field.name).unwrap_or_default(),
            _ => ResolvedValue::Null,
        }
    })
}

#[tokio::test]
async fn nested_objects_and_lists() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::query([
        with_name(
            "hero",
            [
                field("__typename").into(),
                field("name").into(),
                with_name(
                    "friends",
                    [
                        field("name").into(),
                        InlineFragment::new(Some("Droid"), [field("primaryFunction").into()]).into(),
                    ],
                ),
            ],
        ),
        field("hero").alias("leader").selections([field("name").into()]).into(),
    ]);

    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .execute(root_value())
        .await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": {
                "hero": {
                    "__typename": "Human",
                    "name": "Luke Skywalker",
                    "friends": [
                        {"name": "R2-D2", "primaryFunction": "Astromech"},
                        {"name": "Han Solo"}
                    ]
                },
                "leader": {"name": "Luke Skywalker"}
            }
        })
    );
}

#[tokio::test]
async fn response_keeps_selection_order() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::query([with_name("hero", [field("name").into(), field("__typename").into()])]);

    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .execute(root_value())
        .await;

    assert_eq!(
        serde_json::to_string(&response).unwrap(),
        r#"{"data":{"hero":{"name":"Luke Skywalker","__typename":"Human"}}}"#
    );
}

#[tokio::test]
async fn fragment_spreads_and_type_resolver() {
    let mut builder = star_wars();
    builder.set_type_resolver(
        "Character",
        |ctx: AbstractTypeContext<'_>, value: &ResolvedValue| match value {
            ResolvedValue::Object(object) if object.field("primaryFunction").is_some() => {
                ctx.schema.definition_by_name("Droid")
            }
            ResolvedValue::Object(_) => ctx.schema.definition_by_name("Human"),
            _ => None,
        },
    );
    let schema = builder.build().unwrap();
    let operation = Operation::query([with_name(
        "hero",
        [with_name("friends", [FragmentSpread::new("droidFields").into()])],
    )])
    .with_fragment(
        "droidFields",
        "Droid",
        [field("name").into(), field("primaryFunction").into()],
    );

    let root = json!({
        "hero": {
            "name": "Luke Skywalker",
            "friends": [{"name": "R2-D2", "primaryFunction": "Astromech"}, {"name": "Han Solo"}]
        }
    });
    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .execute(root.into())
        .await;

    assert_eq!(
        response.data(),
        Some(&json!({
            "hero": {"friends": [{"name": "R2-D2", "primaryFunction": "Astromech"}, {}]}
        }))
    );
    assert!(response.errors().is_empty());
}

#[tokio::test]
async fn null_propagates_to_the_nearest_nullable_field() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::query([with_name(
        "hero",
        [with_name("friends", [field("name").at(1, 20).into()])],
    )]);
    let root = json!({
        "hero": {
            "__typename": "Human",
            "name": "Luke Skywalker",
            "friends": [{"__typename": "Droid"}, {"__typename": "Human", "name": "Han Solo"}]
        }
    });

    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .execute(root.into())
        .await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": {"hero": {"friends": [null, {"name": "Han Solo"}]}},
            "errors": [{
                "message": "Cannot return null for non-nullable field Droid.name",
                "locations": [{"line": 1, "column": 20}],
                "path": ["hero", "friends", 0, "name"],
                "extensions": {"code": "NON_NULL_VIOLATION"}
            }]
        })
    );
}

#[tokio::test]
async fn null_at_non_null_root_field_nulls_the_data() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::query([with_name("requiredHero", [field("name").into()])]);
    let root = json!({"requiredHero": {"__typename": "Human"}});

    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .execute(root.into())
        .await;

    assert_eq!(response.data(), None);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": null,
            "errors": [{
                "message": "Cannot return null for non-nullable field Human.name",
                "path": ["requiredHero", "name"],
                "extensions": {"code": "NON_NULL_VIOLATION"}
            }]
        })
    );
}

#[tokio::test]
async fn unknown_fields_are_reported() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::query([with_name("hero", [field("name").into(), field("mass").at(1, 15).into()])]);

    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .execute(root_value())
        .await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": {"hero": {"name": "Luke Skywalker", "mass": null}},
            "errors": [{
                "message": "Cannot query field \"mass\" on type \"Human\"",
                "locations": [{"line": 1, "column": 15}],
                "path": ["hero", "mass"],
                "extensions": {"code": "FIELD_NOT_FOUND"}
            }]
        })
    );
    assert_eq!(response.error_code_counter().to_vec(), vec![(ErrorCode::FieldNotFound, 1)]);
}

#[tokio::test]
async fn fields_are_resolved_breadth_first() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::query([with_name(
        "hero",
        [field("name").into(), with_name("friends", [field("name").into()])],
    )]);
    let seen = Mutex::new(Vec::new());

    Executor::new(&schema, &operation, recording(&seen))
        .execute(root_value())
        .await;

    assert_eq!(
        seen.into_inner().unwrap(),
        vec![
            "hero",
            "hero.name",
            "hero.friends",
            "hero.friends.0.name",
            "hero.friends.1.name",
        ]
    );
}

#[tokio::test]
async fn mutation_root_fields_are_executed_in_order() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::mutation([
        field("increment").alias("first").into(),
        field("increment").alias("second").into(),
        field("increment").alias("third").into(),
    ]);
    let counter = AtomicI64::new(0);
    let resolver = FnResolver::new(|_: ResolverContext<'_>| ResolvedValue::Int(counter.fetch_add(1, Ordering::SeqCst) + 1));

    let response = Executor::new(&schema, &operation, resolver)
        .execute(ResolvedValue::Null)
        .await;

    assert_eq!(response.data(), Some(&json!({"first": 1, "second": 2, "third": 3})));
}

#[tokio::test]
async fn mutation_root_field_completes_before_the_next_starts() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::mutation([
        field("promote")
            .alias("first")
            .selections([field("name").into(), with_name("friends", [field("name").into()])])
            .into(),
        field("promote").alias("second").selections([field("name").into()]).into(),
    ]);
    let root = json!({
        "promote": {
            "__typename": "Human",
            "name": "Luke Skywalker",
            "friends": [{"__typename": "Droid", "name": "R2-D2"}, {"__typename": "Human", "name": "Han Solo"}]
        }
    });
    let seen = Mutex::new(Vec::new());

    let response = Executor::new(&schema, &operation, recording(&seen))
        .execute(root.into())
        .await;

    assert_eq!(
        seen.into_inner().unwrap(),
        vec![
            "first",
            "first.name",
            "first.friends",
            "first.friends.0.name",
            "first.friends.1.name",
            "second",
            "second.name",
        ]
    );
    assert_eq!(
        response.data(),
        Some(&json!({
            "first": {"name": "Luke Skywalker", "friends": [{"name": "R2-D2"}, {"name": "Han Solo"}]},
            "second": {"name": "Luke Skywalker"}
        }))
    );
}

#[tokio::test]
async fn mutation_without_mutation_type() {
    let mut builder = SchemaBuilder::new();
    builder.add_object("Query", &[], &[("version", "String")]);
    let schema: Schema = builder.build().unwrap();
    let operation = Operation::mutation([field("increment").into()]);

    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .execute(ResolvedValue::Null)
        .await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": null,
            "errors": [{
                "message": "The schema does not support mutation operations",
                "extensions": {"code": "BAD_REQUEST"}
            }]
        })
    );
}

#[tokio::test]
async fn cancelled_execution_stops_before_the_next_stage() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::query([with_name("hero", [field("name").into()])]);
    let cancellation = CancellationToken::default();
    cancellation.cancel();

    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .with_cancellation(cancellation)
        .execute(root_value())
        .await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": {"hero": null},
            "errors": [{
                "message": "The operation was cancelled",
                "extensions": {"code": "OPERATION_CANCELLED"}
            }]
        })
    );
}

#[tokio::test]
async fn execution_is_bounded_by_max_stages() {
    let schema = star_wars().build().unwrap();
    let operation = Operation::query([with_name("hero", [with_name("friends", [field("name").into()])])]);
    let config = CompletionConfig {
        max_stages: NonZeroUsize::new(2),
        ..Default::default()
    };

    let response = Executor::new(&schema, &operation, DefaultFieldResolver)
        .with_config(config)
        .execute(root_value())
        .await;

    // The names of the friends were never resolved.
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": {"hero": {"friends": [null, null]}},
            "errors": [{
                "message": "Execution exceeded the maximum of 2 stages",
                "extensions": {"code": "LIMIT_EXCEEDED"}
            }]
        })
    );
}
