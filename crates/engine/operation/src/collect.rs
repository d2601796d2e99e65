use std::collections::HashSet;

use indexmap::IndexMap;
use schema::{DefinitionId, Schema};

use crate::{FieldSelection, Location, Operation, ResponseKey, Selection, SelectionSet};

/// All the selections of an object sharing the same response key.
#[derive(Debug, Clone)]
pub struct CollectedField<'op> {
    pub response_key: ResponseKey,
    pub name: &'op str,
    /// In document order, never empty.
    pub selections: Vec<&'op FieldSelection>,
}

impl<'op> CollectedField<'op> {
    pub fn selection(&self) -> &'op FieldSelection {
        self.selections[0]
    }

    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.selections.iter().map(|selection| selection.location)
    }

    /// Sub-selections of every merged selection, collected together for the field's value.
    pub fn selection_sets(&self) -> impl Iterator<Item = &'op SelectionSet> + '_ {
        self.selections.iter().map(|selection| &selection.selection_set)
    }
}

/// Collects the fields selected on an object of type `object_id`.
///
/// Fields are returned in the order their response key first appears in the document. Fragments
/// are only expanded if their type condition applies to the object, and each named fragment is
/// expanded at most once.
pub fn collect_fields<'op>(
    schema: &Schema,
    operation: &'op Operation,
    object_id: DefinitionId,
    selection_sets: impl IntoIterator<Item = &'op SelectionSet>,
) -> Vec<CollectedField<'op>> {
    let mut collector = FieldCollector {
        schema,
        operation,
        object_id,
        visited_fragments: HashSet::new(),
        fields: IndexMap::new(),
    };
    for selection_set in selection_sets {
        collector.collect(selection_set);
    }
    collector.fields.into_values().collect()
}

struct FieldCollector<'s, 'op> {
    schema: &'s Schema,
    operation: &'op Operation,
    object_id: DefinitionId,
    visited_fragments: HashSet<&'op str>,
    fields: IndexMap<&'op str, CollectedField<'op>>,
}

impl<'op> FieldCollector<'_, 'op> {
    fn collect(&mut self, selection_set: &'op SelectionSet) {
        for selection in selection_set {
            match selection {
                Selection::Field(field) => {
                    self.fields
                        .entry(field.response_key())
                        .or_insert_with(|| CollectedField {
                            response_key: field.response_key().into(),
                            name: &field.name,
                            selections: Vec::new(),
                        })
                        .selections
                        .push(field);
                }
                Selection::InlineFragment(fragment) => {
                    if fragment
                        .type_condition
                        .as_deref()
                        .is_none_or(|type_condition| self.applies(type_condition))
                    {
                        self.collect(&fragment.selection_set);
                    }
                }
                Selection::FragmentSpread(spread) => {
                    if !self.visited_fragments.insert(&spread.fragment_name) {
                        continue;
                    }
                    let Some(fragment) = self.operation.fragments.get(&spread.fragment_name) else {
                        continue;
                    };
                    if self.applies(&fragment.type_condition) {
                        self.collect(&fragment.selection_set);
                    }
                }
            }
        }
    }

    fn applies(&self, type_condition: &str) -> bool {
        self.schema.type_condition_applies(type_condition, self.object_id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use schema::SchemaBuilder;

    use super::*;
    use crate::{FragmentSpread, InlineFragment};

    fn schema() -> Schema {
        let mut builder = SchemaBuilder::new();
        builder
            .add_object("Query", &[], &[("hero", "Character")])
            .add_interface("Character", &[("id", "ID!"), ("name", "String")])
            .add_object(
                "Droid",
                &["Character"],
                &[("id", "ID!"), ("name", "String"), ("primaryFunction", "String")],
            )
            .add_object("Human", &["Character"], &[("id", "ID!"), ("name", "String"), ("height", "Float")]);
        builder.build().unwrap()
    }

    fn keys(fields: &[CollectedField<'_>]) -> Vec<(String, usize)> {
        fields
            .iter()
            .map(|field| (field.response_key.to_string(), field.selections.len()))
            .collect()
    }

    #[test]
    fn first_occurrence_order_and_merging() {
        let schema = schema();
        let operation = Operation::query([FieldSelection::new("hero")
            .selections([
                FieldSelection::new("name").into(),
                FieldSelection::new("id").alias("heroId").into(),
                InlineFragment::new(
                    Some("Droid"),
                    [
                        FieldSelection::new("primaryFunction").into(),
                        FieldSelection::new("name").into(),
                    ],
                )
                .into(),
                InlineFragment::new(Some("Human"), [FieldSelection::new("height").into()]).into(),
                FragmentSpread::new("characterFields").into(),
            ])
            .into()])
        .with_fragment(
            "characterFields",
            "Character",
            [FieldSelection::new("id").into(), FieldSelection::new("name").into()],
        );

        let Selection::Field(hero) = operation.selection_set.iter().next().unwrap() else {
            unreachable!()
        };
        let droid = schema.definition_by_name("Droid").unwrap();
        let fields = collect_fields(&schema, &operation, droid, [&hero.selection_set]);

        assert_eq!(
            keys(&fields),
            vec![
                ("name".to_string(), 3),
                ("heroId".to_string(), 1),
                ("primaryFunction".to_string(), 1),
                ("id".to_string(), 1),
            ]
        );
        assert_eq!(fields[1].name, "id");

        let human = schema.definition_by_name("Human").unwrap();
        let fields = collect_fields(&schema, &operation, human, [&hero.selection_set]);
        assert_eq!(
            keys(&fields),
            vec![
                ("name".to_string(), 2),
                ("heroId".to_string(), 1),
                ("height".to_string(), 1),
                ("id".to_string(), 1),
            ]
        );
    }

    #[test]
    fn fragments_are_expanded_once() {
        let schema = schema();
        let operation = Operation::query([
            FragmentSpread::new("root").into(),
            FragmentSpread::new("root").into(),
            FragmentSpread::new("missing").into(),
        ])
        .with_fragment(
            "root",
            "Query",
            [FieldSelection::new("hero").into(), FragmentSpread::new("root").into()],
        );

        let fields = collect_fields(
            &schema,
            &operation,
            schema.query_type(),
            [&operation.selection_set],
        );
        assert_eq!(keys(&fields), vec![("hero".to_string(), 1)]);
    }

    #[test]
    fn merged_sub_selections() {
        let schema = schema();
        let operation = Operation::query([
            FieldSelection::new("hero")
                .selections([FieldSelection::new("id").into()])
                .into(),
            FieldSelection::new("hero")
                .selections([FieldSelection::new("name").into()])
                .into(),
        ]);

        let fields = collect_fields(
            &schema,
            &operation,
            schema.query_type(),
            [&operation.selection_set],
        );
        assert_eq!(fields.len(), 1);

        let droid = schema.definition_by_name("Droid").unwrap();
        let sub_fields = collect_fields(&schema, &operation, droid, fields[0].selection_sets());
        assert_eq!(
            keys(&sub_fields),
            vec![("id".to_string(), 1), ("name".to_string(), 1)]
        );
    }
}
