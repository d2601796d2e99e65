use std::sync::Arc;

use indexmap::{IndexMap, map::Entry};

use crate::{
    BooleanScalar, Definition, DefinitionId, EnumDefinition, EnumSerializer, FieldDefinition, FloatScalar, IdScalar,
    IntScalar, InterfaceDefinition, JsonScalar, LeafSerializer, ObjectDefinition, ResolveConcreteType,
    ScalarDefinition, Schema, StringScalar, Type, UnionDefinition,
};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Type `{0}` is defined more than once")]
    DuplicateDefinition(String),
    #[error("Unknown type `{name}` referenced by `{referenced_by}`")]
    UnknownType { name: String, referenced_by: String },
    #[error("Field `{field}` has an invalid type: {source}")]
    InvalidTypeReference {
        field: String,
        source: wrapping::InvalidTypeReference,
    },
    #[error("`{object}` cannot implement `{interface}`, it is not an interface")]
    NotAnInterface { object: String, interface: String },
    #[error("Union `{union}` member `{member}` is not an object type")]
    InvalidUnionMember { union: String, member: String },
    #[error("Type resolvers can only be attached to interfaces and unions, `{0}` is neither")]
    NotAbstract(String),
    #[error("The schema has no `{0}` object type")]
    MissingRootType(String),
}

enum PendingDefinition {
    Scalar(Option<Arc<dyn LeafSerializer>>),
    Enum(Vec<String>),
    Object {
        interfaces: Vec<String>,
        fields: Vec<(String, String)>,
    },
    Interface {
        fields: Vec<(String, String)>,
    },
    Union {
        members: Vec<String>,
    },
}

/// Builds a [`Schema`] from type definitions referencing each other by name, field types are
/// written as type references such as `[Character!]!`.
pub struct SchemaBuilder {
    definitions: IndexMap<String, PendingDefinition>,
    type_resolvers: Vec<(String, Arc<dyn ResolveConcreteType>)>,
    duplicates: Vec<String>,
    query: String,
    mutation: String,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// A builder with the built-in `Int`, `Float`, `String`, `Boolean`, `ID` and `JSON` scalars.
    pub fn new() -> Self {
        let mut builder = SchemaBuilder {
            definitions: IndexMap::new(),
            type_resolvers: Vec::new(),
            duplicates: Vec::new(),
            query: "Query".into(),
            mutation: "Mutation".into(),
        };
        builder
            .add_scalar("Int", Some(Arc::new(IntScalar)))
            .add_scalar("Float", Some(Arc::new(FloatScalar)))
            .add_scalar("String", Some(Arc::new(StringScalar)))
            .add_scalar("Boolean", Some(Arc::new(BooleanScalar)))
            .add_scalar("ID", Some(Arc::new(IdScalar)))
            .add_scalar("JSON", Some(Arc::new(JsonScalar)));
        builder
    }

    pub fn add_scalar(&mut self, name: &str, serializer: Option<Arc<dyn LeafSerializer>>) -> &mut Self {
        self.insert(name, PendingDefinition::Scalar(serializer))
    }

    pub fn add_enum(&mut self, name: &str, values: &[&str]) -> &mut Self {
        let values = values.iter().map(|value| value.to_string()).collect();
        self.insert(name, PendingDefinition::Enum(values))
    }

    pub fn add_object(&mut self, name: &str, interfaces: &[&str], fields: &[(&str, &str)]) -> &mut Self {
        self.insert(
            name,
            PendingDefinition::Object {
                interfaces: interfaces.iter().map(|name| name.to_string()).collect(),
                fields: owned_fields(fields),
            },
        )
    }

    pub fn add_interface(&mut self, name: &str, fields: &[(&str, &str)]) -> &mut Self {
        self.insert(
            name,
            PendingDefinition::Interface {
                fields: owned_fields(fields),
            },
        )
    }

    pub fn add_union(&mut self, name: &str, members: &[&str]) -> &mut Self {
        self.insert(
            name,
            PendingDefinition::Union {
                members: members.iter().map(|name| name.to_string()).collect(),
            },
        )
    }

    pub fn set_type_resolver(&mut self, name: &str, resolver: impl ResolveConcreteType + 'static) -> &mut Self {
        self.type_resolvers.push((name.to_string(), Arc::new(resolver)));
        self
    }

    pub fn set_query_type(&mut self, name: &str) -> &mut Self {
        self.query = name.to_string();
        self
    }

    pub fn set_mutation_type(&mut self, name: &str) -> &mut Self {
        self.mutation = name.to_string();
        self
    }

    fn insert(&mut self, name: &str, definition: PendingDefinition) -> &mut Self {
        match self.definitions.entry(name.to_string()) {
            Entry::Occupied(_) => self.duplicates.push(name.to_string()),
            Entry::Vacant(entry) => {
                entry.insert(definition);
            }
        }
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        if let Some(name) = self.duplicates.into_iter().next() {
            return Err(SchemaError::DuplicateDefinition(name));
        }

        let definitions_by_name: IndexMap<String, DefinitionId> = self
            .definitions
            .keys()
            .enumerate()
            .map(|(index, name)| (name.clone(), DefinitionId::new(index)))
            .collect();

        let ctx = BuildContext {
            pending: &self.definitions,
            ids: &definitions_by_name,
        };

        let mut definitions = Vec::with_capacity(self.definitions.len());
        for (name, pending) in &self.definitions {
            let definition = match pending {
                PendingDefinition::Scalar(serializer) => Definition::Scalar(ScalarDefinition {
                    name: name.clone(),
                    serializer: serializer.clone(),
                }),
                PendingDefinition::Enum(values) => Definition::Enum(EnumDefinition {
                    name: name.clone(),
                    values: values.clone(),
                    serializer: Some(Arc::new(EnumSerializer::new(name.as_str(), values.iter().cloned()))),
                }),
                PendingDefinition::Object { interfaces, fields } => Definition::Object(ObjectDefinition {
                    name: name.clone(),
                    interfaces: interfaces
                        .iter()
                        .map(|interface| ctx.interface_id(name, interface))
                        .collect::<Result<_, _>>()?,
                    fields: ctx.fields(name, fields)?,
                }),
                PendingDefinition::Interface { fields } => Definition::Interface(InterfaceDefinition {
                    name: name.clone(),
                    fields: ctx.fields(name, fields)?,
                    possible_types: ctx.implementors(name),
                    type_resolver: None,
                }),
                PendingDefinition::Union { members } => Definition::Union(UnionDefinition {
                    name: name.clone(),
                    possible_types: members
                        .iter()
                        .map(|member| ctx.union_member_id(name, member))
                        .collect::<Result<_, _>>()?,
                    type_resolver: None,
                }),
            };
            definitions.push(definition);
        }

        for (name, resolver) in self.type_resolvers {
            let slot = match definitions_by_name.get(&name).map(|id| &mut definitions[id.index()]) {
                Some(Definition::Interface(interface)) => &mut interface.type_resolver,
                Some(Definition::Union(union)) => &mut union.type_resolver,
                _ => return Err(SchemaError::NotAbstract(name)),
            };
            *slot = Some(resolver);
        }

        let root_object = |name: &str| {
            definitions_by_name
                .get(name)
                .copied()
                .filter(|id| matches!(definitions[id.index()], Definition::Object(_)))
        };
        let query = root_object(&self.query).ok_or_else(|| SchemaError::MissingRootType(self.query.clone()))?;
        let mutation = root_object(&self.mutation);

        Ok(Schema {
            definitions,
            definitions_by_name,
            query,
            mutation,
        })
    }
}

struct BuildContext<'a> {
    pending: &'a IndexMap<String, PendingDefinition>,
    ids: &'a IndexMap<String, DefinitionId>,
}

impl BuildContext<'_> {
    fn fields(&self, parent: &str, fields: &[(String, String)]) -> Result<IndexMap<String, FieldDefinition>, SchemaError> {
        fields
            .iter()
            .map(|(field_name, ty)| {
                let field = format!("{parent}.{field_name}");
                let (name, wrapping) = wrapping::parse_type(ty).map_err(|source| SchemaError::InvalidTypeReference {
                    field: field.clone(),
                    source,
                })?;
                let definition_id = self.ids.get(name).copied().ok_or_else(|| SchemaError::UnknownType {
                    name: name.to_string(),
                    referenced_by: field,
                })?;
                let definition = FieldDefinition {
                    name: field_name.clone(),
                    ty: Type::new(definition_id, wrapping),
                };
                Ok((field_name.clone(), definition))
            })
            .collect()
    }

    fn interface_id(&self, object: &str, interface: &str) -> Result<DefinitionId, SchemaError> {
        match self.pending.get_full(interface) {
            Some((index, _, PendingDefinition::Interface { .. })) => Ok(DefinitionId::new(index)),
            Some(_) => Err(SchemaError::NotAnInterface {
                object: object.to_string(),
                interface: interface.to_string(),
            }),
            None => Err(SchemaError::UnknownType {
                name: interface.to_string(),
                referenced_by: object.to_string(),
            }),
        }
    }

    fn union_member_id(&self, union: &str, member: &str) -> Result<DefinitionId, SchemaError> {
        match self.pending.get_full(member) {
            Some((index, _, PendingDefinition::Object { .. })) => Ok(DefinitionId::new(index)),
            Some(_) => Err(SchemaError::InvalidUnionMember {
                union: union.to_string(),
                member: member.to_string(),
            }),
            None => Err(SchemaError::UnknownType {
                name: member.to_string(),
                referenced_by: union.to_string(),
            }),
        }
    }

    fn implementors(&self, interface: &str) -> Vec<DefinitionId> {
        self.pending
            .iter()
            .enumerate()
            .filter_map(|(index, (_, pending))| match pending {
                PendingDefinition::Object { interfaces, .. } if interfaces.iter().any(|name| name == interface) => {
                    Some(DefinitionId::new(index))
                }
                _ => None,
            })
            .collect()
    }
}

fn owned_fields(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(name, ty)| (name.to_string(), ty.to_string()))
        .collect()
}
