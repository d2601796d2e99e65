use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{DefinitionId, LeafSerializer, ResolveConcreteType, Type};

#[derive(Debug)]
pub enum Definition {
    Scalar(ScalarDefinition),
    Enum(EnumDefinition),
    Object(ObjectDefinition),
    Interface(InterfaceDefinition),
    Union(UnionDefinition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DefinitionKind {
    Scalar,
    Enum,
    Object,
    Interface,
    Union,
}

pub struct ScalarDefinition {
    pub name: String,
    pub serializer: Option<Arc<dyn LeafSerializer>>,
}

pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<String>,
    pub serializer: Option<Arc<dyn LeafSerializer>>,
}

#[derive(Debug)]
pub struct ObjectDefinition {
    pub name: String,
    pub interfaces: Vec<DefinitionId>,
    pub fields: IndexMap<String, FieldDefinition>,
}

pub struct InterfaceDefinition {
    pub name: String,
    pub fields: IndexMap<String, FieldDefinition>,
    pub possible_types: Vec<DefinitionId>,
    pub type_resolver: Option<Arc<dyn ResolveConcreteType>>,
}

pub struct UnionDefinition {
    pub name: String,
    pub possible_types: Vec<DefinitionId>,
    pub type_resolver: Option<Arc<dyn ResolveConcreteType>>,
}

#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: Type,
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Scalar(scalar) => &scalar.name,
            Definition::Enum(enum_) => &enum_.name,
            Definition::Object(object) => &object.name,
            Definition::Interface(interface) => &interface.name,
            Definition::Union(union) => &union.name,
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        match self {
            Definition::Scalar(_) => DefinitionKind::Scalar,
            Definition::Enum(_) => DefinitionKind::Enum,
            Definition::Object(_) => DefinitionKind::Object,
            Definition::Interface(_) => DefinitionKind::Interface,
            Definition::Union(_) => DefinitionKind::Union,
        }
    }

    /// Scalars and enums.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Definition::Scalar(_) | Definition::Enum(_))
    }

    /// Objects, interfaces and unions.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Definition::Object(_) | Definition::Interface(_) | Definition::Union(_)
        )
    }

    pub fn leaf_serializer(&self) -> Option<&dyn LeafSerializer> {
        match self {
            Definition::Scalar(scalar) => scalar.serializer.as_deref(),
            Definition::Enum(enum_) => enum_.serializer.as_deref(),
            _ => None,
        }
    }

    pub fn type_resolver(&self) -> Option<&dyn ResolveConcreteType> {
        match self {
            Definition::Interface(interface) => interface.type_resolver.as_deref(),
            Definition::Union(union) => union.type_resolver.as_deref(),
            _ => None,
        }
    }

    pub fn possible_types(&self) -> &[DefinitionId] {
        match self {
            Definition::Interface(interface) => &interface.possible_types,
            Definition::Union(union) => &union.possible_types,
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        match self {
            Definition::Object(object) => object.fields.get(name),
            Definition::Interface(interface) => interface.fields.get(name),
            _ => None,
        }
    }
}

impl fmt::Debug for ScalarDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarDefinition")
            .field("name", &self.name)
            .field("serializable", &self.serializer.is_some())
            .finish()
    }
}

impl fmt::Debug for EnumDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumDefinition")
            .field("name", &self.name)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for InterfaceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceDefinition")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("possible_types", &self.possible_types)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for UnionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionDefinition")
            .field("name", &self.name)
            .field("possible_types", &self.possible_types)
            .finish_non_exhaustive()
    }
}
