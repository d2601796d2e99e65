use indexmap::IndexMap;

use crate::Location;

#[derive(Debug, Clone, Default)]
pub struct SelectionSet(Vec<Selection>);

#[derive(Debug, Clone)]
pub enum Selection {
    Field(FieldSelection),
    InlineFragment(InlineFragment),
    FragmentSpread(FragmentSpread),
}

#[derive(Debug, Clone)]
pub struct FieldSelection {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: IndexMap<String, serde_json::Value>,
    pub selection_set: SelectionSet,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub selection_set: SelectionSet,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct FragmentSpread {
    pub fragment_name: String,
    pub location: Location,
}

impl SelectionSet {
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Selection> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Selection> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = Selection>>(iter: T) -> Self {
        SelectionSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        FieldSelection {
            alias: None,
            name: name.into(),
            arguments: IndexMap::new(),
            selection_set: SelectionSet::default(),
            location: Location::default(),
        }
    }

    /// Key of this field in the response object.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn selections(mut self, selections: impl IntoIterator<Item = Selection>) -> Self {
        self.selection_set = selections.into_iter().collect();
        self
    }

    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.location = Location::new(line, column);
        self
    }
}

impl InlineFragment {
    pub fn new(type_condition: Option<&str>, selections: impl IntoIterator<Item = Selection>) -> Self {
        InlineFragment {
            type_condition: type_condition.map(str::to_string),
            selection_set: selections.into_iter().collect(),
            location: Location::default(),
        }
    }
}

impl FragmentSpread {
    pub fn new(fragment_name: impl Into<String>) -> Self {
        FragmentSpread {
            fragment_name: fragment_name.into(),
            location: Location::default(),
        }
    }
}

impl From<FieldSelection> for Selection {
    fn from(field: FieldSelection) -> Self {
        Selection::Field(field)
    }
}

impl From<InlineFragment> for Selection {
    fn from(fragment: InlineFragment) -> Self {
        Selection::InlineFragment(fragment)
    }
}

impl From<FragmentSpread> for Selection {
    fn from(spread: FragmentSpread) -> Self {
        Selection::FragmentSpread(spread)
    }
}
