use crate::ResolvedValue;

/// Persistent stack of the objects enclosing the value being completed, innermost last.
///
/// Pushing returns a new stack sharing its structure with the receiver, so a stack can be
/// handed to every child field of an object without copying.
#[derive(Debug, Clone, Default)]
pub struct SourceStack(im::Vector<ResolvedValue>);

impl SourceStack {
    pub fn new(root: ResolvedValue) -> Self {
        SourceStack(im::vector![root])
    }

    #[must_use]
    pub fn push(&self, value: ResolvedValue) -> Self {
        let mut sources = self.0.clone();
        sources.push_back(value);
        SourceStack(sources)
    }

    /// The innermost source.
    pub fn peek(&self) -> Option<&ResolvedValue> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sources from the innermost to the root.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedValue> + '_ {
        self.0.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn push_does_not_mutate_the_receiver() {
        let root = SourceStack::new(ResolvedValue::Int(0));
        let child = root.push(ResolvedValue::Int(1));
        let sibling = root.push(ResolvedValue::Int(2));

        assert_eq!(root.len(), 1);
        assert!(matches!(child.peek(), Some(ResolvedValue::Int(1))));
        assert!(matches!(sibling.peek(), Some(ResolvedValue::Int(2))));
        assert_eq!(
            child.iter().map(|value| value.kind().to_string()).collect::<Vec<_>>(),
            vec!["Int", "Int"]
        );
    }
}
