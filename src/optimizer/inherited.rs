use super::attributes::is_inheritable;
use crate::types::Element;

/// Inheritable presentation attributes in effect at a point of the tree
///
/// Transformations that need to know what an element inherits walk the
/// tree recursively and call [`Inherited::enter`] on the way down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inherited {
    values: Vec<(String, String)>,
}

impl Inherited {
    /// Value inherited from the ancestors
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Context seen by the children of `elem`
    pub fn enter(&self, elem: &Element) -> Inherited {
        let mut next = self.clone();
        for (name, value) in &elem.attributes {
            if !is_inheritable(name) || value == "inherit" {
                continue;
            }
            match next.values.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => v.clone_from(value),
                None => next.values.push((name.clone(), value.clone())),
            }
        }
        next
    }

    /// Effective value on `elem`: its own value, or the inherited one
    pub fn computed<'a>(&'a self, elem: &'a Element, name: &str) -> Option<&'a str> {
        match elem.attr(name) {
            Some("inherit") | None => self.get(name),
            Some(value) => Some(value),
        }
    }
}
