use crate::error::Result;
use crate::optimizer::attributes::{
    is_inheritable, is_presentation, url_reference, GROUP_NON_INHERITABLE_ATTRS,
};
use crate::types::{Document, Node};

/// Elements that accept a transform moved down from their group
const TRANSFORMABLE_CHILDREN: &[&str] = &["g", "path", "text"];

/// Move inheritable attributes shared by every child of a group onto the group
///
/// Applies to `g` elements with at least two children, all of them
/// elements. An attribute is moved when every child carries it with the
/// same value; it then overrides the group's own value, which none of the
/// children used anyway.
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::move_elems_attrs_to_group;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><g><path fill="red" d="M0 0"/><path fill="red" stroke="blue" d="M1 1"/></g></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// move_elems_attrs_to_group(&mut doc).unwrap();
/// assert_eq!(
///     serialize_document(&doc),
///     r#"<svg><g fill="red"><path d="M0 0"/><path stroke="blue" d="M1 1"/></g></svg>"#
/// );
/// ```
pub fn move_elems_attrs_to_group(doc: &mut Document) -> Result<()> {
    doc.for_each_element_mut(&mut |elem| {
        if elem.name != "g" || elem.children.len() < 2 {
            return;
        }
        let Some(common) = common_inheritable_attrs(&elem.children) else {
            return;
        };

        for (name, value) in &common {
            elem.set_attr(name, value);
        }
        for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
            for (name, _) in &common {
                child.remove_attr(name);
            }
        }
    });
    Ok(())
}

/// Inheritable attributes carried with the same value by every child
///
/// Returns `None` when a child is not an element or nothing is shared.
fn common_inheritable_attrs(children: &[Node]) -> Option<Vec<(String, String)>> {
    let mut elements = children.iter().map(Node::as_element);
    let first = elements.next()??;

    let mut common: Vec<(String, String)> = first
        .attributes
        .iter()
        .filter(|(name, _)| is_inheritable(name))
        .cloned()
        .collect();

    for child in elements {
        let child = child?;
        common.retain(|(name, value)| child.attr(name) == Some(value.as_str()));
    }

    (!common.is_empty()).then_some(common)
}

/// Move a group's `transform` down to its children
///
/// Only done when every child is a `g`, `path` or `text` without an `id`,
/// and the group has no `url(...)` reference (a clip path or mask is laid
/// out in the group's transformed user space). The group transform is
/// prepended to each child's own transform.
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::move_group_attrs_to_elems;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><g transform="scale(2)"><path d="M0 0"/><path transform="rotate(45)" d="M1 1"/></g></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// move_group_attrs_to_elems(&mut doc).unwrap();
/// assert_eq!(
///     serialize_document(&doc),
///     r#"<svg><g><path d="M0 0" transform="scale(2)"/><path transform="scale(2) rotate(45)" d="M1 1"/></g></svg>"#
/// );
/// ```
pub fn move_group_attrs_to_elems(doc: &mut Document) -> Result<()> {
    doc.for_each_element_mut(&mut |elem| {
        if elem.name != "g" || elem.children.is_empty() {
            return;
        }
        let Some(transform) = elem.attr("transform").map(str::to_string) else {
            return;
        };
        if elem
            .attributes
            .iter()
            .any(|(_, value)| url_reference(value).is_some())
        {
            return;
        }
        let movable = elem.children.iter().all(|node| {
            node.as_element().is_some_and(|child| {
                TRANSFORMABLE_CHILDREN.contains(&child.name.as_str()) && !child.has_attr("id")
            })
        });
        if !movable {
            return;
        }

        for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
            let combined = match child.attr("transform") {
                Some(own) => format!("{transform} {own}"),
                None => transform.clone(),
            };
            child.set_attr("transform", &combined);
        }
        elem.remove_attr("transform");
    });
    Ok(())
}

/// Remove presentation attributes that have no effect on a group
///
/// Non-inheritable presentation attributes only apply to the element that
/// carries them; on a `g` they are ignored, except for the few listed in
/// [`GROUP_NON_INHERITABLE_ATTRS`] (`opacity`, `transform`, `clip-path`...).
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_non_inheritable_group_attrs;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><g stop-color="red" fill="red" opacity=".5"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// remove_non_inheritable_group_attrs(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><g fill="red" opacity=".5"/></svg>"#);
/// ```
pub fn remove_non_inheritable_group_attrs(doc: &mut Document) -> Result<()> {
    doc.for_each_element_mut(&mut |elem| {
        if elem.name != "g" {
            return;
        }
        elem.attributes.retain(|(name, _)| {
            !is_presentation(name)
                || is_inheritable(name)
                || GROUP_NON_INHERITABLE_ATTRS.contains(&name.as_str())
        });
    });
    Ok(())
}
