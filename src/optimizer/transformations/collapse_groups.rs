use crate::error::Result;
use crate::optimizer::attributes::is_inheritable;
use crate::types::{Document, Element, Node};

/// Collapse useless groups
///
/// Children are processed before their parents. For each `g`:
/// 1. when it has exactly one child element, its attributes are moved to
///    that child where they do not conflict (transforms are concatenated,
///    `inherit` is resolved, inheritable attributes of the child win);
/// 2. when it ends up without attributes, it is replaced by its children.
///
/// Groups directly under the document or inside `switch` are kept, and
/// nothing is moved into a child with an `id` or through a group with a
/// `filter`. Clip paths and masks only move onto a child group when
/// neither carries a transform.
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::collapse_groups;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><g fill="red"><g><path d="M0 0"/></g></g></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// collapse_groups(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0" fill="red"/></svg>"#);
/// ```
pub fn collapse_groups(doc: &mut Document) -> Result<()> {
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        collapse_children(elem);
    }
    Ok(())
}

fn collapse_children(elem: &mut Element) {
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        collapse_children(child);
    }

    if elem.name == "switch" {
        return;
    }

    let children = std::mem::take(&mut elem.children);
    for node in children {
        match node {
            Node::Element(mut group) if group.name == "g" && !group.children.is_empty() => {
                move_attrs_to_single_child(&mut group);
                if group.attributes.is_empty() {
                    elem.children.append(&mut group.children);
                } else {
                    elem.children.push(Node::Element(group));
                }
            }
            other => elem.children.push(other),
        }
    }
}

fn move_attrs_to_single_child(group: &mut Element) {
    if group.attributes.is_empty() || group.children.len() != 1 {
        return;
    }
    if group.has_attr("filter") {
        return;
    }
    let group_has_transform = group.has_attr("transform");
    let group_clips = group.has_attr("clip-path") || group.has_attr("mask");
    let group_has_class = group.has_attr("class");

    let Some(Node::Element(child)) = group.children.first_mut() else {
        return;
    };
    if child.has_attr("id") || (group_has_class && child.has_attr("class")) {
        return;
    }
    if group_clips && (child.name != "g" || group_has_transform || child.has_attr("transform")) {
        return;
    }

    let attributes = std::mem::take(&mut group.attributes);
    let mut remaining = attributes.into_iter();
    for (name, value) in remaining.by_ref() {
        match child.attr(&name) {
            None | Some("inherit") => child.set_attr(&name, &value),
            Some(own) if name == "transform" => {
                let combined = format!("{value} {own}");
                child.set_attr(&name, &combined);
            }
            Some(own) if !is_inheritable(&name) && own != value => {
                // Conflict: keep this attribute and the rest on the group
                group.attributes.push((name, value));
                break;
            }
            Some(_) => {}
        }
    }
    group.attributes.extend(remaining);
}
