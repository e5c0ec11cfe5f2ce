/// A parsed SVG document
///
/// Holds the top-level nodes in document order. After parsing a well-formed
/// export this is normally a single `svg` element, but stray text nodes can
/// survive until the re-rooting pass validates the shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    /// Create a document from its top-level nodes
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Get the first top-level element, if any
    pub fn root_element(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Get the first top-level element mutably, if any
    pub fn root_element_mut(&mut self) -> Option<&mut Element> {
        self.children.iter_mut().find_map(Node::as_element_mut)
    }

    /// Visit every element in document order, parents before children
    pub fn for_each_element<F: FnMut(&Element)>(&self, f: &mut F) {
        for elem in self.children.iter().filter_map(Node::as_element) {
            elem.for_each_element(f);
        }
    }

    /// Visit every element mutably in document order, parents before children
    pub fn for_each_element_mut<F: FnMut(&mut Element)>(&mut self, f: &mut F) {
        for elem in self.children.iter_mut().filter_map(Node::as_element_mut) {
            elem.for_each_element_mut(f);
        }
    }
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(elem) => Some(elem),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(elem) => Some(elem),
            Node::Text(_) => None,
        }
    }

    /// Check if this node is an element with the given tag name
    pub fn is_element_named(&self, name: &str) -> bool {
        self.as_element().is_some_and(|e| e.name == name)
    }
}

/// An element with its attributes and children
///
/// Attributes are kept in a vector so that serialization order is exactly
/// the stored order. Names never repeat: `set_attr` replaces in place.
/// Namespaced names carry their conventional prefix (`xlink:href`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes and no children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute, replacing the value in place if it already exists
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove an attribute and return its previous value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(n, _)| n == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Iterate over child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Visit this element and its descendants, parents before children
    pub fn for_each_element<F: FnMut(&Element)>(&self, f: &mut F) {
        f(self);
        for child in self.children.iter().filter_map(Node::as_element) {
            child.for_each_element(f);
        }
    }

    /// Visit this element and its descendants mutably, parents before children
    pub fn for_each_element_mut<F: FnMut(&mut Element)>(&mut self, f: &mut F) {
        f(self);
        for child in self.children.iter_mut().filter_map(Node::as_element_mut) {
            child.for_each_element_mut(f);
        }
    }

    /// Check if the element has any child that is an element or non-blank text
    pub fn has_content(&self) -> bool {
        self.children.iter().any(|child| match child {
            Node::Element(_) => true,
            Node::Text(text) => !text.trim().is_empty(),
        })
    }
}

/// Options for the structural optimizer
///
/// The defaults reproduce the icon export preset: four fractional digits,
/// multipass until stable (at most ten passes), every paint turned into
/// `currentColor`, and every opacity attribute stripped so that the icon
/// inherits color and opacity from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Number of fractional digits kept in path data and numeric attributes
    pub float_precision: u8,
    /// Repeat the pipeline until the output stops changing
    pub multipass: bool,
    /// Upper bound for the number of passes when `multipass` is set
    pub max_passes: usize,
    /// Replace paint colors with `currentColor`
    pub current_color: bool,
    /// Anchored regex patterns of attribute names removed from every element
    pub remove_attr_patterns: Vec<String>,
    /// Element ids removed together with their subtree
    pub remove_elements_by_id: Vec<String>,
    /// Element classes removed together with their subtree
    pub remove_elements_by_class: Vec<String>,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            float_precision: 4,
            multipass: true,
            max_passes: 10,
            current_color: true,
            remove_attr_patterns: vec!["(.*-)?opacity".to_string()],
            remove_elements_by_id: Vec::new(),
            remove_elements_by_class: Vec::new(),
        }
    }
}
