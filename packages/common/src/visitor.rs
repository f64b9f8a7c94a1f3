use crate::document::Props;
use serde_json::Value;
use std::fmt;

/// One step into a property tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a block's property bag, e.g. `images[2].src`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropPath {
    segments: Vec<PathSegment>,
}

impl PropPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for PropPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Visitor pattern for walking property trees immutably
///
/// The default implementations walk every nested object and array.
/// Override `visit_string` (or `visit_value`) to act on leaves.
pub trait PropVisitor: Sized {
    fn visit_value(&mut self, path: &mut PropPath, value: &Value) {
        walk_value(self, path, value);
    }

    fn visit_string(&mut self, _path: &PropPath, _value: &str) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor pattern for rewriting property trees in place
pub trait PropVisitorMut: Sized {
    fn visit_value_mut(&mut self, path: &mut PropPath, value: &mut Value) {
        walk_value_mut(self, path, value);
    }

    fn visit_string_mut(&mut self, _path: &PropPath, _value: &mut String) {
        // Leaf node, no children to walk
    }
}

pub fn walk_props<V: PropVisitor>(visitor: &mut V, props: &Props) {
    let mut path = PropPath::new();
    for (key, value) in props {
        path.push(PathSegment::Key(key.clone()));
        visitor.visit_value(&mut path, value);
        path.pop();
    }
}

pub fn walk_value<V: PropVisitor>(visitor: &mut V, path: &mut PropPath, value: &Value) {
    match value {
        Value::String(s) => visitor.visit_string(path, s),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                visitor.visit_value(path, item);
                path.pop();
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                path.push(PathSegment::Key(key.clone()));
                visitor.visit_value(path, item);
                path.pop();
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

pub fn walk_props_mut<V: PropVisitorMut>(visitor: &mut V, props: &mut Props) {
    let mut path = PropPath::new();
    for (key, value) in props.iter_mut() {
        path.push(PathSegment::Key(key.clone()));
        visitor.visit_value_mut(&mut path, value);
        path.pop();
    }
}

pub fn walk_value_mut<V: PropVisitorMut>(visitor: &mut V, path: &mut PropPath, value: &mut Value) {
    match value {
        Value::String(s) => visitor.visit_string_mut(path, s),
        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                path.push(PathSegment::Index(index));
                visitor.visit_value_mut(path, item);
                path.pop();
            }
        }
        Value::Object(map) => {
            for (key, item) in map.iter_mut() {
                path.push(PathSegment::Key(key.clone()));
                visitor.visit_value_mut(path, item);
                path.pop();
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StringCollector(Vec<String>);

    impl PropVisitor for StringCollector {
        fn visit_string(&mut self, path: &PropPath, value: &str) {
            self.0.push(format!("{}={}", path, value));
        }
    }

    struct Upcase;

    impl PropVisitorMut for Upcase {
        fn visit_string_mut(&mut self, _path: &PropPath, value: &mut String) {
            *value = value.to_uppercase();
        }
    }

    fn sample() -> Props {
        match json!({
            "title": "faq",
            "columns": 2,
            "items": [
                { "question": "q1", "tags": ["a", "b"] },
                { "question": "q2", "open": true }
            ]
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_walk_visits_nested_strings_with_paths() {
        let mut collector = StringCollector(Vec::new());
        walk_props(&mut collector, &sample());

        assert_eq!(
            collector.0,
            vec![
                "title=faq",
                "items[0].question=q1",
                "items[0].tags[0]=a",
                "items[0].tags[1]=b",
                "items[1].question=q2",
            ]
        );
    }

    #[test]
    fn test_walk_mut_rewrites_in_place() {
        let mut props = sample();
        walk_props_mut(&mut Upcase, &mut props);

        assert_eq!(props["title"], json!("FAQ"));
        assert_eq!(props["items"][0]["tags"][1], json!("B"));
        assert_eq!(props["columns"], json!(2));
        assert_eq!(props["items"][1]["open"], json!(true));
    }
}
