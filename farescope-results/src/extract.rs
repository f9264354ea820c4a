use serde_json::Value;

/// One step of a nested lookup path.
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Walks `root` step by step. Returns `None` as soon as a step cannot be
/// taken (wrong container type, missing key, index out of range) or when the
/// final value is JSON null. Never panics.
///
/// This is the only primitive that reads unstructured itinerary fields;
/// everything above it works with typed values.
pub fn get_nested<'v>(root: &'v Value, path: &[Step<'_>]) -> Option<&'v Value> {
    let mut current = root;
    for step in path {
        current = match step {
            Step::Key(key) => current.as_object()?.get(*key)?,
            Step::Index(i) => current.as_array()?.get(*i)?,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

pub fn nested_str<'v>(root: &'v Value, path: &[Step<'_>]) -> Option<&'v str> {
    get_nested(root, path)?.as_str()
}

pub fn nested_f64(root: &Value, path: &[Step<'_>]) -> Option<f64> {
    get_nested(root, path)?.as_f64()
}

pub fn nested_i64(root: &Value, path: &[Step<'_>]) -> Option<i64> {
    get_nested(root, path)?.as_i64()
}

pub fn nested_array<'v>(root: &'v Value, path: &[Step<'_>]) -> Option<&'v Vec<Value>> {
    get_nested(root, path)?.as_array()
}
