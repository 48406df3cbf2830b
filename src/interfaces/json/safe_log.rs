use serde_json::{Map, Number, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Containers nested deeper than this serialize as `null`.
pub const MAX_DEPTH: usize = 128;

/// A structured log payload whose objects and arrays are shared by reference,
/// so it can describe arbitrary object graphs, cycles included.
#[derive(Debug, Clone)]
pub enum LogValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Rc<RefCell<Vec<LogValue>>>),
    Object(Rc<RefCell<Vec<(String, LogValue)>>>),
}

impl LogValue {
    fn object() -> Self {
        Self::Object(Rc::new(RefCell::new(Vec::new())))
    }

    fn array() -> Self {
        Self::Array(Rc::new(RefCell::new(Vec::new())))
    }

    fn insert(&self, key: String, value: LogValue) {
        if let Self::Object(members) = self {
            members.borrow_mut().push((key, value));
        }
    }

    fn push(&self, value: LogValue) {
        if let Self::Array(items) = self {
            items.borrow_mut().push(value);
        }
    }

    fn identity(&self) -> Option<*const ()> {
        match self {
            Self::Array(items) => Some(Rc::as_ptr(items) as *const ()),
            Self::Object(members) => Some(Rc::as_ptr(members) as *const ()),
            _ => None,
        }
    }
}

impl From<Value> for LogValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => {
                let array = Self::array();
                for item in items {
                    array.push(item.into());
                }
                array
            }
            Value::Object(members) => {
                let object = Self::object();
                for (key, member) in members {
                    object.insert(key, member.into());
                }
                object
            }
        }
    }
}

/// Converts a log value to plain JSON, dropping every reference to an object
/// or array that was already visited. Dropped object members disappear and
/// dropped array elements become `null`.
///
/// Recursion stops at [`MAX_DEPTH`]; anything nested deeper becomes `null`.
pub fn to_safe_value(value: &LogValue) -> Value {
    let mut seen = HashSet::new();
    convert(value, &mut seen, 0).unwrap_or(Value::Null)
}

fn convert(value: &LogValue, seen: &mut HashSet<*const ()>, depth: usize) -> Option<Value> {
    if let Some(identity) = value.identity() {
        if !seen.insert(identity) {
            return None;
        }
        if depth >= MAX_DEPTH {
            return Some(Value::Null);
        }
    }

    let converted = match value {
        LogValue::Null => Value::Null,
        LogValue::Bool(b) => Value::Bool(*b),
        LogValue::Number(n) => Value::Number(n.clone()),
        LogValue::String(s) => Value::String(s.clone()),
        LogValue::Array(items) => Value::Array(
            items
                .borrow()
                .iter()
                .map(|item| convert(item, seen, depth + 1).unwrap_or(Value::Null))
                .collect(),
        ),
        LogValue::Object(members) => {
            let mut map = Map::new();
            for (key, member) in members.borrow().iter() {
                if let Some(converted) = convert(member, seen, depth + 1) {
                    map.insert(key.clone(), converted);
                }
            }
            Value::Object(map)
        }
    };
    Some(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(value: &str) -> LogValue {
        LogValue::String(value.to_string())
    }

    #[test]
    fn test_plain_structure_serializes_fully() {
        let content = LogValue::from(json!({
            "description": "checkout failed",
            "error": {"message": "Gateway timeout", "status": 504}
        }));

        let parsed: Value = serde_json::from_str(&to_safe_value(&content).to_string()).unwrap();
        assert_eq!(
            parsed,
            json!({
                "description": "checkout failed",
                "error": {"message": "Gateway timeout", "status": 504}
            })
        );
    }

    #[test]
    fn test_self_reference_is_omitted() {
        let node = LogValue::object();
        node.insert("name".to_string(), text("root"));
        node.insert("self".to_string(), node.clone());

        let value = to_safe_value(&node);
        assert_eq!(value, json!({"name": "root"}));
    }

    #[test]
    fn test_indirect_cycle_is_omitted() {
        let parent = LogValue::object();
        let child = LogValue::object();
        parent.insert("child".to_string(), child.clone());
        child.insert("parent".to_string(), parent.clone());
        child.insert("depth".to_string(), LogValue::Number(1.into()));

        let value = to_safe_value(&parent);
        assert_eq!(value, json!({"child": {"depth": 1}}));
    }

    #[test]
    fn test_repeated_reference_in_array_becomes_null() {
        let shared = LogValue::from(json!({"id": "x"}));
        let list = LogValue::array();
        list.push(shared.clone());
        list.push(shared);

        assert_eq!(to_safe_value(&list), json!([{"id": "x"}, null]));
    }

    #[test]
    fn test_from_json_value() {
        let value = LogValue::from(json!({"a": [1, true, null], "b": "c"}));
        assert_eq!(to_safe_value(&value), json!({"a": [1, true, null], "b": "c"}));
    }

    #[test]
    fn test_deep_nesting_is_cut_at_max_depth() {
        let root = LogValue::object();
        let mut current = root.clone();
        for _ in 0..MAX_DEPTH + 10 {
            let next = LogValue::object();
            current.insert("next".to_string(), next.clone());
            current = next;
        }

        let value = to_safe_value(&root);

        let mut node = &value;
        let mut levels = 0;
        while let Some(next) = node.get("next") {
            node = next;
            levels += 1;
        }
        assert_eq!(levels, MAX_DEPTH);
        assert_eq!(node, &Value::Null);
    }
}
