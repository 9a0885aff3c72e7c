use serde::{Deserialize, Serialize};
use std::fmt;

/// A computed value bound for a template slot.
///
/// Floats render at fixed 9-decimal precision to match the target format's
/// field widths; integers and text render verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Num(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Num(v) => f.write_str(&format_num(*v)),
            Value::Text(v) => f.write_str(v),
        }
    }
}

fn format_num(v: f64) -> String {
    if !v.is_finite() {
        return "0.000000000".to_string();
    }
    let mut s = format!("{v:.9}");
    if s == "-0.000000000" {
        s = "0.000000000".to_string();
    }
    s
}

/// Named slots for one rendered block, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    slots: Vec<(String, Value)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.slots.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.slots.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
