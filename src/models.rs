use serde::{Deserialize, Serialize};

/// One named, multi-valued attribute of an entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl Attribute {
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Attribute names compare without regard to ASCII case
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Directory entry as materialized by the data layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub dn: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Entry {
    pub fn new(dn: &str) -> Self {
        Self {
            dn: dn.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, values: &[&str]) -> Self {
        self.attributes.push(Attribute::new(name, values));
        self
    }

    /// All values of every attribute carrying `name`, in entry order
    pub fn values_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.attributes
            .iter()
            .filter(move |a| a.is_named(name))
            .flat_map(|a| a.values.iter().map(String::as_str))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is_named(name))
    }

    /// Case-insensitive match on both attribute name and value
    pub fn has_value(&self, name: &str, value: &str) -> bool {
        self.values_of(name).any(|v| v.eq_ignore_ascii_case(value))
    }
}
