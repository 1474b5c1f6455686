//! Design tokens referenced as `$name` in shorthand values.

use std::collections::HashMap;

/// Mapping from variable name to raw CSS value, in definition order.
///
/// Values are stored unresolved; a value may itself reference other
/// variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    names: Vec<String>,
    values: HashMap<String, String>,
}

impl VariableTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, keeping its original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        // Remove leading "$" if present
        let name = name.strip_prefix('$').map(str::to_owned).unwrap_or(name);
        if !self.values.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.values.insert(name, value.into());
    }

    /// Get a variable's raw value.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.strip_prefix('$').unwrap_or(name);
        self.values.get(name).map(String::as_str)
    }

    /// Check if a variable exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over all variables in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .map(|name| (name.as_str(), self.values[name].as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Render the table as SCSS variable declarations.
    ///
    /// References to other variables are kept as SCSS references, so the
    /// output stays valid SCSS without resolving anything.
    pub fn to_scss(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            out.push('$');
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
        out
    }
}

/// Whether `c` may appear in a variable name.
pub fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Whether `name` is usable as a `$name` reference.
pub fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_variable_char)
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_set_get() {
        let mut vars = VariableTable::new();
        vars.insert("blue1", "#01befe");

        assert_eq!(vars.get("blue1"), Some("#01befe"));
        assert_eq!(vars.get("$blue1"), Some("#01befe"));
        assert!(!vars.contains("blue2"));
    }

    #[test]
    fn iteration_follows_definition_order() {
        let vars: VariableTable = [("b", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
        let pairs: Vec<_> = vars.iter().collect();
        assert_eq!(pairs, [("b", "3"), ("a", "2")]);
    }

    #[test]
    fn scss_export() {
        let vars: VariableTable = [("radius1", "4px"), ("radius2", "$radius1")]
            .into_iter()
            .collect();
        assert_eq!(vars.to_scss(), "$radius1: 4px;\n$radius2: $radius1;\n");
    }

    #[test]
    fn variable_names() {
        assert!(is_variable_name("grey-3_b"));
        assert!(!is_variable_name("grey 3"));
        assert!(!is_variable_name(""));
    }
}
