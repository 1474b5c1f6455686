//! `$name` substitution.

use atomcss_core::context::{VariableTable, is_variable_char};
use atomcss_core::{Error, Location, Result};

/// How many variables may be expanded inside one another.
pub const MAX_VARIABLE_DEPTH: usize = 8;

/// Substitutes `$name` references in values.
///
/// Resolution is transitive: a variable's value may reference further
/// variables. Overrides, when present, shadow entries of the base table
/// without modifying it.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    table: &'a VariableTable,
    overrides: Option<&'a VariableTable>,
}

impl<'a> VariableResolver<'a> {
    /// Create a resolver over a variable table.
    pub fn new(table: &'a VariableTable) -> Self {
        Self {
            table,
            overrides: None,
        }
    }

    /// Layer extra variables on top of the table.
    pub fn with_overrides(mut self, overrides: &'a VariableTable) -> Self {
        self.overrides = Some(overrides).filter(|o| !o.is_empty());
        self
    }

    fn lookup(&self, name: &str) -> Option<&'a str> {
        self.overrides
            .and_then(|overrides| overrides.get(name))
            .or_else(|| self.table.get(name))
    }

    /// Replace every `$name` in `value`.
    ///
    /// A `$` not followed by a name character is kept as is.
    pub fn resolve(&self, value: &str, location: &Location) -> Result<String> {
        let mut stack = Vec::new();
        self.expand(value, &mut stack, location)
    }

    fn expand(&self, value: &str, stack: &mut Vec<String>, location: &Location) -> Result<String> {
        if !value.contains('$') {
            return Ok(value.to_owned());
        }

        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let len = after
                .find(|c: char| !is_variable_char(c))
                .unwrap_or(after.len());

            if len == 0 {
                out.push('$');
                rest = after;
                continue;
            }

            let name = &after[..len];
            if stack.iter().any(|entered| entered == name) || stack.len() >= MAX_VARIABLE_DEPTH {
                let mut chain = stack.clone();
                chain.push(name.to_owned());
                return Err(Error::variable_cycle(chain, location.clone()));
            }

            let raw = self
                .lookup(name)
                .ok_or_else(|| Error::unresolved_variable(name, location.clone()))?;

            stack.push(name.to_owned());
            let expanded = self.expand(raw, stack, location)?;
            stack.pop();

            out.push_str(&expanded);
            rest = &after[len..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomcss_core::{ErrorKind, Section};

    fn location() -> Location {
        Location::new(Section::Components, "test")
    }

    fn table(pairs: &[(&str, &str)]) -> VariableTable {
        pairs.iter().copied().collect()
    }

    #[test]
    fn substitutes_exact_value() {
        let vars = table(&[("blue1", "#01befe")]);
        let resolver = VariableResolver::new(&vars);
        assert_eq!(resolver.resolve("$blue1", &location()).unwrap(), "#01befe");
        assert_eq!(
            resolver.resolve("1px solid $blue1", &location()).unwrap(),
            "1px solid #01befe"
        );
    }

    #[test]
    fn nested_references_resolve_transitively() {
        let vars = table(&[("a", "$b $b"), ("b", "$c"), ("c", "4px")]);
        let resolver = VariableResolver::new(&vars);
        assert_eq!(resolver.resolve("$a", &location()).unwrap(), "4px 4px");
    }

    #[test]
    fn name_ends_at_first_non_name_character() {
        let vars = table(&[("radius1", "4px")]);
        let resolver = VariableResolver::new(&vars);
        assert_eq!(
            resolver.resolve("calc($radius1*2)", &location()).unwrap(),
            "calc(4px*2)"
        );
        assert_eq!(resolver.resolve("$ 5", &location()).unwrap(), "$ 5");
    }

    #[test]
    fn missing_variable() {
        let vars = VariableTable::new();
        let err = VariableResolver::new(&vars)
            .resolve("$grey3", &location())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvedVariable);
        assert!(err.to_string().contains("$grey3"));
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let vars = table(&[("loop", "1px $loop")]);
        let err = VariableResolver::new(&vars)
            .resolve("$loop", &location())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VariableCycle);
    }

    #[test]
    fn mutual_reference_is_a_cycle() {
        let vars = table(&[("a", "$b"), ("b", "$a")]);
        match VariableResolver::new(&vars).resolve("$a", &location()) {
            Err(Error::VariableCycle { chain, .. }) => assert_eq!(chain, ["a", "b", "a"]),
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn depth_limit() {
        let names: Vec<String> = (0..=MAX_VARIABLE_DEPTH).map(|i| format!("v{i}")).collect();
        let mut vars = VariableTable::new();
        for pair in names.windows(2) {
            vars.insert(pair[0].clone(), format!("${}", pair[1]));
        }
        vars.insert(names[MAX_VARIABLE_DEPTH].clone(), "end");

        let resolver = VariableResolver::new(&vars);
        // v1 sits MAX_VARIABLE_DEPTH levels above "end" and still resolves.
        assert_eq!(resolver.resolve("$v1", &location()).unwrap(), "end");
        let err = resolver.resolve("$v0", &location()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VariableCycle);
    }

    #[test]
    fn overrides_shadow_the_table() {
        let vars = table(&[("blue1", "#01befe"), ("link", "$blue1")]);
        let overrides = table(&[("blue1", "navy")]);
        let resolver = VariableResolver::new(&vars).with_overrides(&overrides);
        assert_eq!(resolver.resolve("$link", &location()).unwrap(), "navy");
        assert_eq!(vars.get("blue1"), Some("#01befe"));
    }
}
