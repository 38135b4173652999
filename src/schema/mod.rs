//! Schema: type descriptions and the type table they resolve against.

mod types;

pub use types::*;

use std::collections::HashMap;

use serde::Deserialize;

/// Caller-owned mapping from type name to description.
///
/// The engine only ever reads from it. Names are matched after every suffix
/// has been stripped, so entries are bare names such as `"Customer"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TypeTable {
    types: HashMap<String, TypeDescription>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: impl Into<TypeDescription>) {
        self.types.insert(name.into(), ty.into());
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescription> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: Into<String>, T: Into<TypeDescription>> FromIterator<(K, T)> for TypeTable {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            types: iter
                .into_iter()
                .map(|(name, ty)| (name.into(), ty.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_from_json() {
        let table: TypeTable = serde_json::from_str(
            r#"{"Point":{"x":"float","y":"float"},"Color":["red","green"],"Id":"uuid"}"#,
        )
        .expect("parse");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("Id"), Some(&TypeDescription::named("uuid")));
        assert!(matches!(table.get("Color"), Some(TypeDescription::Enum(cases)) if cases.len() == 2));
        assert!(!table.contains("Missing"));
    }

    #[test]
    fn table_from_pairs() {
        let table: TypeTable = [("Id", "uuid"), ("Ids", "Id[]")].into_iter().collect();
        assert_eq!(table.get("Ids"), Some(&TypeDescription::named("Id[]")));
    }
}
