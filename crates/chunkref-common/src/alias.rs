//! Surface forms authors use to name a chunk type in running text.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::chunk::ChunkType;

const ALIASES: &[(&str, ChunkType)] = &[
    ("definition", ChunkType::Definition),
    ("defn", ChunkType::Definition),
    ("def", ChunkType::Definition),
    ("定义", ChunkType::Definition),
    ("theorem", ChunkType::Theorem),
    ("thm", ChunkType::Theorem),
    ("定理", ChunkType::Theorem),
    ("lemma", ChunkType::Lemma),
    ("lem", ChunkType::Lemma),
    ("引理", ChunkType::Lemma),
    ("corollary", ChunkType::Corollary),
    ("cor", ChunkType::Corollary),
    ("推论", ChunkType::Corollary),
    ("example", ChunkType::Example),
    ("例子", ChunkType::Example),
    ("例题", ChunkType::Example),
    ("例", ChunkType::Example),
    ("exercise", ChunkType::Exercise),
    ("exer", ChunkType::Exercise),
    ("练习", ChunkType::Exercise),
    ("习题", ChunkType::Exercise),
    ("remark", ChunkType::Remark),
    ("rem", ChunkType::Remark),
    ("注记", ChunkType::Remark),
    ("注", ChunkType::Remark),
    ("proposition", ChunkType::Proposition),
    ("prop", ChunkType::Proposition),
    ("命题", ChunkType::Proposition),
];

static ALIAS_TABLE: LazyLock<AliasTable> = LazyLock::new(|| AliasTable::new(ALIASES.iter().copied()));

/// Case-insensitive alias → [`ChunkType`] lookup.
#[derive(Debug, Clone)]
pub struct AliasTable {
    map: HashMap<String, ChunkType>,
}

impl AliasTable {
    /// Builds a table from `(alias, type)` pairs. Aliases are lowercased;
    /// a repeated alias keeps the last type given for it.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, ChunkType)>) -> Self {
        let mut map = HashMap::new();
        for (alias, ty) in entries {
            map.insert(alias.to_lowercase(), ty);
        }
        Self { map }
    }

    /// The built-in table shared by the whole process.
    pub fn global() -> &'static AliasTable {
        &ALIAS_TABLE
    }

    pub fn get(&self, alias: &str) -> Option<ChunkType> {
        self.map.get(&alias.to_lowercase()).copied()
    }

    /// All aliases, longest first.
    ///
    /// Alternations built from this list try `exercise` before `exer`, so the
    /// longer form is the one reported when both would match.
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.map.keys().map(String::as_str).collect();
        aliases.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        aliases
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_reachable_from_its_own_name() {
        let table = AliasTable::global();
        for ty in ChunkType::ALL {
            assert_eq!(table.get(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn every_type_has_a_chinese_alias() {
        let table = AliasTable::global();
        for ty in ChunkType::ALL {
            assert!(
                table
                    .aliases()
                    .iter()
                    .any(|a| !a.is_ascii() && table.get(a) == Some(ty)),
                "{ty} has no non-ASCII alias"
            );
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let table = AliasTable::global();
        assert_eq!(table.get("THM"), Some(ChunkType::Theorem));
        assert_eq!(table.get("Prop"), Some(ChunkType::Proposition));
        assert_eq!(table.get("定理"), Some(ChunkType::Theorem));
        assert_eq!(table.get("axiom"), None);
    }

    #[test]
    fn aliases_are_longest_first() {
        let aliases = AliasTable::global().aliases();
        let exercise = aliases.iter().position(|a| *a == "exercise").unwrap();
        let exer = aliases.iter().position(|a| *a == "exer").unwrap();
        assert!(exercise < exer);
        let remark = aliases.iter().position(|a| *a == "注记").unwrap();
        let note = aliases.iter().position(|a| *a == "注").unwrap();
        assert!(remark < note);
    }

    #[test]
    fn last_entry_wins() {
        let table = AliasTable::new([("x", ChunkType::Lemma), ("X", ChunkType::Remark)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("x"), Some(ChunkType::Remark));
    }
}
