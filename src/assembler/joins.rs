//! Automatic join discovery.
//!
//! Each filter clause whose table is not yet part of the query is joined in,
//! either through the clause's own hints or along foreign keys reachable
//! from the tables already joined. Every join is LEFT OUTER and registered
//! once per unordered pair of tables.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::ast::{JoinOn, Select};
use crate::clause::{Clause, FilterTerm, JoinHint};
use crate::schema::{ForeignKey, Schema};

/// Direction-independent identity of a column-to-column join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinDigest(String, String);

impl JoinDigest {
    /// `None` unless both sides of the predicate are columns.
    pub fn of(on: &JoinOn) -> Option<Self> {
        let (a, b) = on.tables()?;
        Some(if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        })
    }
}

impl std::fmt::Display for JoinDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.0, self.1)
    }
}

pub struct JoinAssembler<'a> {
    schema: &'a Schema,
    query: Select,
    tables: BTreeSet<String>,
    digests: HashSet<JoinDigest>,
    /// Referenced table -> first foreign key into it from a joined table.
    foreign_keys: BTreeMap<String, ForeignKey>,
}

impl<'a> JoinAssembler<'a> {
    pub fn new(schema: &'a Schema, query: Select) -> Self {
        let mut assembler = Self {
            schema,
            tables: query.from_tables().into_iter().map(String::from).collect(),
            query,
            digests: HashSet::new(),
            foreign_keys: BTreeMap::new(),
        };
        assembler.prepare();
        assembler
    }

    /// Replay joins the query already has and index every known table.
    fn prepare(&mut self) {
        let existing: Vec<(String, JoinOn)> = self
            .query
            .joins
            .iter()
            .map(|j| (j.table.clone(), j.on.clone()))
            .collect();
        for (table, on) in existing {
            self.register(&on);
            self.tables.insert(table);
        }

        let known: Vec<String> = self.tables.iter().cloned().collect();
        for table in known {
            self.register_foreign_keys(&table);
        }
    }

    /// Join in every table the term's clauses touch.
    pub fn assemble(mut self, term: &FilterTerm) -> Select {
        for clause in term.clauses() {
            if clause.is_filter() {
                self.link(clause);
            }
        }
        self.query
    }

    pub fn joined(&self, table: &str) -> bool {
        self.tables.contains(table)
    }

    fn link(&mut self, clause: &Clause) {
        let target = clause.table();
        if self.joined(target) {
            return;
        }

        for hint in clause.conditions() {
            let on = match hint {
                JoinHint::On(on) => Some(on.clone()),
                JoinHint::Table(name) => self.condition_from_table(name),
            };
            match on {
                Some(on) => self.apply(on),
                None => tracing::debug!("Join hint {:?} for {} contributes nothing", hint, target),
            }
        }

        if self.joined(target) {
            return;
        }
        match self.resolve_path(target) {
            Some(path) => {
                for fk in path {
                    self.apply(JoinOn::new(fk.referenced, fk.parent));
                }
            }
            None => tracing::debug!("No foreign key path reaches {}", target),
        }
    }

    /// `referenced = parent` for the first foreign key of `table` that
    /// points at a table already in the query.
    fn condition_from_table(&self, table: &str) -> Option<JoinOn> {
        self.schema
            .foreign_keys(table)
            .iter()
            .find(|fk| self.joined(&fk.referenced.table))
            .map(|fk| JoinOn::new(fk.referenced.clone(), fk.parent.clone()))
    }

    /// Shortest chain of foreign keys from the joined tables to `target`,
    /// in dependency order.
    fn resolve_path(&self, target: &str) -> Option<Vec<ForeignKey>> {
        if let Some(fk) = self.foreign_keys.get(target) {
            return Some(vec![fk.clone()]);
        }

        let mut visited: BTreeSet<&str> = self.tables.iter().map(String::as_str).collect();
        let mut frontier: VecDeque<(&str, Vec<ForeignKey>)> =
            self.tables.iter().map(|t| (t.as_str(), Vec::new())).collect();

        while let Some((table, path)) = frontier.pop_front() {
            for fk in self.schema.foreign_keys(table) {
                let next = fk.referenced.table.as_str();
                if !visited.insert(next) {
                    continue;
                }
                let mut hops = path.clone();
                hops.push(fk.clone());
                if next == target {
                    return Some(hops);
                }
                frontier.push_back((next, hops));
            }
        }
        None
    }

    fn apply(&mut self, on: JoinOn) {
        let Some(table) = self.register(&on) else {
            return;
        };
        tracing::debug!("LEFT OUTER JOIN {} ON {} = {}", table, on.left, on.right);
        self.register_foreign_keys(&table);
        self.query = std::mem::take(&mut self.query).join(table, on, true);
    }

    /// Record the predicate's digest; returns the table it brings in, if any.
    fn register(&mut self, on: &JoinOn) -> Option<String> {
        let Some(digest) = JoinDigest::of(on) else {
            tracing::debug!("Skipping join predicate {} = {}", on.left, on.right);
            return None;
        };
        if !self.digests.insert(digest) {
            return None;
        }

        let mut registered = None;
        for table in [on.left.table(), on.right.table()].into_iter().flatten() {
            if self.tables.insert(table.to_string()) {
                registered = Some(table.to_string());
            }
        }
        registered
    }

    fn register_foreign_keys(&mut self, table: &str) {
        for fk in self.schema.foreign_keys(table) {
            self.foreign_keys
                .entry(fk.referenced.table.clone())
                .or_insert_with(|| fk.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnRef, Value};

    #[test]
    fn test_digest_ignores_direction() {
        let a = JoinOn::new(ColumnRef::new("tags", "id"), ColumnRef::new("firmware", "tag_id"));
        let b = JoinOn::new(ColumnRef::new("firmware", "tag_id"), ColumnRef::new("tags", "id"));
        assert_eq!(JoinDigest::of(&a), JoinDigest::of(&b));
        assert_eq!(JoinDigest::of(&a).unwrap().to_string(), "firmware::tags");
    }

    #[test]
    fn test_digest_requires_columns() {
        let on = JoinOn::new(ColumnRef::new("tags", "id"), Value::Int(3));
        assert_eq!(JoinDigest::of(&on), None);
    }
}
