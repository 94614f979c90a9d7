//! Skill registry - case-insensitive find-or-create over the `skills` table

use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

use super::store::CatalogStore;
use super::types::{Skill, SkillId};
use crate::error::{CatalogError, Result};

/// Identity key for a skill name: trimmed and lowercased
pub fn normalize_skill_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Find-or-create registry for skill names
///
/// `resolve_or_create("Python")` and `resolve_or_create("python")` return the
/// same id. Registration is a single upsert statement, so concurrent callers
/// cannot create duplicate rows.
pub struct SkillRegistry<'a> {
    store: &'a CatalogStore,
}

impl<'a> SkillRegistry<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Return the id for `name`, registering it on first sight
    pub fn resolve_or_create(&self, name: &str) -> Result<SkillId> {
        upsert(self.store.conn(), name)
    }

    /// Resolve a list of names in order, all in one transaction
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<SkillId>> {
        let tx = self.store.conn().unchecked_transaction()?;
        let ids = names
            .iter()
            .map(|name| upsert(&tx, name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
    }

    /// Look up a skill by id
    pub fn get(&self, id: SkillId) -> Result<Option<Skill>> {
        let skill = self
            .store
            .conn()
            .query_row(
                "SELECT id, name, normalized_name FROM skills WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Skill {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        normalized_name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(skill)
    }

    /// Snapshot of id -> display name
    pub fn snapshot(&self) -> Result<HashMap<SkillId, String>> {
        Ok(self
            .store
            .list_skills()?
            .into_iter()
            .map(|skill| (skill.id, skill.name))
            .collect())
    }
}

fn upsert(conn: &Connection, name: &str) -> Result<SkillId> {
    let normalized = normalize_skill_name(name);
    if normalized.is_empty() {
        return Err(CatalogError::InvalidSkillName(name.to_string()));
    }

    // No-op update on conflict so RETURNING yields the existing row
    let id = conn.query_row(
        "INSERT INTO skills (name, normalized_name) VALUES (?1, ?2)
         ON CONFLICT(normalized_name) DO UPDATE SET normalized_name = excluded.normalized_name
         RETURNING id",
        params![name.trim(), normalized],
        |row| row.get(0),
    )?;

    Ok(id)
}
