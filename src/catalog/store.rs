//! SQLite document store for the job catalog
//!
//! Three tables mirror the three logical collections:
//! - `skills` - registry rows, unique on `normalized_name`
//! - `created_jobs` - curated postings
//! - `jobs` - generated postings, bulk-replaced by the seeder
//!
//! Posting rows keep `skills_required` as a JSON array of skill ids, so a
//! posting can reference a skill that no longer (or never did) exist.

use rusqlite::{params, Connection, Row};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

use super::loader::CatalogSource;
use super::types::{JobRecord, JobSource, NewJob, Skill, SkillId};
use crate::error::{CatalogError, Result};

/// Row counts per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub skills: usize,
    pub curated: usize,
    pub generated: usize,
}

/// SQLite-backed catalog
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open or create a catalog database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path).map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(Duration::from_secs(5))?;

        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Create an in-memory catalog for testing
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS skills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                normalized_name TEXT NOT NULL UNIQUE
            );
            "#,
        )?;

        for source in JobSource::ALL {
            conn.execute_batch(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    id TEXT UNIQUE NOT NULL,
                    company_name TEXT,
                    description TEXT,
                    category TEXT,
                    workplace_type TEXT,
                    location TEXT,
                    department TEXT,
                    employment_type TEXT,
                    skills_required TEXT NOT NULL DEFAULT '[]',
                    created_at TEXT NOT NULL
                );
                "#,
                table = source.table_name()
            ))?;
        }

        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // =========================================================================
    // Skills
    // =========================================================================

    /// All registered skills in registration order
    pub fn list_skills(&self) -> Result<Vec<Skill>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, normalized_name FROM skills ORDER BY id")?;

        let skills = stmt
            .query_map([], |row| {
                Ok(Skill {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    normalized_name: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(skills)
    }

    // =========================================================================
    // Postings
    // =========================================================================

    /// All postings of one collection in insertion order
    pub fn list_jobs(&self, source: JobSource) -> Result<Vec<JobRecord>> {
        let sql = format!(
            "SELECT id, company_name, description, category, workplace_type, location,
                    department, employment_type, skills_required
             FROM {} ORDER BY seq",
            source.table_name()
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let jobs = stmt
            .query_map([], job_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(jobs)
    }

    /// Insert one posting, returning its generated id
    pub fn insert_job(&self, source: JobSource, job: &NewJob) -> Result<String> {
        insert_job_on(&self.conn, source, job)
    }

    /// Replace the whole generated collection in one transaction
    pub fn replace_generated(&self, jobs: &[NewJob]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            &format!("DELETE FROM {}", JobSource::Generated.table_name()),
            [],
        )?;
        for job in jobs {
            insert_job_on(&tx, JobSource::Generated, job)?;
        }
        tx.commit()?;
        Ok(jobs.len())
    }

    /// Row counts for all three collections
    pub fn counts(&self) -> Result<CatalogCounts> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n as usize)
        };

        Ok(CatalogCounts {
            skills: count("skills")?,
            curated: count(JobSource::Curated.table_name())?,
            generated: count(JobSource::Generated.table_name())?,
        })
    }
}

impl CatalogSource for CatalogStore {
    fn skill_records(&self) -> Result<Vec<Skill>> {
        self.list_skills()
    }

    fn job_records(&self, source: JobSource) -> Result<Vec<JobRecord>> {
        self.list_jobs(source)
    }
}

fn insert_job_on(conn: &Connection, source: JobSource, job: &NewJob) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    let skills_json = serde_json::to_string(&job.skill_ids)?;
    let created_at = chrono::Utc::now().to_rfc3339();

    conn.execute(
        &format!(
            "INSERT INTO {} (id, company_name, description, category, workplace_type,
                             location, department, employment_type, skills_required, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            source.table_name()
        ),
        params![
            id,
            job.company_name,
            job.description,
            job.category,
            job.workplace_type,
            job.location,
            job.department,
            job.employment_type,
            skills_json,
            created_at,
        ],
    )?;

    Ok(id)
}

fn job_from_row(row: &Row<'_>) -> rusqlite::Result<JobRecord> {
    let id: String = row.get(0)?;
    let skills_json: String = row.get(8)?;

    // Anything other than a list of ids counts as "no skills"
    let skill_ids: Vec<SkillId> = serde_json::from_str(&skills_json).unwrap_or_else(|e| {
        tracing::debug!(job_id = %id, error = %e, "unreadable skills_required, treating as empty");
        Vec::new()
    });

    Ok(JobRecord {
        id,
        company_name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        workplace_type: row.get(4)?,
        location: row.get(5)?,
        department: row.get(6)?,
        employment_type: row.get(7)?,
        skill_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(company: &str, skill_ids: Vec<SkillId>) -> NewJob {
        NewJob {
            company_name: Some(company.to_string()),
            category: Some("Engineering".to_string()),
            skill_ids,
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_and_list_preserves_order() {
        let store = CatalogStore::open_in_memory().unwrap();
        store.insert_job(JobSource::Curated, &job("First", vec![1])).unwrap();
        store.insert_job(JobSource::Curated, &job("Second", vec![2, 3])).unwrap();

        let jobs = store.list_jobs(JobSource::Curated).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].company_name.as_deref(), Some("First"));
        assert_eq!(jobs[1].skill_ids, vec![2, 3]);
        assert!(jobs[0].location.is_none());

        assert!(store.list_jobs(JobSource::Generated).unwrap().is_empty());
    }

    #[test]
    fn test_replace_generated_clears_previous_batch() {
        let store = CatalogStore::open_in_memory().unwrap();
        store
            .replace_generated(&[job("Old A", vec![]), job("Old B", vec![])])
            .unwrap();
        store.insert_job(JobSource::Curated, &job("Kept", vec![])).unwrap();

        let inserted = store.replace_generated(&[job("New", vec![7])]).unwrap();
        assert_eq!(inserted, 1);

        let generated = store.list_jobs(JobSource::Generated).unwrap();
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].company_name.as_deref(), Some("New"));

        let counts = store.counts().unwrap();
        assert_eq!(counts.curated, 1);
        assert_eq!(counts.generated, 1);
    }

    #[test]
    fn test_malformed_skill_refs_read_as_empty() {
        let store = CatalogStore::open_in_memory().unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO jobs (id, skills_required, created_at) VALUES ('x', 'not json', 'now')",
                [],
            )
            .unwrap();

        let jobs = store.list_jobs(JobSource::Generated).unwrap();
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].skill_ids.is_empty());
    }

    #[test]
    fn test_open_on_disk_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.db");
        let store = CatalogStore::open(&path).unwrap();
        store.insert_job(JobSource::Generated, &job("Disk", vec![])).unwrap();
        drop(store);

        let reopened = CatalogStore::open(&path).unwrap();
        assert_eq!(reopened.counts().unwrap().generated, 1);
    }
}
