//! [`SqliteStore`] — the SQLite implementation of [`CvStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use vitae_core::{
  audit::{NewRequestLog, RequestLog},
  cv::{CurriculumVitae, CurriculumVitaePatch, NewCurriculumVitae},
  entity::{
    Contact, ContactInput, ContactPatch, Project, ProjectInput, ProjectPatch,
    Skill, SkillInput, SkillPatch,
  },
  store::CvStore,
};

use crate::{
  encode::{encode_dt, RawCv, RawRequestLog},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A vitae CV store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` on the connection thread, flattening the wrapper error layer.
  ///
  /// Statements inside `f` report plain [`rusqlite::Error`]s, so the
  /// transactional write paths can mix SQL failures with domain errors
  /// (`Duplicate*`, `*NotFound`) in one `Result`.
  async fn with_conn<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut rusqlite::Connection) -> Result<T> + Send + 'static,
  {
    self.conn.call(move |conn| Ok(f(conn))).await?
  }
}

// ─── CvStore impl ────────────────────────────────────────────────────────────

impl CvStore for SqliteStore {
  type Error = Error;

  // ── Skills ────────────────────────────────────────────────────────────────

  async fn create_skill(&self, input: SkillInput) -> Result<Skill> {
    self
      .with_conn(move |conn| {
        match conn.execute(
          "INSERT INTO skills (name) VALUES (?1)",
          rusqlite::params![input.name],
        ) {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Err(Error::DuplicateSkillName(input.name));
          }
          Err(e) => return Err(e.into()),
        }
        Ok(Skill { id: conn.last_insert_rowid(), name: input.name })
      })
      .await
  }

  async fn get_skill(&self, id: i64) -> Result<Option<Skill>> {
    self
      .with_conn(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name FROM skills WHERE id = ?1",
              rusqlite::params![id],
              |row| Ok(Skill { id: row.get(0)?, name: row.get(1)? }),
            )
            .optional()?,
        )
      })
      .await
  }

  async fn list_skills(&self) -> Result<Vec<Skill>> {
    self
      .with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM skills ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| Ok(Skill { id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn update_skill(&self, id: i64, patch: SkillPatch) -> Result<Skill> {
    self
      .with_conn(move |conn| {
        let existing = conn
          .query_row(
            "SELECT id, name FROM skills WHERE id = ?1",
            rusqlite::params![id],
            |row| Ok(Skill { id: row.get(0)?, name: row.get(1)? }),
          )
          .optional()?
          .ok_or(Error::SkillNotFound(id))?;

        let name = patch.name.unwrap_or(existing.name);

        match conn.execute(
          "UPDATE skills SET name = ?1 WHERE id = ?2",
          rusqlite::params![name, id],
        ) {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Err(Error::DuplicateSkillName(name));
          }
          Err(e) => return Err(e.into()),
        }

        Ok(Skill { id, name })
      })
      .await
  }

  async fn delete_skill(&self, id: i64) -> Result<()> {
    self
      .with_conn(move |conn| {
        let n =
          conn.execute("DELETE FROM skills WHERE id = ?1", rusqlite::params![id])?;
        if n == 0 {
          return Err(Error::SkillNotFound(id));
        }
        Ok(())
      })
      .await
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn create_project(&self, input: ProjectInput) -> Result<Project> {
    self
      .with_conn(move |conn| {
        match conn.execute(
          "INSERT INTO projects (name, description) VALUES (?1, ?2)",
          rusqlite::params![input.name, input.description],
        ) {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Err(Error::DuplicateProjectName(input.name));
          }
          Err(e) => return Err(e.into()),
        }
        Ok(Project {
          id:          conn.last_insert_rowid(),
          name:        input.name,
          description: input.description,
        })
      })
      .await
  }

  async fn get_project(&self, id: i64) -> Result<Option<Project>> {
    self
      .with_conn(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, description FROM projects WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Project {
                  id:          row.get(0)?,
                  name:        row.get(1)?,
                  description: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
  }

  async fn list_projects(&self) -> Result<Vec<Project>> {
    self
      .with_conn(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, description FROM projects ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Project {
              id:          row.get(0)?,
              name:        row.get(1)?,
              description: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Project> {
    self
      .with_conn(move |conn| {
        let existing = conn
          .query_row(
            "SELECT id, name, description FROM projects WHERE id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(Project {
                id:          row.get(0)?,
                name:        row.get(1)?,
                description: row.get(2)?,
              })
            },
          )
          .optional()?
          .ok_or(Error::ProjectNotFound(id))?;

        let name = patch.name.unwrap_or(existing.name);
        let description = patch.description.unwrap_or(existing.description);

        match conn.execute(
          "UPDATE projects SET name = ?1, description = ?2 WHERE id = ?3",
          rusqlite::params![name, description, id],
        ) {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Err(Error::DuplicateProjectName(name));
          }
          Err(e) => return Err(e.into()),
        }

        Ok(Project { id, name, description })
      })
      .await
  }

  async fn delete_project(&self, id: i64) -> Result<()> {
    self
      .with_conn(move |conn| {
        let n = conn
          .execute("DELETE FROM projects WHERE id = ?1", rusqlite::params![id])?;
        if n == 0 {
          return Err(Error::ProjectNotFound(id));
        }
        Ok(())
      })
      .await
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn create_contact(&self, input: ContactInput) -> Result<Contact> {
    self
      .with_conn(move |conn| {
        match conn.execute(
          "INSERT INTO contacts (type, contact_link) VALUES (?1, ?2)",
          rusqlite::params![input.kind, input.contact_link],
        ) {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Err(Error::DuplicateContact {
              kind: input.kind,
              link: input.contact_link,
            });
          }
          Err(e) => return Err(e.into()),
        }
        Ok(Contact {
          id:           conn.last_insert_rowid(),
          kind:         input.kind,
          contact_link: input.contact_link,
        })
      })
      .await
  }

  async fn get_contact(&self, id: i64) -> Result<Option<Contact>> {
    self
      .with_conn(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, type, contact_link FROM contacts WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Contact {
                  id:           row.get(0)?,
                  kind:         row.get(1)?,
                  contact_link: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    self
      .with_conn(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, type, contact_link FROM contacts ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Contact {
              id:           row.get(0)?,
              kind:         row.get(1)?,
              contact_link: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn update_contact(&self, id: i64, patch: ContactPatch) -> Result<Contact> {
    self
      .with_conn(move |conn| {
        let existing = conn
          .query_row(
            "SELECT id, type, contact_link FROM contacts WHERE id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(Contact {
                id:           row.get(0)?,
                kind:         row.get(1)?,
                contact_link: row.get(2)?,
              })
            },
          )
          .optional()?
          .ok_or(Error::ContactNotFound(id))?;

        let kind = patch.kind.unwrap_or(existing.kind);
        let contact_link = patch.contact_link.unwrap_or(existing.contact_link);

        match conn.execute(
          "UPDATE contacts SET type = ?1, contact_link = ?2 WHERE id = ?3",
          rusqlite::params![kind, contact_link, id],
        ) {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Err(Error::DuplicateContact { kind, link: contact_link });
          }
          Err(e) => return Err(e.into()),
        }

        Ok(Contact { id, kind, contact_link })
      })
      .await
  }

  async fn delete_contact(&self, id: i64) -> Result<()> {
    self
      .with_conn(move |conn| {
        let n = conn
          .execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?;
        if n == 0 {
          return Err(Error::ContactNotFound(id));
        }
        Ok(())
      })
      .await
  }

  // ── Curriculum vitae ──────────────────────────────────────────────────────

  async fn create_cv(&self, input: NewCurriculumVitae) -> Result<CurriculumVitae> {
    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;
        let now = encode_dt(Utc::now());

        let contact_id = resolve_contact(&tx, &input.contact)?;

        tx.execute(
          "INSERT INTO curriculum_vitae
             (first_name, last_name, bio, contact_id, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![
            input.first_name,
            input.last_name,
            input.bio,
            contact_id,
            now,
          ],
        )?;
        let cv_id = tx.last_insert_rowid();

        for skill in &input.skills {
          let skill_id = resolve_skill(&tx, skill)?;
          tx.execute(
            "INSERT OR IGNORE INTO cv_skills (cv_id, skill_id) VALUES (?1, ?2)",
            rusqlite::params![cv_id, skill_id],
          )?;
        }
        for project in &input.projects {
          let project_id = resolve_project(&tx, project)?;
          tx.execute(
            "INSERT OR IGNORE INTO cv_projects (cv_id, project_id) VALUES (?1, ?2)",
            rusqlite::params![cv_id, project_id],
          )?;
        }

        let cv = load_cv(&tx, cv_id)?.ok_or(Error::CvNotFound(cv_id))?;
        tx.commit()?;
        Ok(cv)
      })
      .await
  }

  async fn get_cv(&self, id: i64) -> Result<Option<CurriculumVitae>> {
    self.with_conn(move |conn| load_cv(conn, id)).await
  }

  async fn list_cvs(&self) -> Result<Vec<CurriculumVitae>> {
    self.with_conn(load_all_cvs).await
  }

  async fn update_cv(
    &self,
    id: i64,
    patch: CurriculumVitaePatch,
  ) -> Result<CurriculumVitae> {
    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;

        let existing = load_cv(&tx, id)?.ok_or(Error::CvNotFound(id))?;

        let first_name = patch.first_name.unwrap_or(existing.first_name);
        let last_name = patch.last_name.unwrap_or(existing.last_name);
        let bio = patch.bio.unwrap_or(existing.bio);
        let contact_id = match &patch.contact {
          Some(input) => resolve_contact(&tx, input)?,
          None => existing.contact.id,
        };

        tx.execute(
          "UPDATE curriculum_vitae
           SET first_name = ?1, last_name = ?2, bio = ?3, contact_id = ?4,
               updated_at = ?5
           WHERE id = ?6",
          rusqlite::params![
            first_name,
            last_name,
            bio,
            contact_id,
            encode_dt(Utc::now()),
            id,
          ],
        )?;

        // A supplied link set replaces the stored one wholesale, even when
        // empty. An absent set leaves the stored links untouched.
        if let Some(skills) = patch.skills {
          tx.execute(
            "DELETE FROM cv_skills WHERE cv_id = ?1",
            rusqlite::params![id],
          )?;
          for skill in &skills {
            let skill_id = resolve_skill(&tx, skill)?;
            tx.execute(
              "INSERT OR IGNORE INTO cv_skills (cv_id, skill_id) VALUES (?1, ?2)",
              rusqlite::params![id, skill_id],
            )?;
          }
        }
        if let Some(projects) = patch.projects {
          tx.execute(
            "DELETE FROM cv_projects WHERE cv_id = ?1",
            rusqlite::params![id],
          )?;
          for project in &projects {
            let project_id = resolve_project(&tx, project)?;
            tx.execute(
              "INSERT OR IGNORE INTO cv_projects (cv_id, project_id) VALUES (?1, ?2)",
              rusqlite::params![id, project_id],
            )?;
          }
        }

        let cv = load_cv(&tx, id)?.ok_or(Error::CvNotFound(id))?;
        tx.commit()?;
        Ok(cv)
      })
      .await
  }

  async fn delete_cv(&self, id: i64) -> Result<()> {
    self
      .with_conn(move |conn| {
        let n = conn.execute(
          "DELETE FROM curriculum_vitae WHERE id = ?1",
          rusqlite::params![id],
        )?;
        if n == 0 {
          return Err(Error::CvNotFound(id));
        }
        Ok(())
      })
      .await
  }

  // ── Request log ───────────────────────────────────────────────────────────

  async fn record_request(&self, entry: NewRequestLog) -> Result<RequestLog> {
    self
      .with_conn(move |conn| {
        let now = Utc::now();
        conn.execute(
          "INSERT INTO request_logs
             (timestamp, method, path, query_string, remote_ip, user)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            encode_dt(now),
            entry.method,
            entry.path,
            entry.query_string,
            entry.remote_ip,
            entry.user,
          ],
        )?;
        Ok(RequestLog {
          id:           conn.last_insert_rowid(),
          timestamp:    now,
          method:       entry.method,
          path:         entry.path,
          query_string: entry.query_string,
          remote_ip:    entry.remote_ip,
          user:         entry.user,
        })
      })
      .await
  }

  async fn recent_requests(&self, limit: usize) -> Result<Vec<RequestLog>> {
    let limit = limit as i64;
    self
      .with_conn(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, timestamp, method, path, query_string, remote_ip, user
           FROM request_logs
           ORDER BY timestamp DESC, id DESC
           LIMIT ?1",
        )?;
        let raws = stmt
          .query_map(rusqlite::params![limit], |row| {
            Ok(RawRequestLog {
              id:           row.get(0)?,
              timestamp:    row.get(1)?,
              method:       row.get(2)?,
              path:         row.get(3)?,
              query_string: row.get(4)?,
              remote_ip:    row.get(5)?,
              user:         row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawRequestLog::into_log).collect()
      })
      .await
  }
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

/// True when the statement tripped a UNIQUE constraint.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

/// Get-or-create a contact by its `(type, contact_link)` pair.
///
/// The `ON CONFLICT DO NOTHING` insert plus re-read keeps the helper correct
/// when another writer lands the same pair first: the loser simply reads the
/// winner's row back.
fn resolve_contact(conn: &rusqlite::Connection, input: &ContactInput) -> Result<i64> {
  if let Some(id) = conn
    .query_row(
      "SELECT id FROM contacts WHERE type = ?1 AND contact_link = ?2",
      rusqlite::params![input.kind, input.contact_link],
      |row| row.get(0),
    )
    .optional()?
  {
    return Ok(id);
  }

  conn.execute(
    "INSERT INTO contacts (type, contact_link) VALUES (?1, ?2)
     ON CONFLICT (type, contact_link) DO NOTHING",
    rusqlite::params![input.kind, input.contact_link],
  )?;

  Ok(conn.query_row(
    "SELECT id FROM contacts WHERE type = ?1 AND contact_link = ?2",
    rusqlite::params![input.kind, input.contact_link],
    |row| row.get(0),
  )?)
}

/// Get-or-create a skill by name.
fn resolve_skill(conn: &rusqlite::Connection, input: &SkillInput) -> Result<i64> {
  if let Some(id) = conn
    .query_row(
      "SELECT id FROM skills WHERE name = ?1",
      rusqlite::params![input.name],
      |row| row.get(0),
    )
    .optional()?
  {
    return Ok(id);
  }

  conn.execute(
    "INSERT INTO skills (name) VALUES (?1) ON CONFLICT (name) DO NOTHING",
    rusqlite::params![input.name],
  )?;

  Ok(conn.query_row(
    "SELECT id FROM skills WHERE name = ?1",
    rusqlite::params![input.name],
    |row| row.get(0),
  )?)
}

/// Get-or-create a project by name.
///
/// An existing row keeps its stored description; the input description is
/// only used when the row is first created.
fn resolve_project(conn: &rusqlite::Connection, input: &ProjectInput) -> Result<i64> {
  if let Some(id) = conn
    .query_row(
      "SELECT id FROM projects WHERE name = ?1",
      rusqlite::params![input.name],
      |row| row.get(0),
    )
    .optional()?
  {
    return Ok(id);
  }

  conn.execute(
    "INSERT INTO projects (name, description) VALUES (?1, ?2)
     ON CONFLICT (name) DO NOTHING",
    rusqlite::params![input.name, input.description],
  )?;

  Ok(conn.query_row(
    "SELECT id FROM projects WHERE name = ?1",
    rusqlite::params![input.name],
    |row| row.get(0),
  )?)
}

// ─── Read model assembly ─────────────────────────────────────────────────────

fn skills_for_cv(conn: &rusqlite::Connection, cv_id: i64) -> Result<Vec<Skill>> {
  let mut stmt = conn.prepare(
    "SELECT s.id, s.name
     FROM cv_skills cs
     JOIN skills s ON s.id = cs.skill_id
     WHERE cs.cv_id = ?1
     ORDER BY s.id",
  )?;
  let rows = stmt
    .query_map(rusqlite::params![cv_id], |row| {
      Ok(Skill { id: row.get(0)?, name: row.get(1)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn projects_for_cv(conn: &rusqlite::Connection, cv_id: i64) -> Result<Vec<Project>> {
  let mut stmt = conn.prepare(
    "SELECT p.id, p.name, p.description
     FROM cv_projects cp
     JOIN projects p ON p.id = cp.project_id
     WHERE cp.cv_id = ?1
     ORDER BY p.id",
  )?;
  let rows = stmt
    .query_map(rusqlite::params![cv_id], |row| {
      Ok(Project {
        id:          row.get(0)?,
        name:        row.get(1)?,
        description: row.get(2)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Load one fully populated CV: the row with its contact joined, plus both
/// link sets. Three indexed queries.
fn load_cv(conn: &rusqlite::Connection, id: i64) -> Result<Option<CurriculumVitae>> {
  let raw = conn
    .query_row(
      "SELECT cv.id, cv.first_name, cv.last_name, cv.bio, cv.created_at,
              cv.updated_at, c.id, c.type, c.contact_link
       FROM curriculum_vitae cv
       JOIN contacts c ON c.id = cv.contact_id
       WHERE cv.id = ?1",
      rusqlite::params![id],
      |row| {
        Ok(RawCv {
          id:           row.get(0)?,
          first_name:   row.get(1)?,
          last_name:    row.get(2)?,
          bio:          row.get(3)?,
          created_at:   row.get(4)?,
          updated_at:   row.get(5)?,
          contact_id:   row.get(6)?,
          contact_kind: row.get(7)?,
          contact_link: row.get(8)?,
        })
      },
    )
    .optional()?;

  let Some(raw) = raw else { return Ok(None) };

  let skills = skills_for_cv(conn, raw.id)?;
  let projects = projects_for_cv(conn, raw.id)?;
  Ok(Some(raw.into_cv(skills, projects)?))
}

/// Load every CV fully populated in three batched queries — one over the CV
/// rows, one over each link table — regardless of how many CVs exist.
fn load_all_cvs(conn: &mut rusqlite::Connection) -> Result<Vec<CurriculumVitae>> {
  let mut stmt = conn.prepare(
    "SELECT cv.id, cv.first_name, cv.last_name, cv.bio, cv.created_at,
            cv.updated_at, c.id, c.type, c.contact_link
     FROM curriculum_vitae cv
     JOIN contacts c ON c.id = cv.contact_id
     ORDER BY cv.id",
  )?;
  let raws = stmt
    .query_map([], |row| {
      Ok(RawCv {
        id:           row.get(0)?,
        first_name:   row.get(1)?,
        last_name:    row.get(2)?,
        bio:          row.get(3)?,
        created_at:   row.get(4)?,
        updated_at:   row.get(5)?,
        contact_id:   row.get(6)?,
        contact_kind: row.get(7)?,
        contact_link: row.get(8)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut skills: HashMap<i64, Vec<Skill>> = HashMap::new();
  let mut stmt = conn.prepare(
    "SELECT cs.cv_id, s.id, s.name
     FROM cv_skills cs
     JOIN skills s ON s.id = cs.skill_id
     ORDER BY cs.cv_id, s.id",
  )?;
  let rows = stmt
    .query_map([], |row| {
      Ok((
        row.get::<_, i64>(0)?,
        Skill { id: row.get(1)?, name: row.get(2)? },
      ))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  for (cv_id, skill) in rows {
    skills.entry(cv_id).or_default().push(skill);
  }

  let mut projects: HashMap<i64, Vec<Project>> = HashMap::new();
  let mut stmt = conn.prepare(
    "SELECT cp.cv_id, p.id, p.name, p.description
     FROM cv_projects cp
     JOIN projects p ON p.id = cp.project_id
     ORDER BY cp.cv_id, p.id",
  )?;
  let rows = stmt
    .query_map([], |row| {
      Ok((
        row.get::<_, i64>(0)?,
        Project {
          id:          row.get(1)?,
          name:        row.get(2)?,
          description: row.get(3)?,
        },
      ))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  for (cv_id, project) in rows {
    projects.entry(cv_id).or_default().push(project);
  }

  raws
    .into_iter()
    .map(|raw| {
      let s = skills.remove(&raw.id).unwrap_or_default();
      let p = projects.remove(&raw.id).unwrap_or_default();
      raw.into_cv(s, p)
    })
    .collect()
}
