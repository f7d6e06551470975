//! Integration tests for `SqliteStore` against an in-memory database.

use vitae_core::{
  audit::NewRequestLog,
  cv::{CurriculumVitaePatch, NewCurriculumVitae},
  entity::{ContactInput, ContactPatch, ProjectInput, ProjectPatch, SkillInput, SkillPatch},
  store::CvStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn skill(name: &str) -> SkillInput {
  SkillInput { name: name.into() }
}

fn project(name: &str, description: &str) -> ProjectInput {
  ProjectInput { name: name.into(), description: description.into() }
}

fn contact(kind: &str, link: &str) -> ContactInput {
  ContactInput { kind: kind.into(), contact_link: link.into() }
}

fn basic_cv(first_name: &str) -> NewCurriculumVitae {
  NewCurriculumVitae {
    first_name: first_name.into(),
    last_name:  "Doe".into(),
    bio:        "A short bio.".into(),
    contact:    contact("email", &format!("{first_name}@example.com")),
    skills:     vec![],
    projects:   vec![],
  }
}

// ─── Skills ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_skill() {
  let s = store().await;

  let created = s.create_skill(skill("Rust")).await.unwrap();
  assert_eq!(created.name, "Rust");

  let fetched = s.get_skill(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_skill_missing_returns_none() {
  let s = store().await;
  assert!(s.get_skill(999).await.unwrap().is_none());
}

#[tokio::test]
async fn create_skill_duplicate_name_errors() {
  let s = store().await;
  s.create_skill(skill("Rust")).await.unwrap();

  let err = s.create_skill(skill("Rust")).await.unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateSkillName(name) if name == "Rust"));
}

#[tokio::test]
async fn list_skills_in_insertion_order() {
  let s = store().await;
  s.create_skill(skill("Python")).await.unwrap();
  s.create_skill(skill("Haskell")).await.unwrap();
  s.create_skill(skill("Rust")).await.unwrap();

  let all = s.list_skills().await.unwrap();
  let names: Vec<_> = all.iter().map(|sk| sk.name.as_str()).collect();
  assert_eq!(names, ["Python", "Haskell", "Rust"]);
}

#[tokio::test]
async fn update_skill_renames() {
  let s = store().await;
  let created = s.create_skill(skill("Pyton")).await.unwrap();

  let updated = s
    .update_skill(created.id, SkillPatch { name: Some("Python".into()) })
    .await
    .unwrap();
  assert_eq!(updated.name, "Python");
  assert_eq!(updated.id, created.id);

  // An empty patch leaves the row alone.
  let same = s.update_skill(created.id, SkillPatch::default()).await.unwrap();
  assert_eq!(same.name, "Python");
}

#[tokio::test]
async fn update_skill_to_taken_name_errors() {
  let s = store().await;
  s.create_skill(skill("Rust")).await.unwrap();
  let other = s.create_skill(skill("Go")).await.unwrap();

  let err = s
    .update_skill(other.id, SkillPatch { name: Some("Rust".into()) })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateSkillName(_)));
}

#[tokio::test]
async fn update_skill_missing_errors() {
  let s = store().await;
  let err = s.update_skill(404, SkillPatch::default()).await.unwrap_err();
  assert!(matches!(err, crate::Error::SkillNotFound(404)));
}

#[tokio::test]
async fn delete_skill_removes_row() {
  let s = store().await;
  let created = s.create_skill(skill("COBOL")).await.unwrap();

  s.delete_skill(created.id).await.unwrap();
  assert!(s.get_skill(created.id).await.unwrap().is_none());

  let err = s.delete_skill(created.id).await.unwrap_err();
  assert!(matches!(err, crate::Error::SkillNotFound(_)));
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_project_duplicate_name_errors() {
  let s = store().await;
  s.create_project(project("CV site", "First take")).await.unwrap();

  let err = s
    .create_project(project("CV site", "Second take"))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateProjectName(_)));
}

#[tokio::test]
async fn update_project_description_only() {
  let s = store().await;
  let created = s.create_project(project("CV site", "Old text")).await.unwrap();

  let updated = s
    .update_project(
      created.id,
      ProjectPatch { name: None, description: Some("New text".into()) },
    )
    .await
    .unwrap();
  assert_eq!(updated.name, "CV site");
  assert_eq!(updated.description, "New text");
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_contact_duplicate_pair_errors() {
  let s = store().await;
  s.create_contact(contact("email", "jane@example.com")).await.unwrap();

  let err = s
    .create_contact(contact("email", "jane@example.com"))
    .await
    .unwrap_err();
  assert!(
    matches!(err, crate::Error::DuplicateContact { kind, link }
      if kind == "email" && link == "jane@example.com")
  );
}

#[tokio::test]
async fn same_link_under_different_type_is_allowed() {
  let s = store().await;
  s.create_contact(contact("email", "jane@example.com")).await.unwrap();
  s.create_contact(contact("backup", "jane@example.com")).await.unwrap();

  assert_eq!(s.list_contacts().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_contact_changes_pair() {
  let s = store().await;
  let created = s.create_contact(contact("email", "old@example.com")).await.unwrap();

  let updated = s
    .update_contact(
      created.id,
      ContactPatch { kind: None, contact_link: Some("new@example.com".into()) },
    )
    .await
    .unwrap();
  assert_eq!(updated.kind, "email");
  assert_eq!(updated.contact_link, "new@example.com");
}

// ─── CV creation ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_cv_creates_nested_rows() {
  let s = store().await;

  let mut input = basic_cv("Jane");
  input.skills = vec![skill("Rust"), skill("SQL")];
  input.projects = vec![project("CV site", "This very site")];

  let cv = s.create_cv(input).await.unwrap();

  assert_eq!(cv.first_name, "Jane");
  assert_eq!(cv.contact.kind, "email");
  assert_eq!(cv.skills.len(), 2);
  assert_eq!(cv.projects.len(), 1);
  assert_eq!(cv.created_at, cv.updated_at);

  assert_eq!(s.list_skills().await.unwrap().len(), 2);
  assert_eq!(s.list_projects().await.unwrap().len(), 1);
  assert_eq!(s.list_contacts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn create_cv_reuses_rows_by_natural_key() {
  let s = store().await;

  let existing_skill = s.create_skill(skill("Rust")).await.unwrap();
  let existing_contact =
    s.create_contact(contact("email", "jane@example.com")).await.unwrap();

  let mut input = basic_cv("Jane");
  input.contact = contact("email", "jane@example.com");
  input.skills = vec![skill("Rust")];

  let cv = s.create_cv(input).await.unwrap();

  assert_eq!(cv.contact.id, existing_contact.id);
  assert_eq!(cv.skills[0].id, existing_skill.id);
  assert_eq!(s.list_skills().await.unwrap().len(), 1);
  assert_eq!(s.list_contacts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn create_cv_keeps_existing_project_description() {
  let s = store().await;

  let original = s
    .create_project(project("CV site", "The original description"))
    .await
    .unwrap();

  let mut input = basic_cv("Jane");
  input.projects = vec![project("CV site", "A rival description")];

  let cv = s.create_cv(input).await.unwrap();

  assert_eq!(cv.projects[0].id, original.id);
  assert_eq!(cv.projects[0].description, "The original description");
}

#[tokio::test]
async fn create_cv_links_duplicate_inputs_once() {
  let s = store().await;

  let mut input = basic_cv("Jane");
  input.skills = vec![skill("Rust"), skill("Rust")];

  let cv = s.create_cv(input).await.unwrap();
  assert_eq!(cv.skills.len(), 1);
  assert_eq!(s.list_skills().await.unwrap().len(), 1);
}

#[tokio::test]
async fn two_cvs_share_one_skill_row() {
  let s = store().await;

  let mut a = basic_cv("Jane");
  a.skills = vec![skill("Rust")];
  let mut b = basic_cv("John");
  b.skills = vec![skill("Rust")];

  let cv_a = s.create_cv(a).await.unwrap();
  let cv_b = s.create_cv(b).await.unwrap();

  assert_eq!(cv_a.skills[0].id, cv_b.skills[0].id);
  assert_eq!(s.list_skills().await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_cv_missing_returns_none() {
  let s = store().await;
  assert!(s.get_cv(42).await.unwrap().is_none());
}

#[tokio::test]
async fn list_cvs_fully_populated() {
  let s = store().await;

  let mut a = basic_cv("Jane");
  a.skills = vec![skill("Rust")];
  let mut b = basic_cv("John");
  b.skills = vec![skill("Go"), skill("Rust")];
  b.projects = vec![project("CLI tool", "Terminal things")];

  s.create_cv(a).await.unwrap();
  s.create_cv(b).await.unwrap();

  let all = s.list_cvs().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].first_name, "Jane");
  assert_eq!(all[0].skills.len(), 1);
  assert!(all[0].projects.is_empty());
  assert_eq!(all[1].skills.len(), 2);
  assert_eq!(all[1].projects.len(), 1);
  assert_eq!(all[1].contact.contact_link, "John@example.com");
}

// ─── CV updates ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_cv_scalars_only() {
  let s = store().await;

  let mut input = basic_cv("Jane");
  input.skills = vec![skill("Rust")];
  let cv = s.create_cv(input).await.unwrap();

  let updated = s
    .update_cv(
      cv.id,
      CurriculumVitaePatch { bio: Some("Rewritten.".into()), ..Default::default() },
    )
    .await
    .unwrap();

  assert_eq!(updated.bio, "Rewritten.");
  assert_eq!(updated.first_name, "Jane");
  assert_eq!(updated.skills.len(), 1);
  assert_eq!(updated.created_at, cv.created_at);
  assert!(updated.updated_at >= cv.updated_at);
}

#[tokio::test]
async fn update_cv_absent_link_set_is_untouched() {
  let s = store().await;

  let mut input = basic_cv("Jane");
  input.skills = vec![skill("Rust"), skill("SQL")];
  let cv = s.create_cv(input).await.unwrap();

  let updated = s
    .update_cv(
      cv.id,
      CurriculumVitaePatch {
        first_name: Some("Janet".into()),
        ..Default::default()
      },
    )
    .await
    .unwrap();

  assert_eq!(updated.skills.len(), 2);
}

#[tokio::test]
async fn update_cv_empty_link_set_clears() {
  let s = store().await;

  let mut input = basic_cv("Jane");
  input.skills = vec![skill("Rust")];
  let cv = s.create_cv(input).await.unwrap();

  let updated = s
    .update_cv(
      cv.id,
      CurriculumVitaePatch { skills: Some(vec![]), ..Default::default() },
    )
    .await
    .unwrap();

  assert!(updated.skills.is_empty());
  // Clearing links never deletes the shared rows themselves.
  assert_eq!(s.list_skills().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_cv_replaces_link_set_wholesale() {
  let s = store().await;

  let mut input = basic_cv("Jane");
  input.skills = vec![skill("Rust"), skill("SQL")];
  let cv = s.create_cv(input).await.unwrap();

  let updated = s
    .update_cv(
      cv.id,
      CurriculumVitaePatch {
        skills: Some(vec![skill("SQL"), skill("Go")]),
        ..Default::default()
      },
    )
    .await
    .unwrap();

  let names: Vec<_> = updated.skills.iter().map(|sk| sk.name.as_str()).collect();
  assert_eq!(names, ["SQL", "Go"]);
  // The detached skill row survives for other CVs to reference.
  assert_eq!(s.list_skills().await.unwrap().len(), 3);
}

#[tokio::test]
async fn update_cv_swaps_contact_by_pair() {
  let s = store().await;

  let cv = s.create_cv(basic_cv("Jane")).await.unwrap();
  let other = s.create_contact(contact("phone", "+49123")).await.unwrap();

  let updated = s
    .update_cv(
      cv.id,
      CurriculumVitaePatch {
        contact: Some(contact("phone", "+49123")),
        ..Default::default()
      },
    )
    .await
    .unwrap();

  assert_eq!(updated.contact.id, other.id);
  // The previous contact row is left in place.
  assert_eq!(s.list_contacts().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_cv_missing_errors() {
  let s = store().await;
  let err = s
    .update_cv(7, CurriculumVitaePatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::CvNotFound(7)));
}

// ─── Deletion semantics ──────────────────────────────────────────────────────

#[tokio::test]
async fn delete_cv_leaves_shared_rows() {
  let s = store().await;

  let mut a = basic_cv("Jane");
  a.skills = vec![skill("Rust")];
  let mut b = basic_cv("John");
  b.skills = vec![skill("Rust")];

  let cv_a = s.create_cv(a).await.unwrap();
  let cv_b = s.create_cv(b).await.unwrap();

  s.delete_cv(cv_a.id).await.unwrap();

  assert!(s.get_cv(cv_a.id).await.unwrap().is_none());
  assert_eq!(s.list_skills().await.unwrap().len(), 1);

  let remaining = s.get_cv(cv_b.id).await.unwrap().unwrap();
  assert_eq!(remaining.skills.len(), 1);
}

#[tokio::test]
async fn delete_cv_missing_errors() {
  let s = store().await;
  let err = s.delete_cv(99).await.unwrap_err();
  assert!(matches!(err, crate::Error::CvNotFound(99)));
}

#[tokio::test]
async fn delete_contact_cascades_to_its_cvs() {
  let s = store().await;

  let cv = s.create_cv(basic_cv("Jane")).await.unwrap();
  s.delete_contact(cv.contact.id).await.unwrap();

  assert!(s.get_cv(cv.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_skill_detaches_it_from_cvs() {
  let s = store().await;

  let mut input = basic_cv("Jane");
  input.skills = vec![skill("Rust"), skill("SQL")];
  let cv = s.create_cv(input).await.unwrap();

  let doomed = cv.skills.iter().find(|sk| sk.name == "SQL").unwrap();
  s.delete_skill(doomed.id).await.unwrap();

  let after = s.get_cv(cv.id).await.unwrap().unwrap();
  let names: Vec<_> = after.skills.iter().map(|sk| sk.name.as_str()).collect();
  assert_eq!(names, ["Rust"]);
}

// ─── Request log ─────────────────────────────────────────────────────────────

fn log_entry(path: &str) -> NewRequestLog {
  NewRequestLog {
    method:       "GET".into(),
    path:         path.into(),
    query_string: String::new(),
    remote_ip:    Some("127.0.0.1".into()),
    user:         None,
  }
}

#[tokio::test]
async fn record_request_assigns_id_and_timestamp() {
  let s = store().await;

  let logged = s.record_request(log_entry("/cv/1")).await.unwrap();
  assert!(logged.id > 0);
  assert_eq!(logged.path, "/cv/1");
  assert_eq!(logged.remote_ip.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn recent_requests_newest_first_with_limit() {
  let s = store().await;

  s.record_request(log_entry("/first")).await.unwrap();
  s.record_request(log_entry("/second")).await.unwrap();
  s.record_request(log_entry("/third")).await.unwrap();

  let recent = s.recent_requests(2).await.unwrap();
  let paths: Vec<_> = recent.iter().map(|l| l.path.as_str()).collect();
  assert_eq!(paths, ["/third", "/second"]);
}
