//! SQL schema for the SQLite store.
//!
//! Applied on every open; `CREATE TABLE IF NOT EXISTS` makes that a no-op for
//! an existing database. `PRAGMA user_version` is set so later migrations
//! have something to gate on.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Shared entities. Each carries a natural key the reconciliation matches on.
CREATE TABLE IF NOT EXISTS skills (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    id           INTEGER PRIMARY KEY,
    type         TEXT NOT NULL,       -- free-form channel label
    contact_link TEXT NOT NULL,
    UNIQUE (type, contact_link)
);

CREATE TABLE IF NOT EXISTS curriculum_vitae (
    id          INTEGER PRIMARY KEY,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    bio         TEXT NOT NULL,
    contact_id  INTEGER NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL,        -- RFC 3339 UTC; store-assigned
    updated_at  TEXT NOT NULL
);

-- Link tables. The composite primary keys make re-linking idempotent.
CREATE TABLE IF NOT EXISTS cv_skills (
    cv_id    INTEGER NOT NULL REFERENCES curriculum_vitae(id) ON DELETE CASCADE,
    skill_id INTEGER NOT NULL REFERENCES skills(id)           ON DELETE CASCADE,
    PRIMARY KEY (cv_id, skill_id)
);

CREATE TABLE IF NOT EXISTS cv_projects (
    cv_id      INTEGER NOT NULL REFERENCES curriculum_vitae(id) ON DELETE CASCADE,
    project_id INTEGER NOT NULL REFERENCES projects(id)         ON DELETE CASCADE,
    PRIMARY KEY (cv_id, project_id)
);

-- Request logs are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS request_logs (
    id           INTEGER PRIMARY KEY,
    timestamp    TEXT NOT NULL,       -- RFC 3339 UTC; store-assigned
    method       TEXT NOT NULL,
    path         TEXT NOT NULL,
    query_string TEXT NOT NULL DEFAULT '',
    remote_ip    TEXT,
    user         TEXT
);

CREATE INDEX IF NOT EXISTS cv_contact_idx           ON curriculum_vitae(contact_id);
CREATE INDEX IF NOT EXISTS request_logs_time_idx    ON request_logs(timestamp);

PRAGMA user_version = 1;
";
