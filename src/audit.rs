use rusqlite::{Connection, params};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub actor: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub details: Value,
    pub created_at: String,
}

/// Append an audit entry. Callers ignore the result — an audit failure must
/// never fail the mutation it records.
pub fn log(
    conn: &Connection,
    actor: &str,
    action: &str,
    target_type: &str,
    target_id: &str,
    details: Value,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO audit_entries (actor, action, target_type, target_id, details) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![actor, action, target_type, target_id, details.to_string()],
    )?;
    Ok(())
}

/// Most recent entries, newest first.
pub fn find_recent(conn: &Connection, limit: i64) -> rusqlite::Result<Vec<AuditEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, actor, action, target_type, target_id, details, created_at \
         FROM audit_entries ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        let details_raw: String = row.get("details")?;
        Ok(AuditEntry {
            id: row.get("id")?,
            actor: row.get("actor")?,
            action: row.get("action")?,
            target_type: row.get("target_type")?,
            target_id: row.get("target_id")?,
            details: serde_json::from_str(&details_raw).unwrap_or(Value::Null),
            created_at: row.get("created_at")?,
        })
    })?;
    rows.collect()
}
