/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Parse a path identifier into a [`DbId`].
///
/// Surrounding whitespace is not accepted; the raw segment must be a plain
/// base-10 integer.
pub fn parse_db_id(raw: &str) -> Option<DbId> {
    raw.parse::<DbId>().ok()
}
