//! Cache store database schema.

/// SQL to create the description location cache table.
pub const CREATE_LOCATIONS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS error_description_locations (
    error_code  TEXT PRIMARY KEY,
    location    JSONB NOT NULL,
    stored_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";
