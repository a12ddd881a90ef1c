//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
        tracing::info!(version = SCHEMA_VERSION, "Created SQLite schema");
    } else if current_version > SCHEMA_VERSION {
        return Err(schema_error(format!(
            "database schema version {current_version} is newer than supported version {SCHEMA_VERSION}"
        )));
    }

    Ok(())
}

fn schema_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| schema_error(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| schema_error(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| schema_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS owners (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0),
            email TEXT,
            phone TEXT,
            address TEXT,
            national_id TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS listings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            reference TEXT,
            address TEXT NOT NULL CHECK (length(trim(address)) > 0),
            city TEXT NOT NULL CHECK (length(trim(city)) > 0),
            province TEXT NOT NULL CHECK (length(trim(province)) > 0),
            postal_code TEXT,
            description TEXT,
            property_type TEXT NOT NULL DEFAULT 'flat' CHECK (property_type IN
                ('flat', 'chalet', 'townhouse', 'studio', 'penthouse', 'commercial-unit')),
            operation_type TEXT NOT NULL CHECK (operation_type IN
                ('sale', 'rental', 'sale-or-rental')),
            status TEXT NOT NULL DEFAULT 'available' CHECK (status IN
                ('available', 'reserved', 'sold', 'rented')),
            price REAL NOT NULL CHECK (price >= 0),
            currency TEXT NOT NULL DEFAULT 'EUR',
            bedrooms INTEGER NOT NULL DEFAULT 0 CHECK (bedrooms >= 0),
            bathrooms INTEGER NOT NULL DEFAULT 0 CHECK (bathrooms >= 0),
            area_sqm INTEGER CHECK (area_sqm IS NULL OR area_sqm > 0),
            year_built INTEGER,
            floor INTEGER,
            heating TEXT,
            latitude REAL,
            longitude REAL,
            pool INTEGER NOT NULL DEFAULT 0,
            garage INTEGER NOT NULL DEFAULT 0,
            storage_room INTEGER NOT NULL DEFAULT 0,
            terrace INTEGER NOT NULL DEFAULT 0,
            elevator INTEGER NOT NULL DEFAULT 0,
            owner_id INTEGER REFERENCES owners(id) ON DELETE RESTRICT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_listings_city ON listings(city);
        CREATE INDEX IF NOT EXISTS idx_listings_province ON listings(province);
        CREATE INDEX IF NOT EXISTS idx_listings_price ON listings(price);
        CREATE INDEX IF NOT EXISTS idx_listings_created ON listings(created_at, id);
        CREATE INDEX IF NOT EXISTS idx_listings_owner ON listings(owner_id);
        CREATE INDEX IF NOT EXISTS idx_owners_name ON owners(name);",
    )
    .map_err(|e| schema_error(format!("Failed to create tables: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_check_constraints_reject_negative_price() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO listings (address, city, province, operation_type, price, created_at, updated_at)
             VALUES ('a', 'b', 'c', 'sale', -1, 'x', 'x')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_check_constraints_reject_unknown_enum() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO listings (address, city, province, operation_type, price, created_at, updated_at)
             VALUES ('a', 'b', 'c', 'lease', 1, 'x', 'x')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_newer_schema_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        set_schema_version(&conn, SCHEMA_VERSION + 1).unwrap();
        assert!(initialize_schema(&conn).is_err());
    }
}
