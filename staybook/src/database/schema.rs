//! Database schema definitions and SQL constants.
//!
//! The two collections are stored as tables keyed by their document key.
//! Set-valued fields live in child tables whose primary key makes a second
//! insert of an equal value a no-op, which is how set-union updates are
//! expressed (`INSERT OR IGNORE`).

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the `users` collection.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        email TEXT PRIMARY KEY NOT NULL,
        display_name TEXT,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservation set of each user.
///
/// `document` holds the canonical JSON of the record; the UNIQUE
/// constraint on `(email, document)` suppresses structurally equal
/// records. `id` preserves insertion order.
pub const CREATE_USER_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS user_reservations (
        id INTEGER PRIMARY KEY,
        email TEXT NOT NULL REFERENCES users(email) ON DELETE CASCADE,
        document TEXT NOT NULL,
        UNIQUE (email, document)
    )";

/// SQL statement to create the `listings` collection.
pub const CREATE_LISTINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS listings (
        name TEXT PRIMARY KEY NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reserved-date set of each listing.
pub const CREATE_LISTING_DATES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS listing_reserved_dates (
        listing TEXT NOT NULL REFERENCES listings(name) ON DELETE CASCADE,
        date TEXT NOT NULL,
        PRIMARY KEY (listing, date)
    )";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
