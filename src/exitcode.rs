//! Process exit codes

/// Normal completion, whatever HTTP status the service returned
pub const OK: i32 = 0;

/// None of --create, --delete, --createversion was given
pub const NO_ACTION: i32 = 1;

/// --visibility named none of public, user, organization
pub const INVALID_VISIBILITY: i32 = 255;
