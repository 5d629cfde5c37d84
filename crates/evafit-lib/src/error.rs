use thiserror::Error;

/// Convenient result alias for the EVA Fit library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a required numeric attribute is absent for an item being
    /// resolved. Never defaulted: a wrong combat number is worse than a
    /// visible failure.
    #[error("required attribute '{attribute}' missing for '{item}'")]
    MissingAttribute { item: String, attribute: String },

    /// Raised when a type name could not be found in the catalog.
    #[error("unknown type name: {name}{}", format_suggestions(.suggestions))]
    UnknownType {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a type identifier could not be found in the catalog.
    #[error("unknown type id: {id}")]
    UnknownTypeId { id: i64 },

    /// Raised for inputs that would otherwise propagate NaN/Infinity through
    /// the pipeline (non-positive cycle time, recharge time, or signature
    /// radius).
    #[error("degenerate input: {message}")]
    DegenerateInput { message: String },

    /// Raised when attempting to load a static data export with an
    /// unrecognized table layout.
    #[error("unsupported static data schema; expected Types/TypeAttributes or invTypes/dgmTypeAttributes tables")]
    UnsupportedSchema,

    /// Raised when an item fitted as a module is not a module (e.g. a charge
    /// or a hull placed in a module slot).
    #[error("type '{name}' cannot be fitted as a module")]
    NotAModule { name: String },

    /// Raised when weapon resolution is requested for a non-weapon type.
    #[error("type '{name}' is not a weapon")]
    NotAWeapon { name: String },

    /// Raised when the ship slot of a fitting names a non-hull type.
    #[error("type '{name}' is not a hull")]
    NotAHull { name: String },

    /// Raised when a loaded charge names a non-charge type.
    #[error("type '{name}' is not a charge")]
    NotACharge { name: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
