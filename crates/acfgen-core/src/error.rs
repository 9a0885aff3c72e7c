use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Classification conflicts are not here: they are recovered with a
/// last-write-wins policy and surface only as log warnings.
#[derive(Debug, Error)]
pub enum Error {
    #[error("OBJ parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("template syntax error: {message}")]
    TemplateSyntax { message: String },

    #[error("body '{name}' has {found} station(s); at least two are required")]
    InsufficientGeometry { name: String, found: usize },

    #[error("template slot '{slot}' has no computed value and no default")]
    MissingRequiredSlot { slot: String },

    #[error("placeholder '{name}' left unresolved after assembly")]
    UnresolvedPlaceholder { name: String },
}
