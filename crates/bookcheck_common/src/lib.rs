// --- File: crates/bookcheck_common/src/lib.rs ---

pub mod error;     // Error handling
pub mod format;    // Request template substitution
pub mod headers;   // Header construction
pub mod http;      // HTTP utilities
pub mod logging;   // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    BookcheckError,
    config_error,
    internal_error,
};

pub use format::{format_template, FormatError};
pub use headers::{auth_headers, to_header_map};

// Re-export HTTP utilities for easier access
pub use http::{
    reason_phrase,
    client::{
        create_client,
        client_for,
    },
};

// Re-export logging utilities for easier access
pub use logging::{
    init,
    init_with_level,
    log_result,
};
