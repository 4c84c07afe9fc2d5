//! Error codes and exit status for cardioctl

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors (bad input file, rejected patient data)
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the service returns a body we cannot parse
pub const EXIT_INVALID_RESPONSE: i32 = 65;

/// Exit code when the service is unreachable or has no model loaded
pub const EXIT_SERVICE_UNAVAILABLE: i32 = 70;
