use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_client_error!(WriteError, "Error writing file.");
define_internal_error!(
    StorageWriteFailed,
    "Failed to persist document '{key}'.",
    { key: &str }
);

// Parsing-related.
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoDate, "Invalid ISO date: {date}.", { date: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });
define_client_error!(
    InvalidDateRange,
    "Invalid date range: start ({start}) is after end ({end}).",
    { start: &str, end: &str }
);

// Ledger-related.
define_client_error!(
    CollectionFloorReached,
    "Cannot delete from '{collection}': at least {floor} entry must remain.",
    { collection: &str, floor: usize }
);
define_client_error!(
    SnapshotMalformed,
    "Snapshot document is malformed and was not imported."
);
define_internal_error!(
    DocumentSerializeFailed,
    "Failed to serialize '{document}'.",
    { document: &str }
);

// Cloud-related.
define_client_error!(
    CloudNotConfigured,
    "Cloud sync requires an access token."
);
define_client_error!(
    CloudPushFailed,
    "Cloud push failed (status {status}). The access token may be invalid.",
    { status: u16 }
);
define_client_error!(
    CloudPullFailed,
    "Cloud pull failed (status {status}).",
    { status: u16 }
);
define_client_error!(
    SyncAlreadyInProgress,
    "A cloud sync is already running."
);
define_client_error!(CloudRequestFailed, "Cloud request could not be completed.");
define_internal_error!(CloudResponseMalformed, "Cloud response body could not be parsed.");
define_client_error!(
    RemoteFileMissing,
    "Remote document does not contain '{file}'.",
    { file: &str }
);
