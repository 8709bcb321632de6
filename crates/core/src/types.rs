/// Server-assigned job identifiers are opaque strings.
///
/// The backend hands them out on submission; the client never inspects
/// or synthesizes them (mock sources aside).
pub type JobId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
