/// Backend primary keys are 64-bit integers.
pub type DbId = i64;

/// Backend timestamps carry no zone information.
pub type Timestamp = chrono::NaiveDateTime;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
