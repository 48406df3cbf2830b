pub mod safe_log;
pub mod scenario;
