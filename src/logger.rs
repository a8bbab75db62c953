//! Colored, timestamped console logging shared by the tracker, the status table and the scenario.
//!
//! `event!` carries the debug-only diagnostics and stays silent unless `LOG_FLIGHT_EVENTS` is set.

/// Environment variable enabling `event!` output.
pub const EVENT_LOG_VAR: &str = "LOG_FLIGHT_EVENTS";

#[doc(hidden)]
#[macro_export]
macro_rules! log_line {
    ($color:literal, $tag:literal, $($arg:tt)*) => {
        println!(
            concat!("\x1b[", $color, "m", $tag, "[{}]\x1b[0m {}"),
            chrono::Utc::now().format("%H:%M:%S"),
            format!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log_line!("32", "[INFO] ", $($arg)*) };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => { $crate::log_line!("33", "[LOG]  ", $($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log_line!("35", "[WARN] ", $($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log_line!("31", "[ERROR]", $($arg)*) };
}

#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if std::env::var($crate::logger::EVENT_LOG_VAR).is_ok() {
            $crate::log_line!("36", "[EVENT]", $($arg)*)
        }
    };
}
