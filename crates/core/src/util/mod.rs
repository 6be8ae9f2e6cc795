pub mod range;
pub mod unit;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs the elapsed time at the given level (default `Debug`),
/// and evaluates to the value of the expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}
