mod gracefullshutdown;
mod logs;
mod metrics;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{DenialLabels, Gate, GateMetrics, Labels, Outcome};
