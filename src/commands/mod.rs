//! Command implementations

pub mod exec;
pub mod logs;
pub mod pods;
pub mod shell;
pub mod target;

pub use exec::run_exec;
pub use logs::run_logs;
pub use pods::list_pods;
pub use shell::run_shell;
pub use target::{resolve_target, run_target, Target};
