//! Process exit codes consumed by enclosing automation (CI gates, hooks).

/// The plan is compliant: the violation list was obtained and is empty.
pub const COMPLIANT: i32 = 0;

/// Every other outcome: missing input, engine failure, unparseable
/// output, or violations found.
pub const BLOCKED: i32 = 1;
