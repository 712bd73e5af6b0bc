//! Packed node flags (fit in the thin node's `u16` flags field).

/// Parameter is a trailing varargs parameter (`String... args`).
pub const VARARGS: u16 = 1 << 0;
/// Declaration carries `static`.
pub const STATIC: u16 = 1 << 1;
/// Declaration carries `abstract`.
pub const ABSTRACT: u16 = 1 << 2;
/// Declaration carries `final`.
pub const FINAL: u16 = 1 << 3;
