//! Syntax kind constants for Java declaration nodes.
//!
//! Kinds are plain `u16` values stored inline in the thin `Node`, with a
//! reserved band per category so `kind` checks stay cheap comparisons.

pub const UNKNOWN: u16 = 0;

// Terminals
pub const IDENTIFIER: u16 = 1;
pub const MODIFIER: u16 = 2;

// Types
pub const TYPE_REFERENCE: u16 = 20;
pub const ARRAY_TYPE: u16 = 21;

// Declarations
pub const COMPILATION_UNIT: u16 = 40;
pub const CLASS_DECLARATION: u16 = 41;
pub const METHOD_DECLARATION: u16 = 42;
pub const CONSTRUCTOR_DECLARATION: u16 = 43;
pub const PARAMETER: u16 = 44;
pub const TYPE_PARAMETER: u16 = 45;

/// Whether this kind is a method-or-constructor declaration.
#[inline]
pub fn is_executable(kind: u16) -> bool {
    kind == METHOD_DECLARATION || kind == CONSTRUCTOR_DECLARATION
}

/// Debug name of a kind, for error messages.
pub fn name(kind: u16) -> &'static str {
    match kind {
        IDENTIFIER => "Identifier",
        MODIFIER => "Modifier",
        TYPE_REFERENCE => "TypeReference",
        ARRAY_TYPE => "ArrayType",
        COMPILATION_UNIT => "CompilationUnit",
        CLASS_DECLARATION => "ClassDeclaration",
        METHOD_DECLARATION => "MethodDeclaration",
        CONSTRUCTOR_DECLARATION => "ConstructorDeclaration",
        PARAMETER => "Parameter",
        TYPE_PARAMETER => "TypeParameter",
        _ => "Unknown",
    }
}
