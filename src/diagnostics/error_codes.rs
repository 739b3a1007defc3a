//! Error code definitions

/// Type errors (E1xxx)
pub mod types {
    pub const TYPE_MISMATCH: &str = "E1001";
    pub const UNKNOWN_IDENTIFIER: &str = "E1002";
    pub const BRANCH_MISMATCH: &str = "E1003";
    pub const EMPTY_MATCH: &str = "E1004";
    pub const HETEROGENEOUS_TUPLE: &str = "E1005";
    pub const HETEROGENEOUS_LIST: &str = "E1006";
    pub const WRONG_ARITY: &str = "E1007";
    pub const EXPECTED_TUPLE: &str = "E1008";
    pub const RECURSIVE_TYPE: &str = "E1009";
    pub const INDEX_OUT_OF_BOUNDS: &str = "E1010";
    pub const TUPLE_TOO_SHORT: &str = "E1011";
    pub const EMPTY_PROGRAM: &str = "E1012";
}

/// Runtime errors (E4xxx)
pub mod runtime {
    pub const UNDEFINED_VARIABLE: &str = "E4001";
    pub const TYPE_MISMATCH: &str = "E4002";
    pub const DIVISION_BY_ZERO: &str = "E4003";
    pub const NOT_CALLABLE: &str = "E4004";
    pub const NOT_A_BOOLEAN: &str = "E4005";
    pub const NOT_A_BINARY_FUNCTION: &str = "E4006";
    pub const NON_EXHAUSTIVE_MATCH: &str = "E4007";
    pub const RANGE_ERROR: &str = "E4008";
    pub const INDEX_OUT_OF_BOUNDS: &str = "E4009";
    pub const WRONG_ARITY: &str = "E4010";
    pub const EMPTY_LIST: &str = "E4011";
    pub const TUPLE_TOO_SHORT: &str = "E4012";
    pub const STACK_OVERFLOW: &str = "E4013";
    pub const EMPTY_PROGRAM: &str = "E4014";
}
