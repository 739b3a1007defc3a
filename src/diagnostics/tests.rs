use super::*;
use crate::typechecker::Type;

#[test]
fn test_diagnostic_json() {
    let diag = Diagnostic::error("E1001", Phase::Type)
        .message("Type mismatch")
        .line(4)
        .build();

    let json = diag.to_json();
    assert!(json.contains("E1001"));
    assert!(json.contains("Type mismatch"));
    assert!(json.contains("\"line\":4"));
    assert!(json.contains("\"phase\":\"type\""));
    assert!(!json.contains("notes"));
}

#[test]
fn test_from_type_error() {
    let err = TypeError::TypeMismatch {
        expected: Type::Bool,
        found: Type::Int,
        line: 3,
    };
    let diag = Diagnostic::from(&err);
    assert_eq!(diag.code, types::TYPE_MISMATCH);
    assert_eq!(diag.phase, Phase::Type);
    assert_eq!(diag.line, 3);
    assert!(diag.is_error());
    assert_eq!(
        diag.message,
        "line 3: type mismatch: expected bool, found int"
    );
}

#[test]
fn test_from_eval_error_carries_help() {
    let err = EvalError::NonExhaustiveMatch { line: 9 };
    let diag = Diagnostic::from(&err);
    assert_eq!(diag.code, runtime::NON_EXHAUSTIVE_MATCH);
    assert_eq!(diag.phase, Phase::Runtime);
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_human_readable_quotes_line() {
    let source = "val x := 1;\nx + true;\n";
    let diag = Diagnostic::error("E1001", Phase::Type)
        .message("type mismatch")
        .line(2)
        .note("operands of `+` must agree")
        .build();

    let text = diag.to_human_readable(source);
    assert!(text.starts_with("error[E1001]: type mismatch"));
    assert!(text.contains("  2 | x + true;"));
    assert!(text.contains("= note: operands of `+` must agree"));
}

#[test]
fn test_human_readable_without_line() {
    let diag = Diagnostic::from(&EvalError::EmptyProgram);
    let text = diag.to_human_readable("");
    assert_eq!(text, "error[E4014]: program has no items\n  --> line 0\n");
}

#[test]
fn test_json_roundtrip() {
    let diag = Diagnostic::from(&EvalError::DivisionByZero { line: 1 });
    let parsed: Diagnostic = serde_json::from_str(&diag.to_json()).unwrap();
    assert_eq!(parsed, diag);
}
