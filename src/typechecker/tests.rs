use super::*;
use crate::ast::{MatchCase, Pattern};

fn type_of(expr: Expr) -> Result<Type, TypeError> {
    infer_type(&expr, &TypeEnv::new())
}

/// Infer and render the type the way a driver prints it
fn type_str(expr: Expr) -> String {
    type_of(expr).unwrap().to_string()
}

fn int(n: i64) -> Expr {
    Expr::int(n)
}

fn var(name: &str) -> Expr {
    Expr::var(name)
}

fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::binary(op, left, right)
}

fn ints(values: &[i64]) -> Expr {
    Expr::list(values.iter().map(|n| Expr::int(*n)).collect())
}

fn func(params: &[&str], body: Expr) -> Expr {
    Expr::curried(params, body)
}

fn call(func: Expr, arg: Expr) -> Expr {
    Expr::apply(func, arg)
}

// ---- rendering ----

#[test]
fn test_type_display() {
    assert_eq!(Type::list(Type::Int).to_string(), "[ int ]");
    assert_eq!(
        Type::Tuple(vec![Type::Int, Type::Bool, Type::Str]).to_string(),
        "[int, bool, string]"
    );
    assert_eq!(
        Type::function(Type::Int, Type::function(Type::Int, Type::Int)).to_string(),
        "int -> int -> int"
    );
    assert_eq!(
        Type::function(Type::function(Type::Int, Type::Int), Type::Int).to_string(),
        "(int -> int) -> int"
    );
}

#[test]
fn test_type_variables_renamed_in_order() {
    let ty = Type::function(
        Type::Var(TypeVarId(7)),
        Type::function(Type::Var(TypeVarId(3)), Type::Var(TypeVarId(7))),
    );
    assert_eq!(ty.to_string(), "'a -> 'b -> 'a");
}

// ---- literals and operators ----

#[test]
fn test_literals() {
    assert_eq!(type_str(int(1)), "int");
    assert_eq!(type_str(Expr::real(1.0)), "real");
    assert_eq!(type_str(Expr::boolean(true)), "bool");
    assert_eq!(type_str(Expr::string("s")), "string");
}

#[test]
fn test_arithmetic() {
    assert_eq!(type_str(bin(BinaryOp::Add, int(3), int(4))), "int");
    assert_eq!(
        type_str(bin(BinaryOp::Mul, Expr::real(2.5), Expr::real(4.0))),
        "real"
    );
    assert_eq!(type_str(bin(BinaryOp::Mod, int(7), int(3))), "int");
}

#[test]
fn test_mixed_arithmetic_rejected() {
    let err = type_of(bin(BinaryOp::Add, int(3), Expr::real(4.0)).at(1)).unwrap_err();
    assert_eq!(
        err,
        TypeError::TypeMismatch {
            expected: Type::Int,
            found: Type::Real,
            line: 1
        }
    );
}

#[test]
fn test_operator_classes() {
    let err = type_of(bin(BinaryOp::Add, Expr::boolean(true), Expr::boolean(false))).unwrap_err();
    assert!(matches!(err, TypeError::InvalidOperand { op: "+", .. }));

    let err = type_of(bin(BinaryOp::Mod, Expr::real(3.0), Expr::real(2.0))).unwrap_err();
    assert!(matches!(err, TypeError::InvalidOperand { op: "mod", .. }));

    let err = type_of(bin(BinaryOp::Concat, int(1), int(2))).unwrap_err();
    assert!(matches!(err, TypeError::InvalidOperand { op: "++", .. }));

    assert_eq!(
        type_str(bin(BinaryOp::Lt, Expr::string("a"), Expr::string("b"))),
        "bool"
    );
}

#[test]
fn test_concat() {
    assert_eq!(type_str(bin(BinaryOp::Concat, ints(&[1, 2]), ints(&[3]))), "[ int ]");
    assert_eq!(type_str(bin(BinaryOp::Concat, ints(&[]), ints(&[5]))), "[ int ]");
    assert_eq!(
        type_str(bin(BinaryOp::Concat, Expr::string("a"), Expr::string("b"))),
        "string"
    );
}

#[test]
fn test_unsolved_numeric_defaults_to_int() {
    assert_eq!(
        type_str(func(&["x"], bin(BinaryOp::Add, var("x"), var("x")))),
        "int -> int"
    );
}

#[test]
fn test_deferred_constraint_checked_when_solved() {
    // (fn x -> x + x)(true)
    let expr = call(func(&["x"], bin(BinaryOp::Add, var("x"), var("x"))), Expr::boolean(true));
    let err = type_of(expr).unwrap_err();
    assert!(matches!(
        err,
        TypeError::InvalidOperand {
            op: "+",
            found: Type::Bool,
            ..
        }
    ));
}

#[test]
fn test_concat_on_variables_stays_polymorphic() {
    assert_eq!(
        type_str(func(&["a", "b"], bin(BinaryOp::Concat, var("a"), var("b")))),
        "'a -> 'a -> 'a"
    );
}

#[test]
fn test_equality_rejects_functions() {
    // (fn x -> x) = (fn y -> y)
    let expr = bin(BinaryOp::Eq, func(&["x"], var("x")), func(&["y"], var("y"))).at(3);
    let err = type_of(expr).unwrap_err();
    assert!(matches!(err, TypeError::InvalidOperand { op: "=", line: 3, .. }));

    // [fn x -> x] != []
    let expr = bin(
        BinaryOp::Ne,
        Expr::list(vec![func(&["x"], var("x"))]),
        Expr::list(Vec::new()),
    );
    assert!(matches!(
        type_of(expr).unwrap_err(),
        TypeError::InvalidOperand { op: "!=", .. }
    ));

    // (1, fn x -> x) = (1, fn y -> y)
    let pair = |param: &str| Expr::tuple(vec![int(1), func(&[param], var(param))]);
    assert!(matches!(
        type_of(bin(BinaryOp::Eq, pair("x"), pair("y"))).unwrap_err(),
        TypeError::InvalidOperand { .. }
    ));
}

#[test]
fn test_equality_on_data() {
    assert_eq!(type_str(bin(BinaryOp::Eq, ints(&[1]), ints(&[2]))), "bool");
    let pair = || Expr::tuple(vec![int(1), Expr::string("a")]);
    assert_eq!(type_str(bin(BinaryOp::Ne, pair(), pair())), "bool");
    assert_eq!(
        type_str(func(&["a", "b"], bin(BinaryOp::Eq, var("a"), var("b")))),
        "'a -> 'a -> bool"
    );
}

#[test]
fn test_deferred_equality_rejects_functions_once_solved() {
    // let eq := fn a -> fn b -> a = b in eq(fn x -> x)(fn y -> y)
    let expr = Expr::let_in(
        "eq",
        func(&["a", "b"], bin(BinaryOp::Eq, var("a"), var("b"))),
        call(
            call(var("eq"), func(&["x"], var("x"))),
            func(&["y"], var("y")),
        ),
    );
    let err = type_of(expr).unwrap_err();
    match err {
        TypeError::InvalidOperand { op, found, .. } => {
            assert_eq!(op, "=");
            assert!(matches!(found, Type::Function(..)));
        }
        other => panic!("expected InvalidOperand, got {:?}", other),
    }
}

// ---- control flow, functions, binding ----

#[test]
fn test_if_condition_must_be_bool() {
    let expr = Expr::if_then_else(int(1).at(2), int(2), int(3));
    assert_eq!(
        type_of(expr).unwrap_err(),
        TypeError::TypeMismatch {
            expected: Type::Bool,
            found: Type::Int,
            line: 2
        }
    );
}

#[test]
fn test_if_branches_must_agree() {
    let expr = Expr::if_then_else(Expr::boolean(true), int(1), Expr::string("no")).at(4);
    assert_eq!(
        type_of(expr).unwrap_err(),
        TypeError::BranchTypeMismatch {
            expected: Type::Int,
            found: Type::Str,
            line: 4
        }
    );
}

#[test]
fn test_lambda_and_application() {
    assert_eq!(type_str(func(&["x"], var("x"))), "'a -> 'a");
    assert_eq!(
        type_str(func(&["x"], bin(BinaryOp::Add, var("x"), int(1)))),
        "int -> int"
    );
    assert_eq!(type_str(call(func(&["x"], var("x")), Expr::string("s"))), "string");
    assert_eq!(
        type_str(func(&["f", "x"], call(var("f"), call(var("f"), var("x"))))),
        "('a -> 'a) -> 'a -> 'a"
    );
}

#[test]
fn test_applying_non_function() {
    let err = type_of(call(int(3), int(4))).unwrap_err();
    assert!(matches!(err, TypeError::TypeMismatch { found: Type::Int, .. }));
}

#[test]
fn test_undefined_name() {
    assert_eq!(
        type_of(var("y").at(3)).unwrap_err(),
        TypeError::UndefinedName {
            name: "y".to_string(),
            line: 3
        }
    );
}

#[test]
fn test_environment_lookup() {
    let env = TypeEnv::new().extend_mono("n", Type::Real);
    assert_eq!(infer_type(&var("n"), &env).unwrap(), Type::Real);
}

#[test]
fn test_caller_environment_variables_are_not_reused() {
    // f : 'a -> int, with 'a free in the caller's environment
    let env = TypeEnv::new().extend_mono(
        "f",
        Type::function(Type::Var(TypeVarId(0)), Type::Int),
    );
    let expr = call(var("f"), call(func(&["x"], var("x")), Expr::boolean(true)));
    assert_eq!(infer_type(&expr, &env).unwrap(), Type::Int);
}

#[test]
fn test_quantified_environment_variables_are_not_reused() {
    // id : forall 'e. 'e -> 'e
    let quantified = TypeVarId(4);
    let env = TypeEnv::new().extend(
        "id",
        TypeScheme {
            vars: vec![quantified],
            ty: Type::function(Type::Var(quantified), Type::Var(quantified)),
        },
    );

    let mut inferencer = Inferencer::new();
    inferencer.reserve(&env);
    assert_eq!(inferencer.fresh(), Type::Var(TypeVarId(5)));

    // let g := fn x -> id(x) in (g(1), g(true))
    let expr = Expr::let_in(
        "g",
        func(&["x"], call(var("id"), var("x"))),
        Expr::tuple(vec![
            call(var("g"), int(1)),
            call(var("g"), Expr::boolean(true)),
        ]),
    );
    assert_eq!(infer_type(&expr, &env).unwrap().to_string(), "[int, bool]");
}

#[test]
fn test_occurs_check() {
    // fn x -> x(x)
    let err = type_of(func(&["x"], call(var("x"), var("x")))).unwrap_err();
    assert!(matches!(err, TypeError::InfiniteType { .. }));
}

#[test]
fn test_let_polymorphism() {
    // let id := fn x -> x in (id(1), id(true))
    let expr = Expr::let_in(
        "id",
        func(&["x"], var("x")),
        Expr::tuple(vec![
            call(var("id"), int(1)),
            call(var("id"), Expr::boolean(true)),
        ]),
    );
    assert_eq!(type_str(expr), "[int, bool]");
}

#[test]
fn test_lambda_parameters_are_monomorphic() {
    // fn id -> (id(1), id(true))
    let expr = func(
        &["id"],
        Expr::tuple(vec![
            call(var("id"), int(1)),
            call(var("id"), Expr::boolean(true)),
        ]),
    );
    assert!(matches!(
        type_of(expr).unwrap_err(),
        TypeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_constrained_let_is_not_generalized() {
    // let double := fn x -> x + x in double(1.5)
    let expr = Expr::let_in(
        "double",
        func(&["x"], bin(BinaryOp::Add, var("x"), var("x"))),
        call(var("double"), Expr::real(1.5)),
    );
    assert_eq!(type_str(expr), "real");
}

// ---- match ----

fn match_on(scrutinee: Expr, cases: Vec<(Pattern, Expr)>) -> Expr {
    Expr::match_on(
        scrutinee,
        cases
            .into_iter()
            .map(|(pattern, body)| MatchCase::new(pattern, body))
            .collect(),
    )
}

#[test]
fn test_match_types() {
    let expr = match_on(int(5), vec![(Pattern::int(5), int(1)), (Pattern::Wildcard, int(2))]);
    assert_eq!(type_str(expr), "int");

    let expr = match_on(
        int(7),
        vec![(Pattern::var("x"), bin(BinaryOp::Add, var("x"), int(1)))],
    );
    assert_eq!(type_str(expr), "int");
}

#[test]
fn test_empty_match() {
    let expr = Expr::match_on(int(1), Vec::new()).at(5);
    assert_eq!(type_of(expr).unwrap_err(), TypeError::EmptyMatch { line: 5 });
}

#[test]
fn test_match_pattern_must_fit_scrutinee() {
    let expr = match_on(int(1), vec![(Pattern::string("a"), int(1))]);
    assert!(matches!(
        type_of(expr).unwrap_err(),
        TypeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_match_bodies_must_agree() {
    let expr = match_on(
        int(1),
        vec![(Pattern::int(1), int(1)), (Pattern::Wildcard, Expr::string("x"))],
    );
    assert!(matches!(
        type_of(expr).unwrap_err(),
        TypeError::BranchTypeMismatch { .. }
    ));
}

#[test]
fn test_match_bindings_scoped_to_case() {
    let expr = match_on(
        int(1),
        vec![(Pattern::var("x"), var("x")), (Pattern::Wildcard, var("x"))],
    );
    assert!(matches!(
        type_of(expr).unwrap_err(),
        TypeError::UndefinedName { .. }
    ));
}

// ---- lists ----

#[test]
fn test_list_types() {
    assert_eq!(type_str(ints(&[1, 2])), "[ int ]");
    assert_eq!(type_str(ints(&[])), "[ 'a ]");
    assert_eq!(
        type_str(Expr::list(vec![
            Expr::tuple(vec![int(1), int(2)]),
            Expr::tuple(vec![int(3), int(4)]),
        ])),
        "[ [int, int] ]"
    );
}

#[test]
fn test_heterogeneous_list() {
    let expr = Expr::list(vec![int(1), Expr::string("a").at(2)]);
    assert_eq!(
        type_of(expr).unwrap_err(),
        TypeError::HeterogeneousList {
            expected: Type::Int,
            found: Type::Str,
            line: 2
        }
    );
}

#[test]
fn test_list_builtins() {
    assert_eq!(type_str(Expr::head(ints(&[1]))), "int");
    assert_eq!(type_str(Expr::tail(ints(&[1]))), "[ int ]");
    assert_eq!(type_str(Expr::len(ints(&[1]))), "int");
    assert_eq!(type_str(Expr::is_empty(ints(&[]))), "bool");
    assert!(type_of(Expr::head(int(1))).is_err());
}

#[test]
fn test_map_type() {
    let to_str = func(&["x"], Expr::string("s"));
    assert_eq!(type_str(Expr::map(to_str, ints(&[1]))), "[ string ]");
    assert_eq!(
        type_str(func(&["f", "xs"], Expr::map(var("f"), var("xs")))),
        "('a -> 'b) -> [ 'a ] -> [ 'b ]"
    );
}

#[test]
fn test_fold_types() {
    let plus = || func(&["a", "b"], bin(BinaryOp::Add, var("a"), var("b")));
    assert_eq!(type_str(Expr::foldl(plus(), int(0), ints(&[1, 2, 3]))), "int");
    assert_eq!(type_str(Expr::foldr(plus(), int(0), ints(&[1, 2, 3]))), "int");

    // foldl: acc -> elem -> acc; foldr: elem -> acc -> acc
    let len_acc = func(&["acc", "s"], bin(BinaryOp::Add, var("acc"), Expr::strlen(var("s"))));
    let strings = Expr::list(vec![Expr::string("ab")]);
    assert_eq!(type_str(Expr::foldl(len_acc.clone(), int(0), strings.clone())), "int");
    assert!(type_of(Expr::foldr(len_acc, int(0), strings)).is_err());
}

// ---- strings ----

#[test]
fn test_string_builtins() {
    assert_eq!(type_str(Expr::strlen(Expr::string("hello"))), "int");
    assert_eq!(
        type_str(Expr::strcat(Expr::string("a"), Expr::string("b"))),
        "string"
    );
    assert_eq!(
        type_str(Expr::substr(Expr::string("hello"), int(1), int(3))),
        "string"
    );
    assert_eq!(type_str(Expr::explode(Expr::string(""))), "[ string ]");
    assert!(type_of(Expr::strlen(int(1))).is_err());
}

// ---- tuples ----

#[test]
fn test_tuple_types() {
    let mixed = || Expr::tuple(vec![int(1), Expr::boolean(true), Expr::string("hi")]);
    assert_eq!(type_str(mixed()), "[int, bool, string]");
    assert_eq!(type_str(Expr::proj(2, mixed())), "string");
    assert_eq!(
        type_str(Expr::swap(Expr::tuple(vec![Expr::string("a"), int(7)]))),
        "[int, string]"
    );
    assert_eq!(
        type_str(Expr::destruct(Expr::tuple(vec![int(1), int(2), int(3)]))),
        "[ int ]"
    );
}

#[test]
fn test_tuple_arity() {
    assert!(matches!(
        type_of(Expr::tuple(vec![int(1)])).unwrap_err(),
        TypeError::TupleArity { found: 1, .. }
    ));
}

#[test]
fn test_proj_out_of_bounds() {
    let expr = Expr::proj(3, Expr::tuple(vec![int(1), int(2)])).at(6);
    assert_eq!(
        type_of(expr).unwrap_err(),
        TypeError::IndexOutOfBounds {
            index: 3,
            arity: 2,
            line: 6
        }
    );
}

#[test]
fn test_proj_needs_known_tuple() {
    let expr = func(&["t"], Expr::proj(0, var("t")));
    assert!(matches!(
        type_of(expr).unwrap_err(),
        TypeError::ExpectedTuple { .. }
    ));
}

#[test]
fn test_swap_arity() {
    let expr = Expr::swap(Expr::tuple(vec![int(1), int(2), int(3)]));
    assert!(matches!(
        type_of(expr).unwrap_err(),
        TypeError::ArityError {
            expected: 2,
            found: 3,
            ..
        }
    ));
}

#[test]
fn test_swap_infers_pair_for_unknown() {
    assert_eq!(type_str(func(&["t"], Expr::swap(var("t")))), "['a, 'b] -> ['b, 'a]");
}

#[test]
fn test_destruct_mixed_tuple() {
    let expr = Expr::destruct(Expr::tuple(vec![int(1), Expr::boolean(true)]));
    assert_eq!(
        type_of(expr).unwrap_err(),
        TypeError::HeterogeneousTuple {
            found: Type::Tuple(vec![Type::Int, Type::Bool]),
            line: 0
        }
    );
}

// ---- sugar ----

#[test]
fn test_sugar_types() {
    let f = func(&["x"], bin(BinaryOp::Add, var("x"), int(1)));
    let g = func(&["x"], bin(BinaryOp::Mul, var("x"), int(2)));
    assert_eq!(type_str(Expr::compose(f.clone(), g.clone())), "int -> int");
    assert_eq!(type_str(Expr::pipe(int(5), f)), "int");

    let gt3 = func(&["x"], bin(BinaryOp::Gt, var("x"), int(3)));
    assert_eq!(type_str(Expr::filter(gt3, ints(&[1, 5]))), "[ int ]");
}

#[test]
fn test_filter_predicate_must_return_bool() {
    let pred = func(&["x"], int(1));
    assert!(type_of(Expr::filter(pred, ints(&[1]))).is_err());
}

#[test]
fn test_compose_polymorphic() {
    assert_eq!(
        type_str(func(&["f", "g"], Expr::compose(var("f"), var("g")))),
        "('a -> 'b) -> ('c -> 'a) -> 'c -> 'b"
    );
}

// ---- programs ----

#[test]
fn test_program_val_generalized() {
    // val id := fn x -> x; (id(1), id(true));
    let program = Program::new(vec![
        Item::val("id", func(&["x"], var("x"))),
        Expr::tuple(vec![
            call(var("id"), int(1)),
            call(var("id"), Expr::boolean(true)),
        ])
        .into(),
    ]);
    assert_eq!(infer_program(&program).unwrap().to_string(), "[int, bool]");
}

#[test]
fn test_program_trailing_val() {
    let program = Program::new(vec![Item::val("x", Expr::string("s"))]);
    assert_eq!(infer_program(&program).unwrap(), Type::Str);
}

#[test]
fn test_empty_program() {
    assert_eq!(
        infer_program(&Program::default()).unwrap_err(),
        TypeError::EmptyProgram
    );
}
