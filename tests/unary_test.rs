use graph_eval::{Real, assert_approx_eq, constants, evaluate};

#[test]
fn test_unary_expression_evaluation() {
    let test_cases = [
        // Simple unary
        ("-1", -1.0),
        ("+1", 1.0),
        ("--1", 1.0),
        ("+-1", -1.0),
        ("-+1", -1.0),
        // Chained unary operators
        ("-+-1", 1.0),
        ("---1", -1.0),
        ("+++1", 1.0),
        ("-+-+-1", -1.0),
        // Functions with unary
        ("-sin(1)", -0.8414709848078965),
        ("sin(-1)", -0.8414709848078965),
        ("-sin(-cos(1))", 0.5143952585235492),
        // Unary with power
        ("-2^2", -4.0),
        ("(-2)^2", 4.0),
        ("2^-1", 0.5),
        ("-x^2", -9.0),
        ("x * -x", -9.0),
        ("sin -x", -(3.0 as Real).sin()),
    ];

    for &(expr, expected) in &test_cases {
        let result = evaluate(expr, 3.0).unwrap();
        assert_approx_eq!(
            result,
            expected as Real,
            constants::TEST_PRECISION,
            "Expression '{}' evaluated to {}, expected {}",
            expr,
            result,
            expected
        );
    }
}

#[test]
fn test_unary_minus_is_not_subtraction_after_operator() {
    assert_eq!(evaluate("x - -1", 2.0).unwrap(), 3.0);
    assert_eq!(evaluate("x--1", 2.0).unwrap(), 3.0);
    assert_eq!(evaluate("-(x - 1)", 2.0).unwrap(), -1.0);
    assert_eq!(evaluate("x - 1", 2.0).unwrap(), 1.0);
}
