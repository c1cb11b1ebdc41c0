// ABOUTME: Black-box conformance tests against the public compile/evaluate/interpret API

use std::cell::Cell;
use std::rc::Rc;

use evalc::{compile, dispose, evaluate, interpret};

#[test]
fn end_to_end_values() {
    assert_eq!(interpret("3+4*2").0, 11.0);
    assert_eq!(interpret("(3+4)*2").0, 14.0);
    assert_eq!(interpret("2^3^2").0, 512.0);
    assert_eq!(interpret("sqrt 100 + 7").0, 17.0);
    assert_eq!(interpret("sqrt 100 * 7").0, 70.0);
    assert!((interpret("100^-.5+1").0 - 1.1).abs() < 1e-9);
    assert_eq!(interpret("100^--.5+1").0, 11.0);
    assert_eq!(interpret("pow(2,10)").0, 1024.0);
    assert_eq!(interpret("atan2(1,1)").0.to_bits(), (1f64).atan2(1.0).to_bits());
}

#[test]
fn syntax_error_positions() {
    let cases = [
        ("", 1),
        ("1+", 2),
        ("1)", 2),
        ("(1", 2),
        ("1**1", 3),
        ("1*2(+4", 4),
        ("a+5", 1),
        ("1^^5", 3),
        ("sin(cos5", 8),
    ];
    for (src, expected) in cases {
        let (value, pos) = interpret(src);
        assert!(value.is_nan(), "expected NaN for {src:?}");
        assert_eq!(pos, Some(expected), "wrong position for {src:?}");
    }
}

#[test]
fn unary_catalog_matches_std_across_a_sweep() {
    let unary: [(&str, fn(f64) -> f64); 16] = [
        ("abs", f64::abs),
        ("acos", f64::acos),
        ("asin", f64::asin),
        ("atan", f64::atan),
        ("ceil", f64::ceil),
        ("cos", f64::cos),
        ("cosh", f64::cosh),
        ("exp", f64::exp),
        ("floor", f64::floor),
        ("ln", f64::ln),
        ("log", f64::log10),
        ("sin", f64::sin),
        ("sinh", f64::sinh),
        ("sqrt", f64::sqrt),
        ("tan", f64::tan),
        ("tanh", f64::tanh),
    ];

    let x = Rc::new(Cell::new(0.0));
    let mut step = -50;
    while step <= 50 {
        let input = step as f64 / 10.0;
        x.set(input);
        for (name, reference) in unary {
            let expr = compile(&format!("{name}(x)"), &[("x", Rc::clone(&x))])
                .unwrap_or_else(|_| panic!("{name}(x) should compile"));
            let got = evaluate(&expr);
            let want = reference(input);
            assert!(
                (got - want).abs() < 1e-9 || (got.is_nan() && want.is_nan()),
                "{name}({input}) = {got}, expected {want}"
            );
        }
        step += 2;
    }
}

#[test]
fn domain_restricted_functions_produce_nan_outside_their_domain() {
    assert!(interpret("asin(2)").0.is_nan());
    assert!(interpret("acos(2)").0.is_nan());
    assert!(interpret("sqrt(-1)").0.is_nan());
    assert!(interpret("ln(-1)").0.is_nan());
}

#[test]
fn division_and_modulo_anomalies_are_nan_or_infinite_not_errors() {
    let (value, pos) = interpret("0/0");
    assert!(value.is_nan());
    assert_eq!(pos, None);

    let (value, pos) = interpret("1/0");
    assert!(value.is_infinite() && value > 0.0);
    assert_eq!(pos, None);

    let (value, pos) = interpret("1%0");
    assert!(value.is_nan());
    assert_eq!(pos, None);

    let (value, pos) = interpret("(1%0)%1");
    assert!(value.is_nan());
    assert_eq!(pos, None);
}

#[test]
fn bound_variable_changes_are_visible_on_next_evaluate() {
    let x = Rc::new(Cell::new(1.0));
    let expr = compile("x*x", &[("x", Rc::clone(&x))]).expect("should compile");
    assert_eq!(evaluate(&expr), 1.0);
    x.set(7.0);
    assert_eq!(evaluate(&expr), 49.0);
}

#[test]
fn two_trees_compiled_from_the_same_binding_observe_the_same_mutation() {
    let x = Rc::new(Cell::new(2.0));
    let sum = compile("x+1", &[("x", Rc::clone(&x))]).expect("should compile");
    let product = compile("x*3", &[("x", Rc::clone(&x))]).expect("should compile");

    assert_eq!(evaluate(&sum), 3.0);
    assert_eq!(evaluate(&product), 6.0);

    x.set(10.0);

    assert_eq!(evaluate(&sum), 11.0);
    assert_eq!(evaluate(&product), 30.0);
}

#[test]
fn multiple_expressions_track_a_shared_variable_sweep() {
    let x = Rc::new(Cell::new(0.0));
    let y = Rc::new(Cell::new(0.0));
    let bindings = [("x", Rc::clone(&x)), ("y", Rc::clone(&y))];

    let cos_plus_sin = compile("cos x + sin y", &bindings).expect("should compile");
    let sum_minus = compile("x+x+x-y", &bindings).expect("should compile");
    let product_pow = compile("x*y^3", &bindings).expect("should compile");

    let mut xi = -50;
    while xi <= 50 {
        let xv = xi as f64 / 10.0;
        let mut yi = -50;
        while yi <= 50 {
            let yv = yi as f64 / 10.0;
            x.set(xv);
            y.set(yv);

            assert!((evaluate(&cos_plus_sin) - (xv.cos() + yv.sin())).abs() < 1e-9);
            assert_eq!(evaluate(&sum_minus), xv + xv + xv - yv);
            assert!((evaluate(&product_pow) - (xv * yv.powf(3.0))).abs() < 1e-9);

            yi += 10;
        }
        xi += 10;
    }
}

#[test]
fn variable_shadows_same_named_catalog_entry() {
    let pi = Rc::new(Cell::new(0.0));
    let expr = compile("pi", &[("pi", Rc::clone(&pi))]).expect("should compile");
    assert_eq!(evaluate(&expr), 0.0);
}

#[test]
fn disposing_none_is_a_harmless_no_op() {
    dispose(None);
    let expr = compile("1+1", &[]).expect("should compile");
    dispose(Some(expr));
}

#[test]
fn multi_arg_call_arity_mismatch_is_a_parse_error() {
    let (_, pos) = interpret("pow(1,2,3)");
    assert!(pos.is_some());
    let (_, pos) = interpret("sin(1,2)");
    assert!(pos.is_some());
}
