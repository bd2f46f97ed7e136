//! End-to-end scenarios driven through the public [`amrit::interface::run`]
//! pipeline — the same entry point every host (REPL, file runner, WASM)
//! calls.

use amrit::interface::run;
use amrit::object::{Environment, Value};

fn run_source(source: &str) -> (Value, Vec<String>) {
    let env = Environment::new();
    let mut stdout = Vec::new();
    let value = run(source, env, &mut stdout).expect("program should parse cleanly");
    (value, stdout)
}

#[test]
fn fibonacci_via_recursive_closures() {
    let source = r#"
        mana fibonacci = karya(x) {
            agar (x == 0) {
                labh 0|
            } varna {
                agar (x == 1) {
                    labh 1|
                } varna {
                    labh fibonacci(x - 1) + fibonacci(x - 2)|
                }
            }
        }|
        fibonacci(10)|
    "#;
    let (value, _) = run_source(source);
    assert_eq!(value.inspect(), "55");
}

#[test]
fn higher_order_functions_over_arrays() {
    let source = r#"
        mana map = karya(arr, f) {
            mana iter = karya(a, accumulated) {
                agar (lambai(a) == 0) {
                    labh accumulated|
                } varna {
                    labh iter(baaki(a), push(accumulated, f(pehla(a))))|
                }
            }|
            labh iter(arr, [])|
        }|
        mana double = karya(x) { x * 2 }|
        map([1, 2, 3, 4], double)|
    "#;
    let (value, _) = run_source(source);
    assert_eq!(value.inspect(), "[2, 4, 6, 8]");
}

#[test]
fn devanagari_and_latin_source_evaluate_identically() {
    let latin = r#"
        mana add = karya(a, b) { a + b }|
        add(2, 3)|
    "#;
    let devanagari = r#"
        माना add = कार्य(a, b) { a + b }|
        add(2, 3)|
    "#;
    let (latin_value, _) = run_source(latin);
    let (devanagari_value, _) = run_source(devanagari);
    assert_eq!(latin_value.inspect(), devanagari_value.inspect());
    assert_eq!(latin_value.inspect(), "5");
}

#[test]
fn while_loop_with_compound_assignment_sums_a_range() {
    let source = "mana i = 0| mana total = 0| jabtak (i < 5) { total += i| i += 1| } total|";
    let (value, _) = run_source(source);
    assert_eq!(value.inspect(), "10");
}

#[test]
fn print_buffers_output_separately_from_the_result_value() {
    let source = r#"print("namaste", 5, satya)| 99|"#;
    let (value, stdout) = run_source(source);
    assert_eq!(value.inspect(), "99");
    assert_eq!(stdout, vec!["namaste 5 true \n".to_string()]);
}

#[test]
fn hash_and_array_values_index_and_inspect_consistently() {
    let source = r#"
        mana people = [{"name": "Anna", "age": 24}, {"name": "Bob", "age": 99}]|
        people[0]["name"]|
    "#;
    let (value, _) = run_source(source);
    assert_eq!(value.inspect(), "Anna");
}

#[test]
fn slice_out_of_bounds_is_null_and_in_bounds_is_a_sub_array() {
    let (ok, _) = run_source("[1, 2, 3, 4, 5][1:4]|");
    assert_eq!(ok.inspect(), "[2, 3, 4]");

    let (oob, _) = run_source("[1, 2, 3][0:10]|");
    assert!(matches!(oob, Value::Null));
}

#[test]
fn error_values_short_circuit_further_evaluation() {
    let (value, stdout) = run_source(r#"print("before")| 5 + satya| print("after")|"#);
    assert_eq!(value.inspect(), "ERROR: type mismatch: INTEGER + BOOLEAN");
    assert_eq!(stdout, vec!["before \n".to_string()]);
}

#[test]
fn parser_errors_are_reported_without_evaluating() {
    let env = Environment::new();
    let mut stdout = Vec::new();
    let result = run("mana x 5|", env, &mut stdout);
    let errors = result.expect_err("malformed statement should fail to parse");
    assert!(!errors.is_empty());
    assert!(stdout.is_empty());
}

#[test]
fn builtin_arity_errors_name_got_and_want() {
    let (value, _) = run_source("lambai(1, 2)|");
    assert_eq!(value.inspect(), "ERROR: wrong number of arguments. got=2, want=1");
}

#[test]
fn closures_over_mutable_counters_each_keep_independent_state() {
    let source = r#"
        mana makeCounter = karya() {
            mana count = 0|
            karya() {
                count += 1|
                count
            }
        }|
        mana a = makeCounter()|
        mana b = makeCounter()|
        a()|
        a()|
        mana aResult = a()|
        mana bResult = b()|
        [aResult, bResult]|
    "#;
    let (value, _) = run_source(source);
    assert_eq!(value.inspect(), "[3, 1]");
}
