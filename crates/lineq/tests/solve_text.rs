//! End to end checks of text in, solution or diagnostic out.

use approx::assert_relative_eq;
use lineq::{parse_text, solve_equation_text, solve_text, solve_text_with, Error, SolveOptions};
use parser::{ParseStatus, ParserConfig};

#[test]
fn two_by_two() {
    assert_eq!(solve_equation_text("2x+3y=8,3x-y=1"), "x = 1 y = 2");
}

#[test]
fn single_variable() {
    assert_eq!(solve_equation_text("x=5"), "x = 5");
    assert_eq!(solve_equation_text("  -2 = 4q  "), "q = -0.5");
}

#[test]
fn separators() {
    let expect = "x = 1 y = 2";
    assert_eq!(solve_equation_text("2x + 3y = 8\r\n3x - y = 1"), expect);
    assert_eq!(solve_equation_text("2x + 3y = 8\r3x - y = 1"), expect);
    assert_eq!(solve_equation_text("2x + 3y = 8\n\n3x - y = 1\n"), expect);
    assert_eq!(solve_equation_text(r"2x + 3y = 8\n3x - y = 1"), expect);
}

#[test]
fn first_seen_order() {
    let solution = solve_text("b - a = 1, a + b + c = 6, 2c = a + 5").unwrap();
    let names: Vec<_> = solution.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
    assert_relative_eq!(solution.get("a").unwrap(), 1.0, max_relative = 1e-12);
    assert_relative_eq!(solution.get("b").unwrap(), 2.0, max_relative = 1e-12);
    assert_relative_eq!(solution.get("c").unwrap(), 3.0, max_relative = 1e-12);
}

#[test]
fn equation_split_over_lines() {
    assert_eq!(solve_equation_text("x +\ny = 3\nx - y =\n1"), "x = 2 y = 1");
}

#[test]
fn solution_satisfies_equations() {
    let text = "0.5a + 1.25b - 3c + d = 2
        a - 5^-1 c = -4
        7a + 2^1b = d - 1
        a + b + c + d = 10";
    let system = parse_text(text, ParserConfig::default()).unwrap();
    let solution = solve_text(text).unwrap();

    let x: Vec<f64> = solution.iter().map(|(_, value)| value).collect();
    let norm_x = x.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));

    for i in 0..system.equation_count {
        let lhs: f64 = (0..x.len()).map(|j| system.matrix.get(i, j) * x[j]).sum();
        assert!(
            (lhs - system.rhs.get(&i)).abs() <= 1e-12 * norm_x,
            "equation {} has residual {}",
            i,
            lhs - system.rhs.get(&i)
        );
    }
}

#[test]
fn balance_errors() {
    assert_eq!(
        solve_equation_text("x+y=1"),
        "Only 1 equations is too few equations for 2 variables"
    );
    assert_eq!(
        solve_equation_text("x=1,x=2,x=3"),
        "3 equations is too many equations for only 1 variables"
    );
    assert_eq!(
        solve_text("x=1,2x=2"),
        Err(Error::TooManyEquations {
            equations: 2,
            variables: 1
        })
    );
}

#[test]
fn solver_errors() {
    assert_eq!(
        solve_equation_text("x + y = 1, 0x + 0y = 0"),
        "Error - the system of equations is singular."
    );
    assert_eq!(
        solve_text("x + y = 1, 0x + 0y = 0"),
        Err(Error::Singular { row: 1 })
    );
    assert_eq!(
        solve_equation_text("x + y = 1, 2x + 2y = 2"),
        "Error - the system of equations is ill conditioned."
    );
}

#[test]
fn parse_errors() {
    assert_eq!(
        solve_equation_text("x + y"),
        "There is no equal sign in the equation."
    );
    assert_eq!(
        solve_equation_text("x = y = 1"),
        "There are multiple equal signs in the equation."
    );
    assert_eq!(
        solve_equation_text("123456789012345678901x = 1"),
        "A number contains more than 20 digits."
    );
    assert_eq!(
        solve_equation_text("x = 1, 3 = 4"),
        "There is no variable in the equation."
    );
    assert_eq!(
        solve_equation_text("x ="),
        "There is no term after the equal sign in the equation."
    );
    assert_eq!(
        solve_text("x = 1\ny = 2^"),
        Err(Error::Parse {
            status: ParseStatus::ErrorMissingExponent,
            position: 6
        })
    );
}

#[test]
fn exponent_coefficient() {
    let system = parse_text("2^3x = 4000", ParserConfig::default()).unwrap();
    assert_eq!(system.matrix.get(0, 0), 2000.0);
    assert_eq!(solve_equation_text("2^3x = 4000"), "x = 2");
}

#[test]
fn blank_input() {
    assert_eq!(solve_equation_text(""), "");
    assert_eq!(solve_equation_text(" \n , \r\n"), "");
}

#[test]
fn custom_options() {
    let options = SolveOptions {
        parser: ParserConfig {
            max_number_length: 2,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(solve_text_with("10x = 20", &options).is_ok());
    assert_eq!(
        solve_text_with("100x = 200", &options),
        Err(Error::Parse {
            status: ParseStatus::ErrorTooManyDigits,
            position: 2
        })
    );
}
