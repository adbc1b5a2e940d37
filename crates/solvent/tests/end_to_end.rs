//! Whole-pipeline tests: problem text in, answer text out.

use solvent::{solve, Category, Outcome, Solver, SolverConfig};

#[test]
fn test_linear_equation() {
    assert_eq!(solve("Solve for x: 2x + 3 = 7", "algebra"), "x = 2");
}

#[test]
fn test_quadratic_with_surds() {
    assert_eq!(
        solve("solve for x: x^2 = 2", "algebra"),
        "x = -sqrt(2), sqrt(2)"
    );
}

#[test]
fn test_derivative() {
    assert_eq!(
        solve("Find the derivative of f(x) = x^2 + 3x - 2", "calculus"),
        "f'(x) = 2*x + 3"
    );
}

#[test]
fn test_integral() {
    assert_eq!(
        solve("Integrate 3x^2 + 2", "calculus"),
        "∫3x^2 + 2 dx = x**3 + 2*x + C"
    );
}

#[test]
fn test_rational_integral() {
    assert_eq!(
        solve("integrate 1/(x^2+4)", "calculus"),
        "∫1/(x^2+4) dx = atan(x/2)/2 + C"
    );
}

#[test]
fn test_circle_area() {
    let answer = solve("Find the area of a circle with radius 5", "geometry");
    assert!(answer.contains("≈ 78.54"), "{answer}");
}

#[test]
fn test_system_of_equations_is_unsupported() {
    let answer = solve(
        "Solve the system of equations: 3x + 2y = 12, x - y = 1",
        "algebra",
    );
    assert_eq!(
        answer,
        "I couldn't parse the equation properly. Please format it as 'solve for x: ax + b = c'"
    );
}

#[test]
fn test_bare_command_gets_hint() {
    assert_eq!(
        solve("simplify", "algebra"),
        "I couldn't identify the expression to simplify. Please format it as 'simplify ...'"
    );
}

#[test]
fn test_generic_arithmetic() {
    assert_eq!(solve("What is 2+2", "general"), "Result: 4");
}

#[test]
fn test_deeply_nested_input_is_not_fatal() {
    let problem = format!("what is {}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(
        solve(&problem, "general"),
        "I couldn't determine how to solve this problem. \
         Please try reformulating it or specifying the type of math problem."
    );
}

#[test]
fn test_exponent_tower_derivative() {
    let solver = Solver::new(SolverConfig::default().with_timeout_ms(20_000));
    let tower = vec!["x"; 30].join("^");
    let started = std::time::Instant::now();
    let answer = solver.solve(&format!("find the derivative of f(x) = {tower}"), "calculus");
    assert!(answer.starts_with("f'(x) = "), "{answer}");
    assert!(answer.contains("x**(x**") && answer.contains("log(x)"));
    assert!(started.elapsed() < std::time::Duration::from_secs(20));
}

#[test]
fn test_limit() {
    assert_eq!(
        solve("Find the limit of (x^2 - 1)/(x - 1) as x approaches 1", "calculus"),
        "lim((x^2 - 1)/(x - 1)) as x→1 = 2"
    );
}

#[test]
fn test_volume() {
    assert_eq!(
        solve("What is the volume of a cube with side 3?", "geometry"),
        "Volume of cube with side 3.0 = 27.0 cubic units"
    );
}

#[test]
fn test_hard_failure() {
    assert_eq!(
        solve("Find the limit of cos(x) as x approaches infinity", "calculus"),
        "I couldn't solve this problem. Error: the limit of cos(x) does not exist"
    );
}

#[test]
fn test_idempotent() {
    let solver = Solver::default();
    for problem in [
        "Solve for x: x^2 - 4 = 0",
        "factor x^3 - x",
        "expand (a + b)^2",
        "area of the triangle with base 4 and height 3",
    ] {
        assert_eq!(solver.solve(problem, "general"), solver.solve(problem, "general"));
    }
}

#[test]
fn test_detailed_outcomes() {
    let solver = Solver::default();
    assert!(matches!(
        solver.solve_detailed("factor x^2 - 1", Category::Algebra),
        Outcome::Solved(_)
    ));
    assert!(matches!(
        solver.solve_detailed("area of a hexagon with side 2", Category::Geometry),
        Outcome::Unrecognized(_)
    ));
    assert!(matches!(
        solver.solve_detailed("volume of a sphere with radius .", Category::Geometry),
        Outcome::Failed(_)
    ));
}

#[test]
fn test_timeout_config_still_solves() {
    let solver = Solver::new(SolverConfig::default().with_timeout_ms(30_000));
    assert_eq!(solver.solve("what is 6*7", "general"), "Result: 42");
}

#[test]
fn test_shared_across_threads() {
    let solver = Solver::default();
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let solver = solver.clone();
            std::thread::spawn(move || solver.solve(&format!("solve for x: x + {n} = 10"), "algebra"))
        })
        .collect();
    let answers: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(answers, ["x = 9", "x = 8", "x = 7", "x = 6"]);
}
