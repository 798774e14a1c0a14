use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Readings;

impl AocParser for Readings {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidFormat(format!("expected integer: {line}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Readings {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Readings {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max()
            .map(|max| max.to_string())
            .ok_or_else(|| SolveError::failed("no readings"))
    }
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct SinglePart;

impl AocParser for SinglePart {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for SinglePart {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lines().count().to_string())
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(Readings::PARTS, 2);
    assert_eq!(SinglePart::PARTS, 1);
}

#[test]
fn test_solve_part_dispatches_to_part_solvers() {
    let mut shared = Readings::parse("4\n-2\n9").unwrap();
    assert_eq!(Readings::solve_part(&mut shared, 1).unwrap(), "11");
    assert_eq!(Readings::solve_part(&mut shared, 2).unwrap(), "9");
}

#[test]
fn test_unknown_part_is_not_implemented() {
    let mut shared = Readings::parse("1").unwrap();
    assert!(matches!(
        Readings::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
    assert!(matches!(
        Readings::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));

    let mut text = SinglePart::parse("a\nb").unwrap();
    assert_eq!(SinglePart::solve_part(&mut text, 1).unwrap(), "2");
    assert!(matches!(
        SinglePart::solve_part(&mut text, 2),
        Err(SolveError::PartNotImplemented(2))
    ));
}

#[test]
fn test_part_errors_pass_through() {
    let mut empty = Readings::parse("").unwrap();
    assert!(matches!(
        Readings::solve_part(&mut empty, 2),
        Err(SolveError::SolveFailed(_))
    ));
}
