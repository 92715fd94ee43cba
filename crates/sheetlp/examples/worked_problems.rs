use sheetlp::{Problem, SolveError, solve};

fn main() -> Result<(), SolveError> {
    println!("Problem #1:");
    solve(
        &Problem::new("min", vec![10.0, 15.0, 25.0]).with_constraints(
            vec![vec![1.0, 1.0, 1.0], vec![1.0, -2.0, 0.0], vec![0.0, 0.0, 1.0]],
            vec![1000.0, 0.0, 340.0],
            vec![">=", ">=", ">="],
        ),
    )?;

    println!("\nProblem #2:");
    solve(
        &Problem::new("max", vec![16.0, 20.5, 14.0]).with_constraints(
            vec![
                vec![4.0, 6.0, 2.0],
                vec![3.0, 8.0, 6.0],
                vec![9.0, 6.0, 4.0],
                vec![30.0, 40.0, 25.0],
            ],
            vec![2000.0, 2000.0, 1440.0, 9600.0],
            vec!["<=", "<=", "<=", "<="],
        ),
    )?;

    println!("\nProblem #3:");
    solve(
        &Problem::new("min", vec![4.0, 5.0, 3.0, 7.0, 6.0])
            .with_constraints(
                vec![
                    vec![10.0, 20.0, 10.0, 30.0, 20.0],
                    vec![5.0, 7.0, 4.0, 9.0, 2.0],
                    vec![1.0, 4.0, 10.0, 2.0, 1.0],
                    vec![500.0, 450.0, 160.0, 300.0, 500.0],
                ],
                vec![16.0, 10.0, 15.0, 600.0],
                vec![">=", ">=", ">=", ">="],
            )
            .with_minimum_for_all(0.1),
    )?;

    println!("\nProblem #4:");
    solve(
        &Problem::new("max", vec![16.0, 20.5, 14.0]).with_constraints(
            vec![
                vec![4.0, 6.0, 2.0],
                vec![9.0, 6.0, 4.0],
                vec![30.0, 40.0, 25.0],
                vec![3.0, 8.0, 6.0],
            ],
            vec![2000.0, 1440.0, 9600.0, 1984.0],
            vec!["<=", "<=", "<=", "="],
        ),
    )?;

    Ok(())
}
