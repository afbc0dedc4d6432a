//! DIMACS CNF serialization and solver output parsing
//!
//! CNF text: optional `c` comment lines, a `p cnf <vars> <clauses>` header, then one
//! clause per line as space-separated literals terminated by `0`.
//!
//! Solver output: an `s UNSATISFIABLE` line means no model; `v` lines carry the model
//! literals (possibly split across several lines) ending with `0`.

use super::constraints::{Clause, ClauseSet};
use super::solver::{Model, SolverOutcome};
use crate::error::{QueensError, QueensResult};
use std::io::Write;

/// Write a clause set in DIMACS CNF format
///
/// The header's clause count is taken from the clause sequence itself, and the number of
/// clause lines actually written is checked against it.
pub fn write_dimacs<W: Write>(clauses: &ClauseSet, comments: &[String], writer: &mut W) -> QueensResult<()> {
    let declared_vars = clauses.variable_count();
    let used_vars = clauses.max_variable();
    if used_vars > declared_vars {
        return Err(QueensError::SerializationMismatch {
            what: "variables",
            declared: declared_vars,
            actual: used_vars,
        });
    }

    for comment in comments {
        if comment.is_empty() {
            writeln!(writer, "c")?;
        } else {
            writeln!(writer, "c {}", comment)?;
        }
    }

    let declared = clauses.len();
    writeln!(writer, "p cnf {} {}", declared_vars, declared)?;

    let mut written = 0usize;
    for clause in clauses {
        for literal in &clause.literals {
            write!(writer, "{} ", literal)?;
        }
        writeln!(writer, "0")?;
        written += 1;
    }

    if written != declared {
        return Err(QueensError::SerializationMismatch {
            what: "clauses",
            declared,
            actual: written,
        });
    }

    Ok(())
}

/// Render a clause set as a DIMACS string
pub fn to_dimacs_string(clauses: &ClauseSet, comments: &[String]) -> QueensResult<String> {
    let mut buffer = Vec::new();
    write_dimacs(clauses, comments, &mut buffer)?;
    // Only ASCII digits, signs, spaces and caller-provided comments are written.
    String::from_utf8(buffer).map_err(|e| QueensError::ModelParseFailure {
        line: 0,
        reason: format!("non-UTF-8 DIMACS output: {}", e),
    })
}

/// Parse DIMACS CNF text back into a clause set
pub fn parse_dimacs(text: &str) -> QueensResult<ClauseSet> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses = Vec::new();
    let mut pending: Vec<i32> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }

        if line.starts_with('p') {
            if header.is_some() {
                return Err(parse_error(line_no, "duplicate problem line"));
            }
            header = Some(parse_header(line, line_no)?);
            continue;
        }

        if header.is_none() {
            return Err(parse_error(line_no, "clause before `p cnf` header"));
        }

        for token in line.split_whitespace() {
            let literal = parse_literal(token, line_no)?;
            if literal == 0 {
                if pending.is_empty() {
                    return Err(parse_error(line_no, "empty clause"));
                }
                clauses.push(Clause::new(std::mem::take(&mut pending)));
            } else {
                pending.push(literal);
            }
        }
    }

    let (num_vars, num_clauses) = header.ok_or_else(|| parse_error(0, "missing `p cnf` header"))?;

    if !pending.is_empty() {
        return Err(parse_error(0, "last clause is not terminated by 0"));
    }

    if clauses.len() != num_clauses {
        return Err(QueensError::SerializationMismatch {
            what: "clauses",
            declared: num_clauses,
            actual: clauses.len(),
        });
    }

    let set = ClauseSet::new(num_vars, clauses);
    if set.max_variable() > num_vars {
        return Err(QueensError::SerializationMismatch {
            what: "variables",
            declared: num_vars,
            actual: set.max_variable(),
        });
    }

    Ok(set)
}

/// Interpret a solver's standard output
///
/// Recognizes `s UNSATISFIABLE` and `v` model lines; everything else is ignored.
pub fn parse_solver_output(text: &str) -> QueensResult<SolverOutcome> {
    let mut literals: Vec<i32> = Vec::new();
    let mut saw_model = false;
    let mut saw_satisfiable = false;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if line.starts_with("s UNSATISFIABLE") {
            return Ok(SolverOutcome::Unsatisfiable);
        }
        if line.starts_with("s SATISFIABLE") {
            saw_satisfiable = true;
            continue;
        }

        if let Some(rest) = line.strip_prefix("v ") {
            saw_model = true;
            for token in rest.split_whitespace() {
                let literal = parse_literal(token, line_no)?;
                if literal != 0 {
                    literals.push(literal);
                }
            }
        }
    }

    if saw_model {
        Ok(SolverOutcome::Satisfiable(Model::new(literals)))
    } else if saw_satisfiable {
        Err(parse_error(0, "solver reported SATISFIABLE without a `v` model line"))
    } else {
        Err(parse_error(0, "no `s UNSATISFIABLE` or `v` line in solver output"))
    }
}

fn parse_header(line: &str, line_no: usize) -> QueensResult<(usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        ["p", "cnf", vars, clauses] => {
            let vars = vars
                .parse::<usize>()
                .map_err(|_| parse_error(line_no, format!("bad variable count `{}`", vars)))?;
            let clauses = clauses
                .parse::<usize>()
                .map_err(|_| parse_error(line_no, format!("bad clause count `{}`", clauses)))?;
            Ok((vars, clauses))
        }
        _ => Err(parse_error(line_no, format!("malformed problem line `{}`", line))),
    }
}

fn parse_literal(token: &str, line_no: usize) -> QueensResult<i32> {
    token
        .parse::<i32>()
        .map_err(|_| parse_error(line_no, format!("invalid literal `{}`", token)))
}

fn parse_error(line: usize, reason: impl Into<String>) -> QueensError {
    QueensError::ModelParseFailure {
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::{ConstraintGenerator, SymmetryBreaker, VariableIndexer};

    fn queens_clause_set(n: usize, sb_length: usize) -> ClauseSet {
        let indexer = VariableIndexer::new(n, sb_length).unwrap();
        let mut clauses = ConstraintGenerator::new(indexer.clone())
            .generate_all_constraints()
            .unwrap();
        clauses.extend(SymmetryBreaker::new(&indexer, sb_length).unwrap().generate());
        ClauseSet::new(indexer.variable_count(), clauses)
    }

    #[test]
    fn test_write_header_and_lines() {
        let set = ClauseSet::new(3, vec![Clause::new(vec![1, -2]), Clause::unit(3)]);
        let text = to_dimacs_string(&set, &["DIMACS for test".to_string(), String::new()]).unwrap();
        assert_eq!(text, "c DIMACS for test\nc\np cnf 3 2\n1 -2 0\n3 0\n");
    }

    #[test]
    fn test_header_counts_match_emitted_lines() {
        for n in [1, 4, 8] {
            let set = queens_clause_set(n, n);
            let text = to_dimacs_string(&set, &[]).unwrap();
            let mut lines = text.lines();
            let header = lines.next().unwrap();
            assert_eq!(header, format!("p cnf {} {}", n * n + n, set.len()));
            assert_eq!(lines.filter(|l| l.ends_with(" 0") || *l == "0").count(), set.len());
        }
    }

    #[test]
    fn test_round_trip() {
        let set = queens_clause_set(6, 6);
        let text = to_dimacs_string(&set, &["round trip".to_string()]).unwrap();
        let parsed = parse_dimacs(&text).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn test_empty_set() {
        let set = ClauseSet::new(0, vec![]);
        let text = to_dimacs_string(&set, &[]).unwrap();
        assert_eq!(text, "p cnf 0 0\n");
        assert_eq!(parse_dimacs(&text).unwrap(), set);
    }

    #[test]
    fn test_undeclared_variable_rejected() {
        let set = ClauseSet::new(2, vec![Clause::unit(5)]);
        assert!(matches!(
            to_dimacs_string(&set, &[]),
            Err(QueensError::SerializationMismatch { what: "variables", declared: 2, actual: 5 })
        ));
    }

    #[test]
    fn test_parse_clause_count_mismatch() {
        let text = "p cnf 2 3\n1 2 0\n-1 0\n";
        assert!(matches!(
            parse_dimacs(text),
            Err(QueensError::SerializationMismatch { what: "clauses", declared: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_parse_wrapped_clause() {
        let parsed = parse_dimacs("c wrapped\np cnf 3 1\n1 2\n3 0\n").unwrap();
        assert_eq!(parsed.clauses(), &[Clause::new(vec![1, 2, 3])]);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_dimacs("1 2 0\n").is_err());
        assert!(parse_dimacs("p cnf x 1\n1 0\n").is_err());
        assert!(parse_dimacs("p cnf 2 1\n1 y 0\n").is_err());
        assert!(parse_dimacs("p cnf 2 1\n1 2\n").is_err());
    }

    #[test]
    fn test_solver_output_unsat() {
        let output = "c glucose\ns UNSATISFIABLE\n";
        assert_eq!(parse_solver_output(output).unwrap(), SolverOutcome::Unsatisfiable);
    }

    #[test]
    fn test_solver_output_model() {
        let output = "c comment\ns SATISFIABLE\nv -1 2 -3\nv 4 0\n";
        match parse_solver_output(output).unwrap() {
            SolverOutcome::Satisfiable(model) => assert_eq!(model.literals(), &[-1, 2, -3, 4]),
            other => panic!("expected a model, got {:?}", other),
        }
    }

    #[test]
    fn test_solver_output_without_status_line() {
        match parse_solver_output("v 1 -2 0\n").unwrap() {
            SolverOutcome::Satisfiable(model) => assert_eq!(model.literals(), &[1, -2]),
            other => panic!("expected a model, got {:?}", other),
        }
    }

    #[test]
    fn test_solver_output_failures() {
        assert!(matches!(
            parse_solver_output("c nothing here\n"),
            Err(QueensError::ModelParseFailure { .. })
        ));
        assert!(matches!(
            parse_solver_output("s SATISFIABLE\n"),
            Err(QueensError::ModelParseFailure { .. })
        ));
        assert!(matches!(
            parse_solver_output("s SATISFIABLE\nv 1 two 0\n"),
            Err(QueensError::ModelParseFailure { line: 2, .. })
        ));
    }
}
