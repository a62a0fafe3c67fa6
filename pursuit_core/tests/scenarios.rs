use pursuit_core::{
    Direction, State,
    cell::{CAPTURE, CellCode},
    index::locate_code,
    level::parse_grid,
    map::Grid,
    problem::{PursuitProblem, coin_count},
    search::{SearchLimits, SearchOutcome, SearchProblem, astar_search},
    transition::{Pruned, result, transition},
};

fn grid(rows: Vec<Vec<CellCode>>) -> State {
    Grid::from_rows(rows).unwrap()
}

#[test]
fn single_row_coin_grab_reaches_goal() {
    let problem = PursuitProblem::new(grid(vec![vec![77, 11, 99]])).unwrap();
    let successors = problem.successors(problem.initial());

    assert_eq!(successors.len(), 1);
    let (action, next) = &successors[0];
    assert_eq!(*action, Direction::Right);
    assert_eq!(next.to_rows(), vec![vec![10, 77, 99]]);
    assert_eq!(coin_count(next), 0);
    assert!(problem.is_goal(next));
}

#[test]
fn pursuer_prefers_right_over_up_on_a_tie() {
    let start = grid(vec![vec![77, 11], vec![20, 10]]);
    let next = transition(&start, Direction::Right).unwrap();

    assert_eq!(next.to_rows(), vec![vec![10, 77], vec![10, 20]]);
    assert_eq!(locate_code(&next, CAPTURE), None);
    assert_eq!(coin_count(&next), 0);
}

#[test]
fn forced_move_next_to_pursuer_is_excluded() {
    let start = grid(vec![vec![99, 77, 10, 30]]);
    assert_eq!(transition(&start, Direction::Right), Err(Pruned::PursuerCaught));

    let problem = PursuitProblem::new(start).unwrap();
    assert!(problem.successors(problem.initial()).is_empty());
}

#[test]
fn stepping_onto_coin_bearing_pursuer_is_pruned() {
    let start = grid(vec![vec![77, 41], vec![11, 10]]);
    assert_eq!(result(&start, Direction::Right), None);
    assert!(result(&start, Direction::Down).is_some());
}

#[test]
fn pursuers_surrounding_one_cell_let_blue_claim_it() {
    // All four pursuers are walled in around (2, 2), so it is the only cell any
    // of them can enter. Blue moves first and claims it; the others stay put.
    let rows = vec![
        vec![99, 99, 99, 99, 99],
        vec![99, 99, 20, 99, 99],
        vec![99, 30, 10, 40, 99],
        vec![99, 99, 50, 99, 99],
        vec![99, 99, 99, 99, 99],
        vec![10, 10, 10, 10, 77],
    ];
    let next = transition(&grid(rows.clone()), Direction::Left).unwrap().to_rows();
    assert_eq!(next[2][2], 20);
    assert_eq!(next[1][2], 10);
    assert_eq!(next[2][1], 30);
    assert_eq!(next[2][3], 40);
    assert_eq!(next[3][2], 50);
    assert_eq!(next[5][3], 77);

    // With the earlier movers removed, each later pursuer takes the cell in turn.
    let seats = [(1, 2), (2, 1), (2, 3), (3, 2)];
    for (taken, &(row, col)) in seats.iter().enumerate().skip(1) {
        let mut walled = rows.clone();
        for &(r, c) in &seats[..taken] {
            walled[r][c] = 99;
        }
        let code = walled[row][col];
        let next = transition(&grid(walled), Direction::Left).unwrap().to_rows();
        assert_eq!(next[2][2], code);
        assert_eq!(next[row][col], 10);
    }
}

#[test]
fn astar_plan_replays_to_a_goal() {
    let level = "\
# a small board with one pursuer
77 11 10 11
10 99 99 10
11 10 10 10
99 99 10 50
";
    let problem = PursuitProblem::new(parse_grid(level).unwrap()).unwrap();
    let outcome = astar_search(&problem, &SearchLimits::default());
    let SearchOutcome::Solved { node, .. } = outcome else {
        panic!("expected a solution");
    };

    let plan = node.solution();
    assert_eq!(plan.len(), node.depth);

    let mut state = problem.initial().clone();
    for action in plan {
        state = result(&state, action).expect("plan step must be legal");
    }
    assert!(problem.is_goal(&state));
    assert_eq!(&state, &node.state);
}

#[test]
fn trapped_player_has_no_solution() {
    let problem = PursuitProblem::new(grid(vec![vec![99, 77, 99, 11]])).unwrap();
    let outcome = astar_search(&problem, &SearchLimits::default());
    assert!(matches!(outcome, SearchOutcome::Exhausted { .. }));
}
