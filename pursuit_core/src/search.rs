//! Generic best-first graph search over any [`SearchProblem`].

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashSet},
    hash::Hash,
    rc::Rc,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Capabilities a problem must expose to be searched.
pub trait SearchProblem {
    /// States are deduplicated by value.
    type State: Clone + Eq + Hash;
    type Action: Clone;

    fn initial(&self) -> &Self::State;

    /// Every `(action, state)` pair reachable in one step, in a stable order.
    fn successors(&self, state: &Self::State) -> Vec<(Self::Action, Self::State)>;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Estimated cost from `node` to the nearest goal.
    fn heuristic(&self, _node: &Node<Self::State, Self::Action>) -> i64 {
        0
    }

    fn step_cost(&self, _from: &Self::State, _action: &Self::Action, _to: &Self::State) -> i64 {
        1
    }
}

/// A state reached during search, together with how it was reached.
#[derive(Debug)]
pub struct Node<S, A> {
    pub state: S,
    pub parent: Option<Rc<Node<S, A>>>,
    pub action: Option<A>,
    pub path_cost: i64,
    pub depth: usize,
}

impl<S, A: Clone> Node<S, A> {
    pub fn root(state: S) -> Self {
        Node {
            state,
            parent: None,
            action: None,
            path_cost: 0,
            depth: 0,
        }
    }

    fn child(parent: &Rc<Self>, action: A, state: S, step_cost: i64) -> Self {
        Node {
            state,
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            path_cost: parent.path_cost + step_cost,
            depth: parent.depth + 1,
        }
    }

    /// Actions from the root to this node.
    pub fn solution(&self) -> Vec<A> {
        let mut actions = Vec::with_capacity(self.depth);
        let mut current = self;
        while let (Some(action), Some(parent)) = (&current.action, &current.parent) {
            actions.push(action.clone());
            current = &**parent;
        }
        actions.reverse();
        actions
    }

    /// States from the root to this node, inclusive.
    pub fn path(&self) -> Vec<&S> {
        let mut states = Vec::with_capacity(self.depth + 1);
        let mut current = self;
        loop {
            states.push(&current.state);
            match &current.parent {
                Some(parent) => current = &**parent,
                None => break,
            }
        }
        states.reverse();
        states
    }
}

/// Bounds on how much work a search may do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Stop after this many node expansions. `None` means unbounded.
    pub max_expansions: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
}

#[derive(Debug)]
pub enum SearchOutcome<S, A> {
    Solved {
        node: Rc<Node<S, A>>,
        stats: SearchStats,
    },
    /// Every reachable state was expanded without meeting a goal.
    Exhausted { stats: SearchStats },
    LimitReached { stats: SearchStats },
}

impl<S, A> SearchOutcome<S, A> {
    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Solved { stats, .. }
            | SearchOutcome::Exhausted { stats }
            | SearchOutcome::LimitReached { stats } => *stats,
        }
    }

    pub fn node(&self) -> Option<&Node<S, A>> {
        match self {
            SearchOutcome::Solved { node, .. } => Some(&**node),
            _ => None,
        }
    }
}

/// Expands nodes in increasing order of `f`, oldest first among equals.
pub fn best_first_graph_search<P, F>(
    problem: &P,
    f: F,
    limits: &SearchLimits,
) -> SearchOutcome<P::State, P::Action>
where
    P: SearchProblem,
    F: Fn(&Node<P::State, P::Action>) -> i64,
{
    // For priority queue
    struct Entry<S, A> {
        priority: i64,
        sequence: usize,
        node: Rc<Node<S, A>>,
    }

    impl<S, A> PartialEq for Entry<S, A> {
        fn eq(&self, other: &Self) -> bool {
            self.cmp(other) == Ordering::Equal
        }
    }

    impl<S, A> Eq for Entry<S, A> {}

    impl<S, A> Ord for Entry<S, A> {
        fn cmp(&self, other: &Self) -> Ordering {
            // Reverse ordering for min-heap behavior
            other
                .priority
                .cmp(&self.priority)
                .then_with(|| other.sequence.cmp(&self.sequence))
        }
    }

    impl<S, A> PartialOrd for Entry<S, A> {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    let mut stats = SearchStats::default();
    let mut frontier = BinaryHeap::new();
    let mut explored: HashSet<P::State> = HashSet::new();

    let root = Rc::new(Node::root(problem.initial().clone()));
    frontier.push(Entry {
        priority: f(&*root),
        sequence: 0,
        node: root,
    });
    stats.generated += 1;

    debug!("search started");

    while let Some(Entry { node, .. }) = frontier.pop() {
        if problem.is_goal(&node.state) {
            debug!(
                expanded = stats.expanded,
                generated = stats.generated,
                depth = node.depth,
                "search solved"
            );
            return SearchOutcome::Solved { node, stats };
        }
        if !explored.insert(node.state.clone()) {
            continue;
        }
        if limits.max_expansions.is_some_and(|max| stats.expanded >= max) {
            warn!(expanded = stats.expanded, "search expansion limit reached");
            return SearchOutcome::LimitReached { stats };
        }
        stats.expanded += 1;

        for (action, state) in problem.successors(&node.state) {
            if explored.contains(&state) {
                continue;
            }
            let cost = problem.step_cost(&node.state, &action, &state);
            let child = Rc::new(Node::child(&node, action, state, cost));
            frontier.push(Entry {
                priority: f(&*child),
                sequence: stats.generated,
                node: child,
            });
            stats.generated += 1;
        }
    }

    debug!(
        expanded = stats.expanded,
        generated = stats.generated,
        "search exhausted"
    );
    SearchOutcome::Exhausted { stats }
}

/// A* search: best-first on path cost plus the problem's heuristic.
pub fn astar_search<P: SearchProblem>(
    problem: &P,
    limits: &SearchLimits,
) -> SearchOutcome<P::State, P::Action> {
    best_first_graph_search(problem, |node| node.path_cost + problem.heuristic(node), limits)
}
