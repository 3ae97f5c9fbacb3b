//! Dependency graph construction and topological ordering.
//!
//! Builds a transient directed graph from a task-list snapshot: one node per
//! task (node index = task position) and an edge `dep -> task` for each
//! dependency. The graph is discarded after each scheduling pass, so it can
//! never go stale under edits.
//!
//! # Algorithm
//! Kahn's algorithm with a min-heap of ready nodes, so ties between
//! equally ready tasks resolve to original list order. If some nodes never
//! become ready the graph has a cycle; one concrete cycle is recovered by
//! walking unresolved predecessors until a node repeats.
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks";
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::Task;

/// Precedence graph over a task list.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<usize, ()>,
}

impl DependencyGraph {
    /// Builds the graph, rejecting out-of-range dependency indices.
    ///
    /// Duplicate references collapse to a single edge. Cycles are not
    /// checked here; see [`DependencyGraph::topological_order`].
    pub fn from_tasks(tasks: &[Task]) -> ScheduleResult<Self> {
        let len = tasks.len();
        let mut graph = DiGraph::with_capacity(len, len);
        for i in 0..len {
            graph.add_node(i);
        }

        for (i, task) in tasks.iter().enumerate() {
            for &dep in &task.dependencies {
                if dep >= len {
                    return Err(ScheduleError::InvalidDependencyReference {
                        task: i,
                        name: task.name.clone(),
                        dependency: dep,
                        len,
                    });
                }
                graph.update_edge(NodeIndex::new(dep), NodeIndex::new(i), ());
            }
        }

        Ok(Self { graph })
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of distinct dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Tasks that `task` depends on, ascending.
    pub fn predecessors(&self, task: usize) -> Vec<usize> {
        self.sorted_neighbors(task, Direction::Incoming)
    }

    /// Tasks that depend on `task`, ascending.
    pub fn successors(&self, task: usize) -> Vec<usize> {
        self.sorted_neighbors(task, Direction::Outgoing)
    }

    /// Whether `task` has no dependencies.
    pub fn is_source(&self, task: usize) -> bool {
        self.graph
            .neighbors_directed(NodeIndex::new(task), Direction::Incoming)
            .next()
            .is_none()
    }

    /// Whether nothing depends on `task`.
    pub fn is_sink(&self, task: usize) -> bool {
        self.graph
            .neighbors_directed(NodeIndex::new(task), Direction::Outgoing)
            .next()
            .is_none()
    }

    fn sorted_neighbors(&self, task: usize, dir: Direction) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(task), dir)
            .map(NodeIndex::index)
            .collect();
        out.sort_unstable();
        out
    }

    /// Deterministic topological order (lowest index first among ready tasks).
    ///
    /// `tasks` supplies names for the error; it must be the list the graph
    /// was built from.
    pub fn topological_order(&self, tasks: &[Task]) -> ScheduleResult<Vec<usize>> {
        let n = self.len();
        let mut in_degree: Vec<usize> = (0..n)
            .map(|i| {
                self.graph
                    .neighbors_directed(NodeIndex::new(i), Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);
            for next in self
                .graph
                .neighbors_directed(NodeIndex::new(node), Direction::Outgoing)
            {
                let j = next.index();
                in_degree[j] -= 1;
                if in_degree[j] == 0 {
                    ready.push(Reverse(j));
                }
            }
        }

        if order.len() == n {
            return Ok(order);
        }

        let cycle = self.find_cycle(&in_degree);
        let task = cycle.first().copied().unwrap_or_default();
        Err(ScheduleError::CyclicDependency {
            task,
            name: tasks.get(task).map(|t| t.name.clone()).unwrap_or_default(),
            cycle,
        })
    }

    /// Recovers one cycle among nodes left with positive in-degree.
    ///
    /// Every unresolved node has at least one unresolved predecessor, so
    /// walking predecessors must eventually revisit a node.
    fn find_cycle(&self, in_degree: &[usize]) -> Vec<usize> {
        let Some(start) = in_degree.iter().position(|&d| d > 0) else {
            return Vec::new();
        };

        let mut seen_at = vec![None; in_degree.len()];
        let mut walk = Vec::new();
        let mut current = start;
        loop {
            if let Some(pos) = seen_at[current] {
                let mut cycle: Vec<usize> = walk[pos..].to_vec();
                // The walk follows predecessors; flip to dependency order.
                cycle.reverse();
                if let Some(min_pos) = cycle
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, &t)| t)
                    .map(|(p, _)| p)
                {
                    cycle.rotate_left(min_pos);
                }
                return cycle;
            }
            seen_at[current] = Some(walk.len());
            walk.push(current);

            let next = self
                .graph
                .neighbors_directed(NodeIndex::new(current), Direction::Incoming)
                .map(NodeIndex::index)
                .filter(|&p| in_degree[p] > 0)
                .min();
            match next {
                Some(p) => current = p,
                None => return walk,
            }
        }
    }
}

/// Builds the graph and its topological order in one step.
pub fn build(tasks: &[Task]) -> ScheduleResult<(DependencyGraph, Vec<usize>)> {
    let graph = DependencyGraph::from_tasks(tasks)?;
    let order = graph.topological_order(tasks)?;
    Ok((graph, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleErrorKind;

    fn chain() -> Vec<Task> {
        vec![
            Task::new("A"),
            Task::new("B").with_dependency(0),
            Task::new("C").with_dependency(1),
        ]
    }

    #[test]
    fn test_build_chain() {
        let (graph, order) = build(&chain()).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(order, vec![0, 1, 2]);
        assert!(graph.is_source(0));
        assert!(graph.is_sink(2));
        assert_eq!(graph.predecessors(1), vec![0]);
        assert_eq!(graph.successors(1), vec![2]);
    }

    #[test]
    fn test_order_respects_dependencies_listed_later() {
        // Task 0 depends on task 2; list order alone would be wrong.
        let tasks = vec![
            Task::new("Ship").with_dependency(2),
            Task::new("Plan"),
            Task::new("Build").with_dependency(1),
        ];
        let (_, order) = build(&tasks).unwrap();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_break_by_list_order() {
        let tasks = vec![
            Task::new("A"),
            Task::new("B"),
            Task::new("C").with_dependencies([0, 1]),
            Task::new("D"),
        ];
        let (_, order) = build(&tasks).unwrap();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_duplicate_dependency_single_edge() {
        let mut tasks = chain();
        tasks[1].dependencies = vec![0, 0];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_invalid_reference() {
        let tasks = vec![Task::new("A"), Task::new("B").with_dependency(5)];
        let err = build(&tasks).unwrap_err();
        assert_eq!(err.kind(), ScheduleErrorKind::InvalidDependencyReference);
        match err {
            ScheduleError::InvalidDependencyReference {
                task,
                dependency,
                len,
                ..
            } => {
                assert_eq!(task, 1);
                assert_eq!(dependency, 5);
                assert_eq!(len, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_two_task_cycle() {
        let tasks = vec![
            Task::new("A").with_dependency(1),
            Task::new("B").with_dependency(0),
        ];
        let err = build(&tasks).unwrap_err();
        assert_eq!(err.kind(), ScheduleErrorKind::CyclicDependency);
        match err {
            ScheduleError::CyclicDependency { cycle, .. } => {
                let mut sorted = cycle.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, vec![0, 1]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_self_dependency_is_cycle() {
        let tasks = vec![Task::new("Loop").with_dependency(0)];
        let err = build(&tasks).unwrap_err();
        match err {
            ScheduleError::CyclicDependency { task, cycle, name } => {
                assert_eq!(task, 0);
                assert_eq!(cycle, vec![0]);
                assert_eq!(name, "Loop");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cycle_excludes_downstream_tasks() {
        // 1 -> 2 -> 3 -> 1 is a cycle; 4 only hangs off it.
        let tasks = vec![
            Task::new("Root"),
            Task::new("X").with_dependencies([0, 3]),
            Task::new("Y").with_dependency(1),
            Task::new("Z").with_dependency(2),
            Task::new("Tail").with_dependency(3),
        ];
        let err = build(&tasks).unwrap_err();
        match err {
            ScheduleError::CyclicDependency { task, cycle, .. } => {
                assert_eq!(task, 1);
                assert_eq!(cycle, vec![1, 2, 3]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_graph() {
        let (graph, order) = build(&[]).unwrap();
        assert!(graph.is_empty());
        assert!(order.is_empty());
    }
}
