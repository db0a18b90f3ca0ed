use std::collections::{BTreeSet, HashMap, HashSet};

use crate::domain::employee::EmployeeId;
use crate::errors::HierarchyError;

/// The management hierarchy as a directed graph: an edge from employee `e`
/// to manager `m` means `m` directly manages `e`. Edges are established once
/// at setup and read per authorization query.
#[derive(Clone, Debug, Default)]
pub struct OrgHierarchy {
    managers: HashMap<EmployeeId, Vec<EmployeeId>>,
    known: BTreeSet<EmployeeId>,
}

impl OrgHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `manager` as a direct manager of `subordinate`. Re-adding an
    /// existing edge is a no-op.
    pub fn add_manager(&mut self, subordinate: EmployeeId, manager: EmployeeId) {
        let managers = self.managers.entry(subordinate).or_default();
        if !managers.contains(&manager) {
            managers.push(manager);
        }
        self.known.insert(subordinate);
        self.known.insert(manager);
    }

    pub fn contains(&self, employee: EmployeeId) -> bool {
        self.known.contains(&employee)
    }

    pub fn employees(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.known.iter().copied()
    }

    /// Direct managers of `employee`, in edge-insertion order. That order
    /// fixes which path wins shortest-path ties downstream.
    pub fn direct_managers(&self, employee: EmployeeId) -> &[EmployeeId] {
        self.managers.get(&employee).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every simple path from `start` to `end` along the reporting relation.
    /// `start == end` yields the single-element path; an empty result means
    /// `end` is unreachable from `start`, which is a value for the caller to
    /// report, not an error. The visited set also bounds traversal should a
    /// malformed chart contain a cycle.
    pub fn all_paths(&self, start: EmployeeId, end: EmployeeId) -> Vec<Vec<EmployeeId>> {
        let mut paths = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Vec::new();
        self.collect_paths(start, end, &mut visited, &mut current, &mut paths);
        paths
    }

    fn collect_paths(
        &self,
        at: EmployeeId,
        end: EmployeeId,
        visited: &mut HashSet<EmployeeId>,
        current: &mut Vec<EmployeeId>,
        paths: &mut Vec<Vec<EmployeeId>>,
    ) {
        visited.insert(at);
        current.push(at);

        if at == end {
            paths.push(current.clone());
        } else {
            for manager in self.direct_managers(at) {
                if !visited.contains(manager) {
                    self.collect_paths(*manager, end, visited, current, paths);
                }
            }
        }

        current.pop();
        visited.remove(&at);
    }

    /// Structural root discovery: the unique known employee with no managers.
    pub fn find_root(&self) -> Result<EmployeeId, HierarchyError> {
        let roots: Vec<EmployeeId> = self
            .known
            .iter()
            .copied()
            .filter(|employee| self.direct_managers(*employee).is_empty())
            .collect();

        match roots.as_slice() {
            [] => Err(HierarchyError::RootNotFound),
            [root] => Ok(*root),
            _ => Err(HierarchyError::AmbiguousRoot { candidates: roots }),
        }
    }
}
