use serde::{Deserialize, Serialize};

use crate::domain::employee::EmployeeId;

/// Eligibility facts for one authorization query, derived from the full set
/// of author-to-root paths. Returned fresh per query; the facts are the
/// logical OR across all paths and are not mutually exclusive (an approver
/// may be a direct manager on one path and an indirect manager on another).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_self: bool,
    pub is_direct_manager: bool,
    pub is_indirect_manager: bool,
    pub shortest_path: Option<Vec<EmployeeId>>,
}

impl Classification {
    pub fn eligible(&self) -> bool {
        self.is_self || self.is_direct_manager || self.is_indirect_manager
    }
}

/// Classifies `approver` relative to `author` over the enumerated paths.
/// An empty path set (author unreachable from the root) leaves every fact
/// false and the shortest path absent.
pub fn classify(
    paths: &[Vec<EmployeeId>],
    author: EmployeeId,
    approver: EmployeeId,
) -> Classification {
    let mut facts = Classification::default();

    for path in paths {
        if approver == author {
            facts.is_self = true;
        } else {
            if path.get(1) == Some(&approver) {
                facts.is_direct_manager = true;
            }
            if path.iter().skip(2).any(|employee| *employee == approver) {
                facts.is_indirect_manager = true;
            }
        }

        // Strictly shorter replaces; ties keep the first path enumerated.
        let replace =
            facts.shortest_path.as_ref().map_or(true, |shortest| path.len() < shortest.len());
        if replace {
            facts.shortest_path = Some(path.clone());
        }
    }

    facts
}
