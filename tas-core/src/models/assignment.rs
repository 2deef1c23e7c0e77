use super::CostMatrix;

/// The result of a solve: for each agent, the task it was assigned, if any.
///
/// The length always equals the number of agents (rows) of the matrix that was
/// solved. An agent is left unassigned only when there are more agents than
/// tasks. Externally (serde, [`Assignment::to_signed`]) unassigned agents are
/// represented by `-1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<i64>", into = "Vec<i64>")
)]
pub struct Assignment(Vec<Option<usize>>);

impl Assignment {
    /// The number of agents
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no agents at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The task assigned to `agent`, or None if unassigned (or out of range)
    pub fn get(&self, agent: usize) -> Option<usize> {
        self.0.get(agent).copied().flatten()
    }

    /// Iterates over the per-agent tasks
    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.0.iter().copied()
    }

    /// Iterates over the (agent, task) pairs that were actually matched
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(agent, task)| task.map(|task| (agent, task)))
    }

    /// The number of agents that received a task
    pub fn assigned_count(&self) -> usize {
        self.0.iter().filter(|task| task.is_some()).count()
    }

    /// The per-agent tasks using `-1` for unassigned agents
    pub fn to_signed(&self) -> Vec<i64> {
        self.0
            .iter()
            .map(|task| task.map_or(-1, |task| task as i64))
            .collect()
    }

    /// Sums `costs[agent, task]` over every matched pair.
    ///
    /// # Panics
    ///
    /// Panics if a pair lies outside `costs`; use [`Assignment::is_valid_for`] first
    /// when the assignment did not come from solving that same matrix.
    pub fn total_cost(&self, costs: &CostMatrix) -> f64 {
        self.pairs().map(|(agent, task)| costs.get(agent, task)).sum()
    }

    /// Checks the shape contract against the matrix this assignment claims to solve:
    /// one entry per row, every task a valid column, and no task used twice.
    pub fn is_valid_for(&self, costs: &CostMatrix) -> bool {
        if self.len() != costs.rows() {
            return false;
        }

        let mut used = vec![false; costs.cols()];
        for (_, task) in self.pairs() {
            if task >= costs.cols() || used[task] {
                return false;
            }
            used[task] = true;
        }
        true
    }

    /// Consumes the assignment, returning the per-agent tasks
    pub fn into_inner(self) -> Vec<Option<usize>> {
        self.0
    }
}

impl From<Vec<Option<usize>>> for Assignment {
    fn from(value: Vec<Option<usize>>) -> Self {
        Self(value)
    }
}

impl FromIterator<Option<usize>> for Assignment {
    fn from_iter<I: IntoIterator<Item = Option<usize>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Assignment> for Vec<i64> {
    fn from(value: Assignment) -> Self {
        value.to_signed()
    }
}

impl TryFrom<Vec<i64>> for Assignment {
    type Error = AssignmentError;

    fn try_from(value: Vec<i64>) -> Result<Self, Self::Error> {
        value
            .into_iter()
            .enumerate()
            .map(|(agent, task)| match task {
                -1 => Ok(None),
                task => usize::try_from(task)
                    .map(Some)
                    .map_err(|_| AssignmentError::NegativeTask { agent, task }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Errors that can occur when reading an Assignment from its signed form
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AssignmentError {
    /// Error when an entry is negative but not the `-1` sentinel
    #[error("agent {agent} has task {task}; only -1 may be negative")]
    NegativeTask {
        /// The offending agent
        agent: usize,
        /// The offending entry
        task: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CostMatrix {
        CostMatrix::from_rows(vec![vec![2.0, 8.0], vec![4.0, 6.0], vec![5.0, 1.0]]).unwrap()
    }

    #[test]
    fn test_total_cost_skips_unassigned() {
        let assignment = Assignment::from(vec![Some(1), None, Some(0)]);
        assert_eq!(assignment.total_cost(&matrix()), 13.0);
        assert_eq!(assignment.assigned_count(), 2);
        assert_eq!(assignment.get(1), None);
        assert_eq!(assignment.get(7), None);
        assert_eq!(assignment.to_signed(), vec![1, -1, 0]);
    }

    #[test]
    fn test_validity() {
        let costs = matrix();
        assert!(Assignment::from(vec![Some(1), None, Some(0)]).is_valid_for(&costs));
        // wrong length
        assert!(!Assignment::from(vec![Some(1), Some(0)]).is_valid_for(&costs));
        // task out of range
        assert!(!Assignment::from(vec![Some(2), None, Some(0)]).is_valid_for(&costs));
        // task used twice
        assert!(!Assignment::from(vec![Some(0), None, Some(0)]).is_valid_for(&costs));
    }

    #[test]
    fn test_signed_conversion() {
        assert_eq!(
            Assignment::try_from(vec![3, -1, 0]).unwrap(),
            Assignment::from(vec![Some(3), None, Some(0)])
        );
        assert_eq!(
            Assignment::try_from(vec![0, -2]).unwrap_err(),
            AssignmentError::NegativeTask { agent: 1, task: -2 }
        );
    }

    #[test]
    fn test_assignment_serde() {
        let assignment: Assignment = serde_json::from_str("[1, -1, 0]").unwrap();
        assert_eq!(assignment, Assignment::from(vec![Some(1), None, Some(0)]));
        assert_eq!(serde_json::to_string(&assignment).unwrap(), "[1,-1,0]");
    }
}
