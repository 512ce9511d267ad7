use thiserror::Error;

/// Broken or unsatisfiable governance state. Always fatal for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("architecture {architecture_id} has {} mayors: {mayors:?}", .mayors.len())]
    MultipleMayors {
        architecture_id: u64,
        mayors: Vec<u64>,
    },

    #[error("architecture {architecture_id} is owned and occupied but has no mayor")]
    MissingMayor { architecture_id: u64 },

    #[error("architecture {architecture_id} is unowned or empty but person {person_id} is mayor")]
    UnexpectedMayor {
        architecture_id: u64,
        person_id: u64,
    },

    #[error("person {person_id} is not resident at architecture {architecture_id}")]
    NotResident {
        person_id: u64,
        architecture_id: u64,
    },

    #[error("architecture {architecture_id} has no owning faction")]
    Unowned { architecture_id: u64 },

    #[error(
        "faction leader {leader_id} is present at architecture {architecture_id} and must stay mayor"
    )]
    LeaderPresent {
        architecture_id: u64,
        leader_id: u64,
    },
}

/// Failure while reading or writing scenario records. Aborts the load.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported record version {0}")]
    UnsupportedVersion(u32),

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: malformed record: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: cannot parse {field} from {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: {table} id {id} does not exist")]
    UnresolvedReference {
        line: usize,
        table: &'static str,
        id: u64,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Top-level error for simulation operations.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("governance invariant violated: {0}")]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("unknown architecture {0}")]
    UnknownArchitecture(u64),

    #[error("unknown architecture kind {0}")]
    UnknownArchitectureKind(u64),

    #[error("unknown person {0}")]
    UnknownPerson(u64),

    #[error("unknown section {0}")]
    UnknownSection(u64),

    #[error("unknown military kind {0}")]
    UnknownMilitaryKind(u64),

    #[error("architecture {architecture_id} is not licensed to create military kind {kind_id}")]
    NotLicensed { architecture_id: u64, kind_id: u64 },

    #[error("architecture {0} has no owner")]
    Unowned(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_mayors_message_lists_ids() {
        let err = GovernanceError::MultipleMayors {
            architecture_id: 7,
            mayors: vec![1, 2],
        };
        assert_eq!(err.to_string(), "architecture 7 has 2 mayors: [1, 2]");
    }

    #[test]
    fn governance_error_converts_into_sim_error() {
        let err: SimError = GovernanceError::Unowned { architecture_id: 3 }.into();
        assert!(matches!(err, SimError::Governance(GovernanceError::Unowned { .. })));
    }
}
