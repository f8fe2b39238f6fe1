use thiserror::Error;

/// Checked access to a value that may not be there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("optional is empty")]
    Empty,
    #[error("alternative {requested} was requested but alternative {active} is active")]
    WrongAlternative { requested: usize, active: usize },
}

/// Two variants were covisited while holding different alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("covisited variants hold different alternatives ({ours} and {theirs})")]
pub struct IndexMismatch {
    pub ours: usize,
    pub theirs: usize,
}

#[test]
fn test_messages() {
    let err = AccessError::WrongAlternative {
        requested: 2,
        active: 0,
    };
    assert_eq!(
        err.to_string(),
        "alternative 2 was requested but alternative 0 is active"
    );
    assert_eq!(AccessError::Empty.to_string(), "optional is empty");
    let mismatch = IndexMismatch { ours: 1, theirs: 3 };
    assert_eq!(
        mismatch.to_string(),
        "covisited variants hold different alternatives (1 and 3)"
    );
}
