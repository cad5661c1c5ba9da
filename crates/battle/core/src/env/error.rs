use crate::state::EnemyId;

/// Errors surfaced when required content is unavailable.
///
/// Missing *attack* and *card* definitions are not errors: content is
/// externally authored and may be incomplete during development, so those
/// lookups skip-and-log instead. A missing *enemy* definition is different:
/// a battle cannot start without its participants.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("enemy definition not found: {0}")]
    EnemyNotFound(EnemyId),
}
