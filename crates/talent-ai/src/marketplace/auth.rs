use serde::{Deserialize, Serialize};

use super::error::UnauthorizedError;

/// Identifier wrapper for console operators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperatorId(pub String);

/// Authenticated operator supplied by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorIdentity {
    pub id: OperatorId,
    pub name: String,
}

/// Resolves a bearer credential to an operator identity.
pub trait AuthGateway: Send + Sync {
    fn authenticate(&self, token: &str) -> Option<OperatorIdentity>;
}

/// Read-time lookup of operator display names, so note authors reflect
/// roster renames instead of a stored duplicate.
pub trait OperatorDirectory: Send + Sync {
    fn display_name(&self, id: &OperatorId) -> Option<String>;
}

/// Console operations take `Option<&OperatorIdentity>` and reject `None`.
pub fn require_operator(
    identity: Option<&OperatorIdentity>,
) -> Result<&OperatorIdentity, UnauthorizedError> {
    identity.ok_or(UnauthorizedError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_operator_rejects_missing_identity() {
        assert_eq!(require_operator(None), Err(UnauthorizedError));
    }

    #[test]
    fn require_operator_passes_identity_through() {
        let identity = OperatorIdentity {
            id: OperatorId("op-1".to_string()),
            name: "Ava Reviewer".to_string(),
        };
        let resolved = require_operator(Some(&identity)).expect("identity accepted");
        assert_eq!(resolved.id, identity.id);
    }
}
