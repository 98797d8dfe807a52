//! Failover policies.

use std::fmt;
use std::sync::Arc;

use crate::error::Error;

/// Caller-supplied predicate consulted before each rotation.
///
/// Receives the endpoint that failed, the endpoint the ring is about to move
/// to, and the failure. Returning `true` stops skipping endpoints and retries
/// from the new head.
pub type DecisionHook = Arc<dyn Fn(&str, Option<&str>, &Error) -> bool + Send + Sync>;

/// What to do after an attempt fails.
#[derive(Clone, Default)]
pub enum FailoverPolicy {
    /// Return the first failure unchanged, leaving the ring untouched.
    NoRotate,
    /// Rotate once per failure and try the next endpoint.
    #[default]
    AlwaysRotate,
    /// Rotate past endpoints until the hook approves one.
    RotateUntilHookApproves(DecisionHook),
}

impl FailoverPolicy {
    /// Select a policy from the `auto_update` flag and an optional hook.
    pub fn new(auto_update: bool, hook: Option<DecisionHook>) -> Self {
        match (auto_update, hook) {
            (false, _) => FailoverPolicy::NoRotate,
            (true, None) => FailoverPolicy::AlwaysRotate,
            (true, Some(hook)) => FailoverPolicy::RotateUntilHookApproves(hook),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, FailoverPolicy::NoRotate)
    }
}

impl fmt::Debug for FailoverPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailoverPolicy::NoRotate => f.write_str("NoRotate"),
            FailoverPolicy::AlwaysRotate => f.write_str("AlwaysRotate"),
            FailoverPolicy::RotateUntilHookApproves(_) => {
                f.write_str("RotateUntilHookApproves(<hook>)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_selection() {
        let hook: DecisionHook = Arc::new(|_: &str, _: Option<&str>, _: &Error| true);

        assert!(matches!(FailoverPolicy::new(false, None), FailoverPolicy::NoRotate));
        assert!(matches!(
            FailoverPolicy::new(false, Some(hook.clone())),
            FailoverPolicy::NoRotate
        ));
        assert!(matches!(FailoverPolicy::new(true, None), FailoverPolicy::AlwaysRotate));
        assert!(matches!(
            FailoverPolicy::new(true, Some(hook)),
            FailoverPolicy::RotateUntilHookApproves(_)
        ));
    }

    #[test]
    fn test_debug_hides_hook() {
        let policy = FailoverPolicy::new(true, Some(Arc::new(|_: &str, _: Option<&str>, _: &Error| false)));
        assert_eq!(format!("{:?}", policy), "RotateUntilHookApproves(<hook>)");
        assert!(policy.is_enabled());
        assert!(!FailoverPolicy::NoRotate.is_enabled());
    }
}
