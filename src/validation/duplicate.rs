use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

use crate::remote::RegistryEndpoint;
use crate::utils::FormError;

/// Generation number of one issued duplicate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// Result of the most recently issued check.
    Current(bool),
    /// A newer check was issued while this one was in flight.
    Superseded,
}

/// Remote passport uniqueness lookups where only the latest issued check
/// counts. Requests are never cancelled; stale answers are dropped when they
/// arrive.
#[derive(Debug, Default)]
pub struct DuplicateChecker {
    generation: AtomicU64,
}

impl DuplicateChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new check, invalidating every ticket issued before it.
    pub fn issue(&self) -> CheckTicket {
        CheckTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: CheckTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Keystroke path. Errors from a superseded request are dropped along
    /// with its answer.
    pub async fn check<E: RegistryEndpoint>(
        &self,
        endpoint: &E,
        passport_number: &str,
    ) -> Result<CheckResult, FormError> {
        let ticket = self.issue();
        let result = endpoint.check_duplicate(passport_number).await;

        if !self.is_current(ticket) {
            debug!("Discarding superseded duplicate check #{} for {}", ticket.0, passport_number);
            return Ok(CheckResult::Superseded);
        }

        match result {
            Ok(is_duplicate) => Ok(CheckResult::Current(is_duplicate)),
            Err(e) => {
                warn!("Duplicate check for {} failed: {}", passport_number, e);
                Err(e)
            }
        }
    }

    /// Submission path. Invalidates pending keystroke checks and always
    /// reports its own answer.
    pub async fn check_authoritative<E: RegistryEndpoint>(
        &self,
        endpoint: &E,
        passport_number: &str,
    ) -> Result<bool, FormError> {
        let ticket = self.issue();
        debug!("Authoritative duplicate check #{} for {}", ticket.0, passport_number);
        endpoint.check_duplicate(passport_number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockEndpoint;
    use std::time::Duration;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let checker = DuplicateChecker::new();
        let first = checker.issue();
        assert!(checker.is_current(first));

        let second = checker.issue();
        assert!(!checker.is_current(first));
        assert!(checker.is_current(second));
    }

    #[tokio::test]
    async fn test_single_check_reports_flag() {
        let endpoint = MockEndpoint::new().with_duplicate("N1234567");
        let checker = DuplicateChecker::new();

        assert_eq!(
            checker.check(&endpoint, "N1234567").await.unwrap(),
            CheckResult::Current(true)
        );
        assert_eq!(
            checker.check(&endpoint, "N7654321").await.unwrap(),
            CheckResult::Current(false)
        );
        assert_eq!(endpoint.duplicate_queries(), vec!["N1234567", "N7654321"]);
    }

    #[tokio::test]
    async fn test_slow_older_check_is_discarded() {
        let endpoint = MockEndpoint::new()
            .with_duplicate("N123")
            .with_delay("N123", Duration::from_millis(80));
        let checker = DuplicateChecker::new();

        let (older, newer) = tokio::join!(checker.check(&endpoint, "N123"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            checker.check(&endpoint, "N1234567").await
        });

        assert_eq!(older.unwrap(), CheckResult::Superseded);
        assert_eq!(newer.unwrap(), CheckResult::Current(false));
    }

    #[tokio::test]
    async fn test_superseded_failure_is_swallowed() {
        let endpoint = MockEndpoint::new()
            .failing_duplicate_checks()
            .with_delay("N1", Duration::from_millis(50));
        let checker = DuplicateChecker::new();

        let (older, newer) = tokio::join!(checker.check(&endpoint, "N1"), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            checker.check(&endpoint, "N12").await
        });

        assert_eq!(older.unwrap(), CheckResult::Superseded);
        assert!(newer.is_err());
    }

    #[tokio::test]
    async fn test_authoritative_check_invalidates_pending_keystrokes() {
        let endpoint = MockEndpoint::new().with_delay("N1", Duration::from_millis(50));
        let checker = DuplicateChecker::new();

        let (keystroke, submission) = tokio::join!(checker.check(&endpoint, "N1"), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            checker.check_authoritative(&endpoint, "N1234567").await
        });

        assert_eq!(keystroke.unwrap(), CheckResult::Superseded);
        assert!(!submission.unwrap());
    }
}
