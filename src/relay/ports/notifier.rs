//! Operator notification sink.

use async_trait::async_trait;

/// Capability to report failures to the deployment's operators.
///
/// Delivery is best effort: implementations swallow their own failures so a
/// broken notification path never masks the error being reported.
#[async_trait]
pub trait OperatorNotifier: Send + Sync {
    /// Sends `report` to every operator.
    async fn notify(&self, report: &str);
}
