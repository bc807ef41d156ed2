use axum::async_trait;
use rand::Rng;

/// Result of polling the upstream SMS provider for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsPoll {
    /// A code arrived for the number.
    Delivered(String),
    /// Still waiting; the order stays pending.
    Waiting,
    /// The provider gave up on the number.
    Expired,
}

/// Upstream virtual-number provider. The real integration lives outside this
/// service; handlers only see this seam.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Ask for a number. `None` means the provider accepted the request but
    /// has not assigned a number yet.
    async fn provision(&self, service: &str, country: &str) -> anyhow::Result<Option<String>>;

    /// Poll for an SMS code on a previously provisioned number.
    async fn poll_sms(&self, number: &str) -> anyhow::Result<SmsPoll>;
}

/// Development stand-in: hands out random numbers, never delivers a code.
#[derive(Clone, Default)]
pub struct StubProvisioner;

#[async_trait]
impl Provisioner for StubProvisioner {
    async fn provision(&self, _service: &str, _country: &str) -> anyhow::Result<Option<String>> {
        let mut rng = rand::thread_rng();
        let digits: String = (0..10).map(|_| rng.gen_range(0..10).to_string()).collect();
        Ok(Some(format!("+1{digits}")))
    }

    async fn poll_sms(&self, _number: &str) -> anyhow::Result<SmsPoll> {
        Ok(SmsPoll::Waiting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_hands_out_plausible_numbers() {
        let number = StubProvisioner
            .provision("WhatsApp", "US")
            .await
            .expect("provision")
            .expect("number assigned");
        assert!(number.starts_with("+1"));
        assert_eq!(number.len(), 12);
    }

    #[tokio::test]
    async fn stub_never_delivers() {
        let poll = StubProvisioner.poll_sms("+10000000000").await.expect("poll");
        assert_eq!(poll, SmsPoll::Waiting);
    }
}
