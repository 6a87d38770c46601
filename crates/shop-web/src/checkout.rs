//! Checkout Initiation
//!
//! Buy-button state machine: `Idle` → `Pending` on click, then either
//! `Redirecting` (browser leaves for the checkout URL) or back to `Idle`
//! with an alert. Clicks outside `Idle` are ignored.

use async_trait::async_trait;

/// Alert shown when the checkout session could not be created
pub const CHECKOUT_FAILURE_MESSAGE: &str = "Falha ao redirecionar ao checkout";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Pending,
    Redirecting,
}

impl CheckoutPhase {
    /// Button is disabled in every phase but `Idle`
    pub fn is_busy(self) -> bool {
        self != CheckoutPhase::Idle
    }
}

/// Internal checkout endpoint
#[async_trait(?Send)]
pub trait CheckoutApi {
    /// Create a session for `price_id` and return its checkout URL
    async fn create_checkout_session(&self, price_id: &str) -> Result<String, String>;
}

/// Browser side effects
pub trait Browser {
    /// Full page navigation
    fn navigate(&self, url: &str);

    /// Blocking alert
    fn alert(&self, message: &str);
}

/// Where the page keeps its checkout phase
pub trait PhaseSlot {
    fn phase(&self) -> CheckoutPhase;
    fn set_phase(&self, phase: CheckoutPhase);
}

impl PhaseSlot for std::cell::Cell<CheckoutPhase> {
    fn phase(&self) -> CheckoutPhase {
        self.get()
    }

    fn set_phase(&self, phase: CheckoutPhase) {
        self.set(phase);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Click arrived while a checkout was already under way
    Ignored,
    Redirected(String),
    Failed(String),
}

/// Handle one click on the buy button
pub async fn initiate_checkout<A, B, S>(
    api: &A,
    browser: &B,
    slot: &S,
    price_id: &str,
) -> CheckoutOutcome
where
    A: CheckoutApi + ?Sized,
    B: Browser + ?Sized,
    S: PhaseSlot + ?Sized,
{
    if slot.phase().is_busy() {
        return CheckoutOutcome::Ignored;
    }
    slot.set_phase(CheckoutPhase::Pending);

    match api.create_checkout_session(price_id).await {
        Ok(url) => {
            // Navigation unloads the page; the phase is never reset
            slot.set_phase(CheckoutPhase::Redirecting);
            browser.navigate(&url);
            CheckoutOutcome::Redirected(url)
        }
        Err(err) => {
            slot.set_phase(CheckoutPhase::Idle);
            browser.alert(CHECKOUT_FAILURE_MESSAGE);
            CheckoutOutcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    use tokio::sync::oneshot;

    const PRICE: &str = "price_1MDxeNLvBeyondLimits";
    const SESSION_URL: &str = "https://pay.example/session/abc";

    /// Answers with a fixed result, or waits for one when gated
    struct FakeApi {
        requests: RefCell<Vec<String>>,
        response: Result<String, String>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        phase_during_request: Cell<Option<CheckoutPhase>>,
        observed: Option<std::rc::Rc<Cell<CheckoutPhase>>>,
    }

    impl FakeApi {
        fn answering(response: Result<String, String>) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                response,
                gate: RefCell::new(None),
                phase_during_request: Cell::new(None),
                observed: None,
            }
        }
    }

    #[async_trait(?Send)]
    impl CheckoutApi for FakeApi {
        async fn create_checkout_session(&self, price_id: &str) -> Result<String, String> {
            self.requests.borrow_mut().push(price_id.to_string());
            if let Some(slot) = &self.observed {
                self.phase_during_request.set(Some(slot.get()));
            }
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.response.clone()
        }
    }

    #[derive(Default)]
    struct FakeBrowser {
        navigations: RefCell<Vec<String>>,
        alerts: RefCell<Vec<String>>,
    }

    impl Browser for FakeBrowser {
        fn navigate(&self, url: &str) {
            self.navigations.borrow_mut().push(url.to_string());
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    #[tokio::test]
    async fn test_success_navigates_to_checkout_url() {
        let slot = std::rc::Rc::new(Cell::new(CheckoutPhase::Idle));
        let mut api = FakeApi::answering(Ok(SESSION_URL.into()));
        api.observed = Some(std::rc::Rc::clone(&slot));
        let browser = FakeBrowser::default();

        let outcome = initiate_checkout(&api, &browser, slot.as_ref(), PRICE).await;

        assert_eq!(outcome, CheckoutOutcome::Redirected(SESSION_URL.into()));
        assert_eq!(api.phase_during_request.get(), Some(CheckoutPhase::Pending));
        assert_eq!(*api.requests.borrow(), vec![PRICE.to_string()]);
        assert_eq!(*browser.navigations.borrow(), vec![SESSION_URL.to_string()]);
        assert!(browser.alerts.borrow().is_empty());
        assert_eq!(slot.get(), CheckoutPhase::Redirecting);
        assert!(slot.get().is_busy());
    }

    #[tokio::test]
    async fn test_failure_alerts_and_reenables() {
        let slot = Cell::new(CheckoutPhase::Idle);
        let api = FakeApi::answering(Err("HTTP 500".into()));
        let browser = FakeBrowser::default();

        let outcome = initiate_checkout(&api, &browser, &slot, PRICE).await;

        assert_eq!(outcome, CheckoutOutcome::Failed("HTTP 500".into()));
        assert_eq!(slot.get(), CheckoutPhase::Idle);
        assert_eq!(*browser.alerts.borrow(), vec![CHECKOUT_FAILURE_MESSAGE.to_string()]);
        assert!(browser.navigations.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_user_can_retry_after_failure() {
        let slot = Cell::new(CheckoutPhase::Idle);
        let browser = FakeBrowser::default();

        let failing = FakeApi::answering(Err("network".into()));
        initiate_checkout(&failing, &browser, &slot, PRICE).await;

        let working = FakeApi::answering(Ok(SESSION_URL.into()));
        let outcome = initiate_checkout(&working, &browser, &slot, PRICE).await;

        assert_eq!(outcome, CheckoutOutcome::Redirected(SESSION_URL.into()));
        assert_eq!(browser.alerts.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_clicks_while_pending_are_ignored() {
        let slot = Cell::new(CheckoutPhase::Idle);
        let browser = FakeBrowser::default();
        let (release, gate) = oneshot::channel();
        let api = FakeApi::answering(Ok(SESSION_URL.into()));
        *api.gate.borrow_mut() = Some(gate);

        let (api_ref, browser_ref, slot_ref) = (&api, &browser, &slot);
        let first = initiate_checkout(api_ref, browser_ref, slot_ref, PRICE);
        let repeated = async move {
            tokio::task::yield_now().await;
            let second = initiate_checkout(api_ref, browser_ref, slot_ref, PRICE).await;
            let third = initiate_checkout(api_ref, browser_ref, slot_ref, PRICE).await;
            let _ = release.send(());
            (second, third)
        };

        let (first, (second, third)) = tokio::join!(first, repeated);

        assert_eq!(first, CheckoutOutcome::Redirected(SESSION_URL.into()));
        assert_eq!(second, CheckoutOutcome::Ignored);
        assert_eq!(third, CheckoutOutcome::Ignored);
        assert_eq!(api.requests.borrow().len(), 1);
        assert_eq!(browser.navigations.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_click_while_redirecting_is_ignored() {
        let slot = Cell::new(CheckoutPhase::Redirecting);
        let api = FakeApi::answering(Ok(SESSION_URL.into()));
        let browser = FakeBrowser::default();

        let outcome = initiate_checkout(&api, &browser, &slot, PRICE).await;

        assert_eq!(outcome, CheckoutOutcome::Ignored);
        assert!(api.requests.borrow().is_empty());
    }
}
