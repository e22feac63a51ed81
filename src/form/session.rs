//! Form session: owns the state and runs the commands it produces
//!
//! The state lock is never held across a network call. Several commands
//! may be in flight at once; `FormState` decides which results still count.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{AddressField, ParcelField};
use super::client::RelayClient;
use super::state::{AddressSide, Command, FormEvent, FormState};

#[derive(Clone)]
pub struct FormSession {
    state: Arc<Mutex<FormState>>,
    client: RelayClient,
}

impl FormSession {
    pub fn new(client: RelayClient) -> Self {
        Self::with_state(client, FormState::new())
    }

    pub fn with_state(client: RelayClient, state: FormState) -> Self {
        FormSession {
            state: Arc::new(Mutex::new(state)),
            client,
        }
    }

    /// Copy of the current state, for rendering
    pub fn snapshot(&self) -> FormState {
        self.state.lock().clone()
    }

    /// Apply an event without running the resulting command
    pub fn dispatch(&self, event: FormEvent) -> Option<Command> {
        self.state.lock().update(event)
    }

    /// Run a command against the relay and feed its result back in
    pub async fn execute(&self, command: Command) {
        let event = match command {
            Command::FetchRates { seq, request } => {
                debug!(seq, "Requesting rates");
                let result = self.client.get_rates(&request).await.map_err(|e| {
                    warn!(seq, error = %e, "Rate request failed");
                    e.to_string()
                });
                FormEvent::RatesLoaded { seq, result }
            }
            Command::BuyLabel { seq, rate_id } => {
                debug!(seq, rate_id = %rate_id, "Purchasing label");
                let result = self.client.purchase_label(&rate_id).await.map_err(|e| {
                    warn!(seq, error = %e, "Label purchase failed");
                    e.to_string()
                });
                FormEvent::LabelLoaded { seq, result }
            }
        };

        // Result events never produce follow-up commands
        self.dispatch(event);
    }

    /// Apply an event and run whatever it asks for
    pub async fn send(&self, event: FormEvent) {
        if let Some(command) = self.dispatch(event) {
            self.execute(command).await;
        }
    }

    pub fn edit_address(&self, side: AddressSide, field: AddressField, value: impl Into<String>) {
        self.dispatch(FormEvent::EditAddress {
            side,
            field,
            value: value.into(),
        });
    }

    pub fn edit_parcel(&self, field: ParcelField, value: impl Into<String>) {
        self.dispatch(FormEvent::EditParcel {
            field,
            value: value.into(),
        });
    }

    pub async fn request_rates(&self) {
        self.send(FormEvent::SubmitQuote).await;
    }

    pub fn select_rate(&self, rate_id: impl Into<String>) {
        self.dispatch(FormEvent::SelectRate(rate_id.into()));
    }

    pub async fn purchase_label(&self) {
        self.send(FormEvent::PurchaseLabel).await;
    }

    pub fn close_label(&self) {
        self.dispatch(FormEvent::CloseLabel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_session() -> FormSession {
        // Nothing listens here; tests below must not reach the network
        FormSession::new(RelayClient::new("http://127.0.0.1:9").unwrap())
    }

    #[test]
    fn test_purchase_without_selection_returns_immediately() {
        let session = offline_session();
        tokio_test::block_on(session.purchase_label());

        let state = session.snapshot();
        assert!(!state.purchasing);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_invalid_form_never_sends() {
        let session = offline_session();
        tokio_test::block_on(session.request_rates());

        let state = session.snapshot();
        assert!(!state.loading_rates);
        assert_eq!(state.error.as_deref(), Some("from address: name is required"));
    }

    #[test]
    fn test_edits_are_applied() {
        let session = offline_session();
        session.edit_address(AddressSide::To, AddressField::Zip, "80003");
        session.edit_parcel(ParcelField::MassUnit, "kg");

        let state = session.snapshot();
        assert_eq!(state.to.zip, "80003");
        assert_eq!(state.parcel.mass_unit, "kg");
    }

    #[test]
    fn test_clones_share_state() {
        let session = offline_session();
        let other = session.clone();
        other.edit_address(AddressSide::From, AddressField::Name, "Sam");
        assert_eq!(session.snapshot().from.name, "Sam");
        session.close_label();
    }
}
