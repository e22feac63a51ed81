//! Form state and its update function
//!
//! `FormState::update` never performs I/O. It mutates the state and hands
//! back at most one `Command` for the session to execute; the command's
//! result comes back in as another event tagged with the sequence number
//! it was issued under. Results carrying an outdated sequence number are
//! dropped, so the most recently *issued* request always wins.

use serde::Serialize;

use crate::domain::{
    validate_quote, Address, AddressField, LabelResult, Parcel, ParcelField, QuoteRequest, Rate,
};

/// Which of the two addresses an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSide {
    From,
    To,
}

/// Successful relay answer to a quote
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOutcome {
    pub rates: Vec<Rate>,
    /// Response body exactly as the relay sent it
    pub raw: serde_json::Value,
}

/// Everything that can happen to the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    EditAddress { side: AddressSide, field: AddressField, value: String },
    EditParcel { field: ParcelField, value: String },
    SubmitQuote,
    RatesLoaded { seq: u64, result: Result<QuoteOutcome, String> },
    SelectRate(String),
    PurchaseLabel,
    LabelLoaded { seq: u64, result: Result<LabelResult, String> },
    CloseLabel,
}

/// Network work requested by an update
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchRates { seq: u64, request: QuoteRequest },
    BuyLabel { seq: u64, rate_id: String },
}

/// State of one form session
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub from: Address,
    pub to: Address,
    pub parcel: Parcel,
    pub rates: Vec<Rate>,
    pub selected_rate_id: Option<String>,
    pub label: Option<LabelResult>,
    /// Label modal visibility
    pub label_open: bool,
    pub loading_rates: bool,
    pub purchasing: bool,
    pub error: Option<String>,
    /// Pretty-printed body of the last quote request sent
    pub request_json: String,
    /// Pretty-printed body of the last quote response received
    pub response_json: String,
    quote_seq: u64,
    label_seq: u64,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            from: Address::blank(),
            to: Address::demo_recipient(),
            parcel: Parcel::demo(),
            rates: Vec::new(),
            selected_rate_id: None,
            label: None,
            label_open: false,
            loading_rates: false,
            purchasing: false,
            error: None,
            request_json: String::new(),
            response_json: String::new(),
            quote_seq: 0,
            label_seq: 0,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The payload a quote submission would send right now
    pub fn quote_request(&self) -> QuoteRequest {
        QuoteRequest {
            from: self.from.clone(),
            to: self.to.clone(),
            parcel: self.parcel.clone(),
        }
    }

    pub fn address(&self, side: AddressSide) -> &Address {
        match side {
            AddressSide::From => &self.from,
            AddressSide::To => &self.to,
        }
    }

    pub fn selected_rate(&self) -> Option<&Rate> {
        let id = self.selected_rate_id.as_deref()?;
        self.rates.iter().find(|r| r.object_id == id)
    }

    /// Whether the purchase action should be enabled
    ///
    /// The rate list on screen is stale while a quote is loading, so
    /// nothing can be bought from it.
    pub fn can_purchase(&self) -> bool {
        self.selected_rate_id.is_some() && !self.purchasing && !self.loading_rates
    }

    pub fn update(&mut self, event: FormEvent) -> Option<Command> {
        match event {
            FormEvent::EditAddress { side, field, value } => {
                match side {
                    AddressSide::From => self.from.set(field, value),
                    AddressSide::To => self.to.set(field, value),
                }
                None
            }
            FormEvent::EditParcel { field, value } => {
                self.parcel.set(field, value);
                None
            }
            FormEvent::SubmitQuote => self.submit_quote(),
            FormEvent::RatesLoaded { seq, result } => {
                self.rates_loaded(seq, result);
                None
            }
            FormEvent::SelectRate(rate_id) => {
                if !self.loading_rates && self.rates.iter().any(|r| r.object_id == rate_id) {
                    self.selected_rate_id = Some(rate_id);
                }
                None
            }
            FormEvent::PurchaseLabel => self.purchase_label(),
            FormEvent::LabelLoaded { seq, result } => {
                self.label_loaded(seq, result);
                None
            }
            FormEvent::CloseLabel => {
                self.label_open = false;
                None
            }
        }
    }

    fn submit_quote(&mut self) -> Option<Command> {
        let request = self.quote_request();

        if let Err(e) = validate_quote(&request) {
            self.error = Some(e.to_string());
            return None;
        }

        self.quote_seq += 1;
        // A label bought against the old rate list is no longer wanted
        self.label_seq += 1;

        self.selected_rate_id = None;
        self.label = None;
        self.label_open = false;
        self.purchasing = false;
        self.error = None;
        self.loading_rates = true;
        self.request_json = pretty(&request);

        Some(Command::FetchRates {
            seq: self.quote_seq,
            request,
        })
    }

    fn rates_loaded(&mut self, seq: u64, result: Result<QuoteOutcome, String>) {
        if seq != self.quote_seq {
            return;
        }
        self.loading_rates = false;
        // Labels belong to the rate list they were bought from
        self.label_seq += 1;
        self.purchasing = false;
        self.selected_rate_id = None;
        self.label = None;
        self.label_open = false;

        match result {
            Ok(outcome) => {
                self.response_json = pretty(&outcome.raw);
                self.rates = outcome.rates;
            }
            Err(message) => {
                self.response_json = String::new();
                self.rates.clear();
                self.error = Some(message);
            }
        }
    }

    fn purchase_label(&mut self) -> Option<Command> {
        if !self.can_purchase() {
            return None;
        }
        let rate_id = self.selected_rate_id.clone()?;

        self.label_seq += 1;
        self.purchasing = true;
        self.error = None;

        Some(Command::BuyLabel {
            seq: self.label_seq,
            rate_id,
        })
    }

    fn label_loaded(&mut self, seq: u64, result: Result<LabelResult, String>) {
        if seq != self.label_seq {
            return;
        }
        self.purchasing = false;

        match result {
            Ok(label) => {
                self.label = Some(label);
                self.label_open = true;
            }
            Err(message) => self.error = Some(message),
        }
    }
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceLevel;
    use serde_json::json;

    fn rate(id: &str) -> Rate {
        Rate {
            object_id: id.to_string(),
            amount_local: "10.00".to_string(),
            currency_local: "USD".to_string(),
            provider: "USPS".to_string(),
            provider_image_75: String::new(),
            servicelevel: ServiceLevel { name: "Priority Mail".to_string(), token: None },
            estimated_days: Some(2),
            duration_terms: String::new(),
            attributes: vec![],
        }
    }

    fn outcome(ids: &[&str]) -> QuoteOutcome {
        QuoteOutcome {
            rates: ids.iter().map(|id| rate(id)).collect(),
            raw: json!(ids.iter().map(|id| json!({"object_id": id})).collect::<Vec<_>>()),
        }
    }

    fn label() -> LabelResult {
        LabelResult {
            label_url: "https://x/label.pdf".to_string(),
            tracking_number: "TRK123".to_string(),
        }
    }

    /// A form with a valid sender filled in
    fn filled() -> FormState {
        let mut state = FormState::new();
        for (field, value) in [
            (AddressField::Name, "Frodo Baggins"),
            (AddressField::Street1, "1 Bagshot Row"),
            (AddressField::City, "Denver"),
            (AddressField::State, "CO"),
            (AddressField::Zip, "80202"),
        ] {
            state.update(FormEvent::EditAddress {
                side: AddressSide::From,
                field,
                value: value.to_string(),
            });
        }
        state
    }

    fn submit(state: &mut FormState) -> u64 {
        match state.update(FormEvent::SubmitQuote) {
            Some(Command::FetchRates { seq, .. }) => seq,
            other => panic!("expected FetchRates, got {:?}", other),
        }
    }

    /// Quote, load rates, select `id`, buy and load the label
    fn with_label(id: &str) -> FormState {
        let mut state = filled();
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&[id])) });
        state.update(FormEvent::SelectRate(id.to_string()));
        let seq = match state.update(FormEvent::PurchaseLabel) {
            Some(Command::BuyLabel { seq, .. }) => seq,
            other => panic!("expected BuyLabel, got {:?}", other),
        };
        state.update(FormEvent::LabelLoaded { seq, result: Ok(label()) });
        state
    }

    #[test]
    fn test_defaults() {
        let state = FormState::new();
        assert_eq!(state.from.country, "US");
        assert_eq!(state.to.name, "Bilbo Baggins");
        assert_eq!(state.parcel, Parcel::demo());
        assert!(!state.can_purchase());
    }

    #[test]
    fn test_quote_command_carries_single_parcel() {
        let mut state = filled();
        state.update(FormEvent::EditParcel { field: ParcelField::Weight, value: "7".to_string() });

        match state.update(FormEvent::SubmitQuote) {
            Some(Command::FetchRates { request, .. }) => {
                assert_eq!(request.parcel.weight, "7");
                assert_eq!(request.from.name, "Frodo Baggins");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(state.loading_rates);
        assert!(state.request_json.contains("\"weight\": \"7\""));
    }

    #[test]
    fn test_invalid_form_issues_no_request() {
        let mut state = FormState::new();
        assert_eq!(state.update(FormEvent::SubmitQuote), None);
        assert!(state.error.as_deref().unwrap_or("").contains("from address"));
        assert!(!state.loading_rates);
    }

    #[test]
    fn test_submit_clears_selection_label_and_modal() {
        let mut state = with_label("r1");
        assert!(state.label_open);
        assert!(state.label.is_some());

        submit(&mut state);

        assert_eq!(state.selected_rate_id, None);
        assert_eq!(state.label, None);
        assert!(!state.label_open);
    }

    #[test]
    fn test_submit_clears_even_when_quote_fails() {
        let mut state = with_label("r1");
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Err("Shippo error 401".to_string()) });

        assert_eq!(state.selected_rate_id, None);
        assert_eq!(state.label, None);
        assert!(!state.label_open);
        assert!(state.rates.is_empty());
        assert_eq!(state.error.as_deref(), Some("Shippo error 401"));
    }

    #[test]
    fn test_rates_replace_previous_list() {
        let mut state = filled();
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["a", "b"])) });
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["c"])) });

        let ids: Vec<_> = state.rates.iter().map(|r| r.object_id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert!(state.response_json.contains("\"c\""));
        assert!(!state.loading_rates);
    }

    #[test]
    fn test_stale_quote_response_is_discarded() {
        let mut state = filled();
        let first = submit(&mut state);
        let second = submit(&mut state);

        state.update(FormEvent::RatesLoaded { seq: second, result: Ok(outcome(&["new"])) });
        state.update(FormEvent::RatesLoaded { seq: first, result: Ok(outcome(&["old"])) });

        assert_eq!(state.rates.len(), 1);
        assert_eq!(state.rates[0].object_id, "new");
    }

    #[test]
    fn test_select_unknown_rate_ignored() {
        let mut state = filled();
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["r1"])) });

        state.update(FormEvent::SelectRate("r9".to_string()));
        assert_eq!(state.selected_rate_id, None);

        state.update(FormEvent::SelectRate("r1".to_string()));
        state.update(FormEvent::SelectRate("r1".to_string()));
        assert_eq!(state.selected_rate_id.as_deref(), Some("r1"));
        assert_eq!(state.selected_rate().map(|r| r.object_id.as_str()), Some("r1"));
    }

    #[test]
    fn test_purchase_without_selection_is_noop() {
        let mut state = filled();
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["r1"])) });

        let before = state.clone();
        assert_eq!(state.update(FormEvent::PurchaseLabel), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_purchase_while_in_flight_is_noop() {
        let mut state = filled();
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["r1"])) });
        state.update(FormEvent::SelectRate("r1".to_string()));

        assert!(matches!(
            state.update(FormEvent::PurchaseLabel),
            Some(Command::BuyLabel { ref rate_id, .. }) if rate_id == "r1"
        ));
        assert_eq!(state.update(FormEvent::PurchaseLabel), None);
    }

    #[test]
    fn test_label_for_superseded_quote_is_dropped() {
        let mut state = filled();
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["r1"])) });
        state.update(FormEvent::SelectRate("r1".to_string()));
        let label_seq = match state.update(FormEvent::PurchaseLabel) {
            Some(Command::BuyLabel { seq, .. }) => seq,
            other => panic!("unexpected {:?}", other),
        };

        submit(&mut state);
        state.update(FormEvent::LabelLoaded { seq: label_seq, result: Ok(label()) });

        assert_eq!(state.label, None);
        assert!(!state.label_open);
    }

    #[test]
    fn test_label_failure_keeps_selection() {
        let mut state = filled();
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["r1"])) });
        state.update(FormEvent::SelectRate("r1".to_string()));
        let seq = match state.update(FormEvent::PurchaseLabel) {
            Some(Command::BuyLabel { seq, .. }) => seq,
            other => panic!("unexpected {:?}", other),
        };
        state.update(FormEvent::LabelLoaded { seq, result: Err("Shippo error 400".to_string()) });

        assert!(!state.purchasing);
        assert!(state.can_purchase());
        assert_eq!(state.error.as_deref(), Some("Shippo error 400"));
    }

    #[test]
    fn test_close_label() {
        let mut state = with_label("r1");
        state.update(FormEvent::CloseLabel);
        assert!(!state.label_open);
        assert!(state.label.is_some());
    }

    #[test]
    fn test_old_rates_cannot_be_bought_while_quote_loads() {
        let mut state = filled();
        let seq = submit(&mut state);
        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["old"])) });

        let seq = submit(&mut state);
        state.update(FormEvent::SelectRate("old".to_string()));
        assert_eq!(state.selected_rate_id, None);
        assert!(!state.can_purchase());
        assert_eq!(state.update(FormEvent::PurchaseLabel), None);

        state.update(FormEvent::RatesLoaded { seq, result: Ok(outcome(&["new"])) });
        assert_eq!(state.label, None);
        assert!(!state.label_open);
    }
}
