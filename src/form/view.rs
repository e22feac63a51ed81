//! Display model for the form
//!
//! Turns a `FormState` into what a front-end shows: rate cards, the label
//! modal and the request/response panes. Rendering to text is provided
//! for the terminal front-end.

use std::fmt::Write;
use url::Url;

use crate::config::AssetSettings;
use crate::domain::{AddressField, ParcelField, Rate, RateAttribute};
use super::state::{AddressSide, FormState};

/// Hosts carrier logos may be loaded from
#[derive(Debug, Clone)]
pub struct AssetPolicy {
    hosts: Vec<String>,
}

impl AssetPolicy {
    pub fn new(hosts: Vec<String>) -> Self {
        AssetPolicy { hosts }
    }

    /// Only absolute http(s) URLs on an allow-listed host
    pub fn allows(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        parsed
            .host_str()
            .map(|host| self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host)))
            .unwrap_or(false)
    }
}

impl Default for AssetPolicy {
    fn default() -> Self {
        AssetPolicy::from(&AssetSettings::default())
    }
}

impl From<&AssetSettings> for AssetPolicy {
    fn from(settings: &AssetSettings) -> Self {
        AssetPolicy::new(settings.image_hosts.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Blue,
    Green,
    Yellow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: BadgeTone,
}

impl Badge {
    fn from_tag(tag: &str) -> Self {
        let tone = match RateAttribute::parse(tag) {
            RateAttribute::Fastest => BadgeTone::Blue,
            RateAttribute::Cheapest => BadgeTone::Green,
            _ => BadgeTone::Yellow,
        };
        Badge {
            label: tag.to_string(),
            tone,
        }
    }
}

/// One selectable rate
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    pub rate_id: String,
    pub carrier: String,
    pub service: String,
    pub price: String,
    pub delivery: String,
    pub badges: Vec<Badge>,
    pub logo_url: Option<String>,
    pub selected: bool,
}

impl RateCard {
    pub fn new(rate: &Rate, selected: bool, assets: &AssetPolicy) -> Self {
        RateCard {
            rate_id: rate.object_id.clone(),
            carrier: rate.provider.clone(),
            service: rate.servicelevel.name.clone(),
            price: format_price(&rate.amount_local, &rate.currency_local),
            delivery: delivery_text(rate),
            badges: rate.attributes.iter().map(|a| Badge::from_tag(a)).collect(),
            logo_url: Some(rate.provider_image_75.clone()).filter(|u| assets.allows(u)),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelModal {
    pub label_url: String,
    pub tracking_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub key: &'static str,
    pub value: String,
}

/// Everything the front-end renders for one state
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub from_fields: Vec<FieldView>,
    pub to_fields: Vec<FieldView>,
    pub parcel_fields: Vec<FieldView>,
    pub cards: Vec<RateCard>,
    pub can_submit: bool,
    pub can_purchase: bool,
    pub loading_rates: bool,
    pub purchasing: bool,
    pub error: Option<String>,
    pub label_modal: Option<LabelModal>,
    pub request_json: String,
    pub response_json: String,
}

impl FormView {
    pub fn new(state: &FormState, assets: &AssetPolicy) -> Self {
        let selected = state.selected_rate_id.as_deref();

        FormView {
            from_fields: address_fields(state, AddressSide::From),
            to_fields: address_fields(state, AddressSide::To),
            parcel_fields: ParcelField::ALL
                .into_iter()
                .map(|f| FieldView {
                    key: f.key(),
                    value: state.parcel.get(f).to_string(),
                })
                .collect(),
            cards: state
                .rates
                .iter()
                .map(|r| RateCard::new(r, Some(r.object_id.as_str()) == selected, assets))
                .collect(),
            can_submit: !state.loading_rates,
            can_purchase: state.can_purchase(),
            loading_rates: state.loading_rates,
            purchasing: state.purchasing,
            error: state.error.clone(),
            label_modal: state
                .label
                .as_ref()
                .filter(|_| state.label_open)
                .map(|l| LabelModal {
                    label_url: l.label_url.clone(),
                    tracking_number: l.tracking_number.clone(),
                }),
            request_json: state.request_json.clone(),
            response_json: state.response_json.clone(),
        }
    }

    /// Plain-text rendering of the rate list and label
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(error) = &self.error {
            let _ = writeln!(out, "error: {}", error);
        }
        if self.loading_rates {
            let _ = writeln!(out, "loading rates...");
        }

        for card in &self.cards {
            let marker = if card.selected { '*' } else { ' ' };
            let _ = writeln!(
                out,
                "{} {:<10} {:<28} {:>10}  {}  [{}]",
                marker, card.carrier, card.service, card.price, card.delivery, card.rate_id
            );
            if !card.badges.is_empty() {
                let tags: Vec<_> = card.badges.iter().map(|b| b.label.as_str()).collect();
                let _ = writeln!(out, "    {}", tags.join(" "));
            }
        }

        if let Some(modal) = &self.label_modal {
            let _ = writeln!(out, "label: {}", modal.label_url);
            let _ = writeln!(out, "tracking: {}", modal.tracking_number);
        }

        out
    }
}

fn address_fields(state: &FormState, side: AddressSide) -> Vec<FieldView> {
    let address = state.address(side);
    AddressField::ALL
        .into_iter()
        .map(|f| FieldView {
            key: f.key(),
            value: address.get(f).to_string(),
        })
        .collect()
}

/// "$10.00" for USD, "10.00 EUR" otherwise; unparsable amounts shown as given
pub fn format_price(amount: &str, currency: &str) -> String {
    match amount.trim().parse::<f64>() {
        Ok(value) if currency.eq_ignore_ascii_case("USD") || currency.is_empty() => format!("${:.2}", value),
        Ok(value) => format!("{:.2} {}", value, currency),
        Err(_) => amount.to_string(),
    }
}

/// "Est. N day(s)" when the provider estimated it, else its duration terms
pub fn delivery_text(rate: &Rate) -> String {
    match rate.estimated_days {
        Some(1) => "Est. 1 day".to_string(),
        Some(days) if days > 1 => format!("Est. {} days", days),
        _ => rate.duration_terms.clone(),
    }
}
