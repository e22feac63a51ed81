//! Form/state component
//!
//! Holds the sender, recipient and parcel being edited along with the
//! quote and label results, and drives the two relay endpoints.
//!
//! - [`state`]: the state object and its pure update function
//! - [`session`]: runs the commands `update` returns
//! - [`client`]: HTTP client for the relay
//! - [`view`]: what to display for a given state

pub mod client;
pub mod session;
pub mod state;
pub mod view;

pub use client::{ClientError, RelayClient};
pub use session::FormSession;
pub use state::{AddressSide, Command, FormEvent, FormState, QuoteOutcome};
pub use view::{AssetPolicy, FormView, RateCard};
