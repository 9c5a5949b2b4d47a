/// PayStream Client
///
/// Client-side surface for the PayStream engine. Provides:
/// - The ledger capability trait (settlement authority at its boundary)
/// - An HTTP gateway implementation of that capability
/// - The create-only off-chain metadata store client
/// - A per-stream controller gating every operation through the
///   lifecycle state machine before it can reach the ledger

pub mod config;
pub mod controller;
pub mod errors;
pub mod http;
pub mod ledger;
pub mod metadata;

pub use config::ClientConfig;
pub use controller::StreamController;
pub use errors::{ClientError, ClientResult};
pub use http::HttpLedger;
pub use ledger::{Claimable, LedgerError, LedgerResult, StreamLedger};
pub use metadata::{HttpMetadataStore, MetadataError, MetadataStore, StreamRecord};
