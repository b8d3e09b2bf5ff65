//! Client-side coordination for word lookups: search input, connectivity and
//! asynchronous results folded into one consistent display state.

pub mod connectivity;
pub mod controller;
pub mod service;
pub mod state;

pub use connectivity::{ConnectivityMonitor, ManualConnectivity, ProbeConnectivity, ProbeOptions};
pub use controller::{ControllerEvent, ControllerOptions, LookupController};
pub use service::{HttpLookupService, LookupService, DEFAULT_API_BASE_URL};
pub use shared::{domain::WordResult, error::LookupError};
pub use state::{ContentState, DisplayState, LookupRequest, LookupState};
