pub mod catalog;
pub mod commands;
pub mod contracts;
pub mod engine;
pub mod error;
pub mod profile;
pub mod setup;
pub mod state;

pub use catalog::{Catalog, Instrument};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use engine::optimizer::recommend;
pub use engine::ranking::rank_all as rank;
pub use error::{ClientError, ClientResult};
pub use profile::SpendingProfile;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
