// src/wizard/mod.rs

pub mod controller;
pub mod draft_store;
pub mod persistence;
pub mod stage;

pub use controller::{Effect, TestWizard, Transition, plan_advance, retreat};
pub use draft_store::{Collection, DraftKind, DraftStore, Saved};
pub use persistence::PersistenceAdapter;
pub use stage::Stage;
