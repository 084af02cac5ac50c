pub mod action;
pub mod state;

pub use action::TaskAction;
pub use state::StoreState;
