pub mod error;
pub mod model;
pub mod provider;
pub mod response;
pub mod settings;
pub mod state_machine;
pub mod status;
pub mod store;
pub mod view;
