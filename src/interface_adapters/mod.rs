// Interface adapters: HTTP clients, wire payloads and session storage.

pub mod clients;
pub mod mocks;
pub mod protocol;
pub mod state;
