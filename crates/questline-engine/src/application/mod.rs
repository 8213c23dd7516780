//! Application layer: registry, dispatch, completion cascade, tick sweep,
//! and the in-process collaborator implementations.

pub mod audit;
pub mod bus;
pub mod cascade;
pub mod dispatch;
pub mod profiles;
pub mod registry;
pub mod tick;
