//! Wire types and session tokens shared by the Evtix server and its clients.

pub mod objects;
pub mod token;
