//! Adapters for external communication
//!
//! - [`rpc`]: `submitblock` JSON-RPC params and response mapping

pub mod rpc;

pub use rpc::{handle_submit_block, into_rpc_response, RpcError, SubmitBlockParams};
