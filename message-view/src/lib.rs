//! HTTP Message View shared by the rule engine crates
//!
//! This crate decomposes a raw HTTP request into its request line, ordered
//! header lines, body bytes and typed parameters, and recomposes those parts
//! back into a raw request:
//! - `HttpMessage` - read-only analyzed view of one request
//! - `Parameter` - URL, body or cookie parameter as it appears on the wire
//! - `MessageParser` - parser collaborator consumed by both engines
//! - `RawMessageParser` - default line-oriented implementation
//! - `latin1` - byte-preserving text decoding for heads and form bodies

pub mod error;
pub mod latin1;
pub mod message;
pub mod parameter;
pub mod parser;
pub mod service;

pub use error::ParseError;
pub use message::{split_header, HttpMessage};
pub use parameter::{Parameter, ParameterKind};
pub use parser::{MessageParser, RawMessageParser};
pub use service::HttpService;

/// Result type alias for message view operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;
