//! Binary encoders for the EOS signing wire format
//!
//! Everything the device hashes is produced here: the fixed 8-byte name
//! packing, the 16-byte asset packing, the varint scheme, the per-action
//! parameter payloads, and the full transaction stream with its running
//! SHA-256 digest.

pub mod action;
pub mod asset;
pub mod name;
pub mod transaction;
pub mod varint;
pub mod writer;

pub use action::ActionData;
pub use asset::encode_asset;
pub use name::encode_name;
pub use transaction::encode_transaction;
pub use varint::encode_varint;
pub use writer::TxWriter;
