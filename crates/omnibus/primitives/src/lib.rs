#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

extern crate alloc;

mod bytes;
pub use bytes::{decode_byte_string, equal_byte_slices, equal_bytes, is_valid_byte_string};

mod value;
pub use value::ArgValue;
