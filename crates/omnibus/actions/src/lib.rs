#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

extern crate alloc;

mod errors;
pub use errors::OmnibusConfigError;

mod add_node_operators;
pub use add_node_operators::{AddNodeOperators, NewNodeOperator};

mod transfer_assets;
pub use transfer_assets::TransferAssets;

mod revoke_role;
pub use revoke_role::AccessControlRevokeRole;

mod config;
pub use config::{AccountRef, ActionConfig, OmnibusConfig};

mod omnibus;
pub use omnibus::Omnibus;
