//! Push Protocol
//!
//! Message envelope and host status shapes exchanged with the push server.
//!
//! ## Messages
//!
//! | `type`   | `data`                                   |
//! |----------|------------------------------------------|
//! | `Hi`     | greeting string                          |
//! | `Status` | map of host id → [`HostStatus`]          |
//! | `Toast`  | [`ToastData`]                            |
//! | `Close`  | none                                     |
//! | `Sync`   | informational string                     |

mod error;
mod messages;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use messages::ServerMessage;
pub use types::{
    Cpu, CpuCore, Gpu, HistoryEntry, HostStatus, MemoryUsage, NetworkInterface, StatusMap,
    Storage, ToastData,
};
