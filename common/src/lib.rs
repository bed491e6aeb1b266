//! PayCheck Common Library
//!
//! CLIとWeb(WASM)で共有される型と精算ロジック

pub mod types;
pub mod error;
pub mod api;
pub mod grouping;
pub mod roster;
pub mod assignment;
pub mod settlement;
pub mod session;
pub mod share;
pub mod export;

pub use types::{
    AnalyzeResponse, ItemEntry, JoinRequest, LineItem, Member, MembersResponse, ReceiptEntry,
    ReceiptId, SettleType, SettlementRequest, SettlementResponse, SettlementResult,
};
pub use error::{Error, Result};
pub use api::{Endpoint, Method};
pub use grouping::{group_by_receipt, grand_total, ReceiptGroup};
pub use roster::Roster;
pub use assignment::{AssignmentTracker, ItemAssignment, ItemError, ItemKey};
pub use settlement::{plan_settlement, Completion, SettlementPlan, SettlementTracker, Ticket};
pub use session::{CheckEvent, CheckSession, FetchState, PendingSettlement};
pub use share::{settlement_description, FeedPayload, LazyShare, ShareSdk};
