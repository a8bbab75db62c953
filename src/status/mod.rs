mod master_status;
mod part_status;
mod reconciler;

pub use master_status::{MasterStatus, PartUpsert};
pub use part_status::{MasterStatusItem, PartStatus};
pub use reconciler::{ReconcileReport, Reconciler};
