//! Permission alerts
//!
//! Three optional explainers wrap a request:
//!
//! | Kind | Shown when | Actions |
//! |------|------------|---------|
//! | `PrePermission` | status is not determined | Cancel, Confirm (shows system dialog) |
//! | `Denied` | status is denied | Cancel, Settings (re-checks on return) |
//! | `Disabled` | status is disabled | Cancel |
//!
//! Copy is customized per permission with `Permission::configure_alert`.

mod alert;
mod presenter;

pub use alert::{ActionRole, AlertAction, AlertCopy, AlertKind, AlertSpec};
pub use presenter::{AlertPresenter, AlertReply, DismissingPresenter};
