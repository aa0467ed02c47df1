//! Runtime plumbing for permissions
//!
//! - `MainQueue` / `MainLoop` - Single UI-affinity context where completions run
//! - `NotificationCenter` - Foreground-return events with explicit subscriptions
//! - `Environment` - The collaborators every permission shares

mod environment;
mod lifecycle;
mod main_queue;

pub use environment::{Environment, NoSettingsApp, SettingsOpener};
pub use lifecycle::{ForegroundHandler, LifecycleEvents, NotificationCenter, Subscription};
pub use main_queue::{create_main_queue, Job, MainLoop, MainQueue};
