//! User interface layer for BITA
//!
//! Rendering lives outside this crate. What lives here is the part of the
//! UI with rules: which screens exist, which of them a role may reach, and
//! which role-dependent variants of the dashboard to show.
//!
//! # Modules
//!
//! - [`navigation`] - Screens, tabs, access gate and navigation state
//! - [`dashboard`] - Dashboard variant, shortcuts and attendance mode
//!
//! # Example
//!
//! ```rust
//! use app_core::{Identity, Role};
//! use app_ui::navigation::{is_elevated, landing_screen, visible_tabs, MainTab, Screen};
//!
//! let staff = Identity::new("1", "Sam", "sam@campus.edu", Role::Staff);
//! assert!(is_elevated(staff.role));
//! assert_eq!(landing_screen(Some(&staff)), Screen::Main(MainTab::Dashboard));
//! assert!(visible_tabs(staff.role).contains(&MainTab::Manage));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dashboard;
pub mod navigation;

// Re-export commonly used types
pub use dashboard::{fab_actions, quick_actions, AttendanceMode, DashboardVariant, QuickAction};

pub use navigation::{
    can_access, is_elevated, landing_screen, visible_tabs, MainTab, NavigationError,
    NavigationStack, NavigationState, Screen, StackEntry,
};
