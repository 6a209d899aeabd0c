//! Role-dependent dashboard surface
//!
//! Which greeting, shortcuts and attendance mode a user gets. All of it is
//! decided by [`is_elevated`].

use app_core::Role;
use serde::{Deserialize, Serialize};

use crate::navigation::{is_elevated, MainTab, Screen};

/// Dashboard flavour for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardVariant {
    /// Admin and staff overview
    Elevated,
    /// Student home
    Student,
}

impl DashboardVariant {
    /// Variant shown to a role
    pub fn for_role(role: Role) -> Self {
        if is_elevated(role) {
            DashboardVariant::Elevated
        } else {
            DashboardVariant::Student
        }
    }

    /// Header title
    pub fn title(&self) -> &'static str {
        match self {
            DashboardVariant::Elevated => "Dashboard",
            DashboardVariant::Student => "Home",
        }
    }

    /// Greeting above the user's name
    pub fn greeting(&self) -> &'static str {
        match self {
            DashboardVariant::Elevated => "Welcome back",
            DashboardVariant::Student => "Hello",
        }
    }
}

/// A labelled shortcut to a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    /// Button label
    pub label: &'static str,
    /// Screen opened on press
    pub target: Screen,
}

impl QuickAction {
    const fn new(label: &'static str, target: Screen) -> Self {
        Self { label, target }
    }
}

const COMMON_QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction::new("Attendance", Screen::Main(MainTab::Attendance)),
    QuickAction::new("Events", Screen::Main(MainTab::Events)),
    QuickAction::new("Fees", Screen::Fees),
];

const MANAGE_QUICK_ACTION: QuickAction = QuickAction::new("Manage", Screen::Main(MainTab::Manage));

const FAB_ACTIONS: [QuickAction; 4] = [
    QuickAction::new("Create Event", Screen::Main(MainTab::Events)),
    QuickAction::new("Mark Attendance", Screen::Main(MainTab::Attendance)),
    QuickAction::new("Add Fee", Screen::Fees),
    QuickAction::new("Generate Timetable", Screen::AiTimetable),
];

/// Quick-action buttons on the dashboard
pub fn quick_actions(role: Role) -> Vec<QuickAction> {
    let mut actions = COMMON_QUICK_ACTIONS.to_vec();
    if is_elevated(role) {
        actions.push(MANAGE_QUICK_ACTION);
    }
    actions
}

/// Floating action button entries; students get none
pub fn fab_actions(role: Role) -> Vec<QuickAction> {
    if is_elevated(role) {
        FAB_ACTIONS.to_vec()
    } else {
        Vec::new()
    }
}

/// What the attendance tab lets a role do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceMode {
    /// Mark the class roster
    MarkRoster,
    /// View one's own record
    ViewOwn,
}

impl AttendanceMode {
    /// Mode for a role
    pub fn for_role(role: Role) -> Self {
        if is_elevated(role) {
            AttendanceMode::MarkRoster
        } else {
            AttendanceMode::ViewOwn
        }
    }
}
