//! Navigation and access gating for BITA
//!
//! This module provides:
//! - The closed set of screens and main tabs
//! - The access gate deciding what a role may reach
//! - A navigation stack that refuses screens the role cannot open
//!
//! Every role check derives from [`is_elevated`]; no other authorization
//! logic exists. This is presentation-level gating, not a security boundary.

use app_core::{Identity, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Screens
// =============================================================================

/// Main navigation tabs, in tab-bar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MainTab {
    /// Dashboard (titled "Home" for students)
    #[default]
    Dashboard,
    /// Attendance marking or viewing
    Attendance,
    /// Student and staff management
    Manage,
    /// Campus events
    Events,
    /// Own profile
    Profile,
}

impl MainTab {
    /// Get all tabs in order, before role filtering
    pub fn all() -> [MainTab; 5] {
        [
            MainTab::Dashboard,
            MainTab::Attendance,
            MainTab::Manage,
            MainTab::Events,
            MainTab::Profile,
        ]
    }

    /// Tab title as seen by a role
    pub fn title(&self, role: Role) -> &'static str {
        match self {
            MainTab::Dashboard if is_elevated(role) => "Dashboard",
            MainTab::Dashboard => "Home",
            MainTab::Attendance => "Attendance",
            MainTab::Manage => "Manage",
            MainTab::Events => "Events",
            MainTab::Profile => "Profile",
        }
    }

    /// Whether only elevated roles see this tab
    pub fn requires_elevation(&self) -> bool {
        matches!(self, MainTab::Manage)
    }
}

/// Every screen of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "screen", content = "tab")]
pub enum Screen {
    // Auth flow
    /// Welcome splash with login/register choices
    #[default]
    Welcome,
    /// Login form
    Login,
    /// Self-registration form
    Register,

    // Main flow
    /// Tabbed main area
    Main(MainTab),
    /// Fee management
    Fees,
    /// Live attendance overview
    LiveAttendance,
    /// Timetable generator
    AiTimetable,
    /// Register a student on their behalf
    StudentRegistration,
}

impl Screen {
    /// Whether this screen belongs to the signed-out flow
    pub fn is_auth_flow(&self) -> bool {
        matches!(self, Screen::Welcome | Screen::Login | Screen::Register)
    }

    /// Whether only elevated roles may open this screen
    pub fn requires_elevation(&self) -> bool {
        match self {
            Screen::Main(tab) => tab.requires_elevation(),
            Screen::LiveAttendance | Screen::AiTimetable | Screen::StudentRegistration => true,
            _ => false,
        }
    }

    /// Header title for stacked screens; tabs use [`MainTab::title`]
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome => "Welcome",
            Screen::Login => "Welcome Back",
            Screen::Register => "Create Account",
            Screen::Main(_) => "",
            Screen::Fees => "Fee Management",
            Screen::LiveAttendance => "Live Attendance",
            Screen::AiTimetable => "AI Timetable Generator",
            Screen::StudentRegistration => "Register Student",
        }
    }
}

// =============================================================================
// Access Gate
// =============================================================================

/// Whether a role gets the management surface
pub fn is_elevated(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Staff)
}

/// First screen shown for a session
pub fn landing_screen(identity: Option<&Identity>) -> Screen {
    match identity {
        Some(_) => Screen::Main(MainTab::Dashboard),
        None => Screen::Welcome,
    }
}

/// Whether a (possibly absent) role may open a screen
pub fn can_access(role: Option<Role>, screen: &Screen) -> bool {
    match role {
        None => screen.is_auth_flow(),
        Some(_) if screen.is_auth_flow() => false,
        Some(role) => !screen.requires_elevation() || is_elevated(role),
    }
}

/// Tabs shown in the tab bar for a role
pub fn visible_tabs(role: Role) -> Vec<MainTab> {
    MainTab::all()
        .into_iter()
        .filter(|tab| can_access(Some(role), &Screen::Main(*tab)))
        .collect()
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The current role may not open the screen
    #[error("Access to {0:?} is not allowed")]
    Forbidden(Screen),

    /// Nothing left to pop
    #[error("Already at the root screen")]
    AtRoot,
}

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The screen
    pub screen: Screen,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(screen: Screen) -> Self {
        Self { screen, key: uuid::Uuid::new_v4().to_string() }
    }
}

/// Stack of screens above a root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    /// Pushed entries (bottom to top), root excluded
    entries: Vec<StackEntry>,
    /// Root entry
    root: StackEntry,
}

impl NavigationStack {
    /// Create a new navigation stack with a root screen
    pub fn new(root: Screen) -> Self {
        Self { entries: Vec::new(), root: StackEntry::new(root) }
    }

    /// Push a screen onto the stack
    pub fn push(&mut self, screen: Screen) {
        self.entries.push(StackEntry::new(screen));
    }

    /// Pop the top screen (returns false if at root)
    pub fn pop(&mut self) -> bool {
        self.entries.pop().is_some()
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.entries.last().unwrap_or(&self.root)
    }

    /// Get the current (top) screen
    pub fn current(&self) -> &Screen {
        &self.current_entry().screen
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Get stack depth, root included
    pub fn depth(&self) -> usize {
        self.entries.len() + 1
    }

    /// Reset to a new root
    pub fn reset(&mut self, root: Screen) {
        self.root = StackEntry::new(root);
        self.entries.clear();
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// Navigation state of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    role: Option<Role>,
    stack: NavigationStack,
}

impl NavigationState {
    /// Start at the landing screen for an identity
    pub fn new(identity: Option<&Identity>) -> Self {
        Self {
            role: identity.map(|identity| identity.role),
            stack: NavigationStack::new(landing_screen(identity)),
        }
    }

    /// Re-land after login, registration or logout
    pub fn reset(&mut self, identity: Option<&Identity>) {
        *self = Self::new(identity);
    }

    /// Role the state is gated on
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Screen on top of the stack
    pub fn current(&self) -> &Screen {
        self.stack.current()
    }

    /// Active tab, if the main flow is showing
    pub fn active_tab(&self) -> Option<MainTab> {
        match self.stack.root.screen {
            Screen::Main(tab) => Some(tab),
            _ => None,
        }
    }

    /// Tabs the current role sees
    pub fn visible_tabs(&self) -> Vec<MainTab> {
        self.role.map(visible_tabs).unwrap_or_default()
    }

    /// Get the underlying stack
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Open a screen
    ///
    /// Tabs replace the stack; everything else is pushed.
    pub fn navigate(&mut self, screen: Screen) -> Result<(), NavigationError> {
        if let Screen::Main(tab) = screen {
            return self.select_tab(tab);
        }

        if !can_access(self.role, &screen) {
            return Err(NavigationError::Forbidden(screen));
        }

        self.stack.push(screen);
        Ok(())
    }

    /// Switch to a main tab, dropping anything stacked above
    pub fn select_tab(&mut self, tab: MainTab) -> Result<(), NavigationError> {
        let screen = Screen::Main(tab);
        if !can_access(self.role, &screen) {
            return Err(NavigationError::Forbidden(screen));
        }

        self.stack.reset(screen);
        Ok(())
    }

    /// Go back one screen
    pub fn go_back(&mut self) -> Result<&Screen, NavigationError> {
        if self.stack.pop() {
            Ok(self.stack.current())
        } else {
            Err(NavigationError::AtRoot)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity::new("1", "Test", "test@campus.edu", role)
    }

    #[test]
    fn test_is_elevated() {
        assert!(is_elevated(Role::Admin));
        assert!(is_elevated(Role::Staff));
        assert!(!is_elevated(Role::Student));
    }

    #[test]
    fn test_landing_screen() {
        assert_eq!(landing_screen(None), Screen::Welcome);
        assert_eq!(
            landing_screen(Some(&identity(Role::Student))),
            Screen::Main(MainTab::Dashboard)
        );
        assert_eq!(
            landing_screen(Some(&identity(Role::Admin))),
            Screen::Main(MainTab::Dashboard)
        );
    }

    #[test]
    fn test_visible_tabs() {
        assert_eq!(
            visible_tabs(Role::Admin),
            vec![
                MainTab::Dashboard,
                MainTab::Attendance,
                MainTab::Manage,
                MainTab::Events,
                MainTab::Profile,
            ]
        );
        assert_eq!(visible_tabs(Role::Staff), visible_tabs(Role::Admin));
        assert_eq!(
            visible_tabs(Role::Student),
            vec![MainTab::Dashboard, MainTab::Attendance, MainTab::Events, MainTab::Profile]
        );
    }

    #[test]
    fn test_dashboard_title_by_role() {
        assert_eq!(MainTab::Dashboard.title(Role::Admin), "Dashboard");
        assert_eq!(MainTab::Dashboard.title(Role::Staff), "Dashboard");
        assert_eq!(MainTab::Dashboard.title(Role::Student), "Home");
        assert_eq!(MainTab::Events.title(Role::Student), "Events");
    }

    #[test]
    fn test_can_access() {
        // Signed out: auth flow only
        assert!(can_access(None, &Screen::Login));
        assert!(!can_access(None, &Screen::Main(MainTab::Dashboard)));
        assert!(!can_access(None, &Screen::Fees));

        // Signed in: never the auth flow
        assert!(!can_access(Some(Role::Admin), &Screen::Welcome));

        // Elevated-only screens
        for screen in [
            Screen::Main(MainTab::Manage),
            Screen::LiveAttendance,
            Screen::AiTimetable,
            Screen::StudentRegistration,
        ] {
            assert!(can_access(Some(Role::Admin), &screen));
            assert!(can_access(Some(Role::Staff), &screen));
            assert!(!can_access(Some(Role::Student), &screen));
        }

        assert!(can_access(Some(Role::Student), &Screen::Fees));
        assert!(can_access(Some(Role::Student), &Screen::Main(MainTab::Profile)));
    }

    #[test]
    fn test_screen_titles() {
        assert_eq!(Screen::Fees.title(), "Fee Management");
        assert_eq!(Screen::AiTimetable.title(), "AI Timetable Generator");
        assert_eq!(Screen::StudentRegistration.title(), "Register Student");
    }

    #[test]
    fn test_screen_serialization() {
        let json = serde_json::to_value(Screen::Main(MainTab::Manage)).unwrap();
        assert_eq!(json, serde_json::json!({ "screen": "Main", "tab": "manage" }));

        let json = serde_json::to_value(Screen::Fees).unwrap();
        assert_eq!(json, serde_json::json!({ "screen": "Fees" }));
    }

    #[test]
    fn test_navigation_stack() {
        let mut stack = NavigationStack::new(Screen::Welcome);
        assert_eq!(stack.depth(), 1);
        assert!(!stack.can_go_back());

        stack.push(Screen::Login);
        assert_eq!(stack.current(), &Screen::Login);
        assert_eq!(stack.depth(), 2);

        assert!(stack.pop());
        assert!(!stack.pop());
        assert_eq!(stack.current(), &Screen::Welcome);
    }

    #[test]
    fn test_stack_entries_have_unique_keys() {
        let mut stack = NavigationStack::new(Screen::Welcome);
        let root_key = stack.current_entry().key.clone();
        stack.push(Screen::Login);
        assert_ne!(stack.current_entry().key, root_key);
    }

    #[test]
    fn test_signed_out_navigation() {
        let mut nav = NavigationState::new(None);
        assert_eq!(nav.current(), &Screen::Welcome);
        assert!(nav.visible_tabs().is_empty());
        assert_eq!(nav.active_tab(), None);

        nav.navigate(Screen::Register).unwrap();
        assert_eq!(nav.current(), &Screen::Register);

        assert_eq!(
            nav.navigate(Screen::Fees),
            Err(NavigationError::Forbidden(Screen::Fees))
        );
        assert_eq!(nav.go_back().unwrap(), &Screen::Welcome);
        assert_eq!(nav.go_back(), Err(NavigationError::AtRoot));
    }

    #[test]
    fn test_student_cannot_reach_management() {
        let student = identity(Role::Student);
        let mut nav = NavigationState::new(Some(&student));

        assert_eq!(
            nav.select_tab(MainTab::Manage),
            Err(NavigationError::Forbidden(Screen::Main(MainTab::Manage)))
        );
        assert_eq!(
            nav.navigate(Screen::AiTimetable),
            Err(NavigationError::Forbidden(Screen::AiTimetable))
        );
        assert_eq!(nav.current(), &Screen::Main(MainTab::Dashboard));

        nav.navigate(Screen::Fees).unwrap();
        assert_eq!(nav.current(), &Screen::Fees);
    }

    #[test]
    fn test_tab_switch_clears_stack() {
        let admin = identity(Role::Admin);
        let mut nav = NavigationState::new(Some(&admin));

        nav.select_tab(MainTab::Manage).unwrap();
        nav.navigate(Screen::StudentRegistration).unwrap();
        assert_eq!(nav.stack().depth(), 2);

        nav.navigate(Screen::Main(MainTab::Events)).unwrap();
        assert_eq!(nav.active_tab(), Some(MainTab::Events));
        assert_eq!(nav.stack().depth(), 1);
    }

    #[test]
    fn test_reset_relands() {
        let staff = identity(Role::Staff);
        let mut nav = NavigationState::new(None);

        nav.reset(Some(&staff));
        assert_eq!(nav.role(), Some(Role::Staff));
        assert_eq!(nav.current(), &Screen::Main(MainTab::Dashboard));

        nav.reset(None);
        assert_eq!(nav.role(), None);
        assert_eq!(nav.current(), &Screen::Welcome);
    }
}
