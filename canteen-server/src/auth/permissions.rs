//! Permission Definitions
//!
//! Fixed role-based permissions. Each account has exactly one role; the
//! role decides the permission list embedded in its JWT.

use shared::models::Role;

pub const MENU_VIEW: &str = "menu:view";
pub const MENU_MANAGE: &str = "menu:manage";
pub const OFFERS_MANAGE: &str = "offers:manage";
pub const ORDERS_PLACE: &str = "orders:place";
pub const ORDERS_VIEW_ALL: &str = "orders:view_all";
pub const ORDERS_UPDATE_STATUS: &str = "orders:update_status";
pub const PAYMENTS_CONFIRM: &str = "payments:confirm";
pub const REPORTS_VIEW: &str = "reports:view";
pub const USERS_MANAGE: &str = "users:manage";
pub const ALL: &str = "all";

pub const STUDENT_PERMISSIONS: &[&str] = &[MENU_VIEW, ORDERS_PLACE];

/// Counter staff: run the menu and the pickup queue
pub const ATTENDANT_PERMISSIONS: &[&str] = &[
    MENU_VIEW,
    MENU_MANAGE,
    ORDERS_VIEW_ALL,
    ORDERS_UPDATE_STATUS,
    PAYMENTS_CONFIRM,
];

pub const MANAGER_PERMISSIONS: &[&str] = &[ALL];

/// Get permissions for a role
pub fn permissions_for(role: Role) -> Vec<String> {
    let list = match role {
        Role::Student => STUDENT_PERMISSIONS,
        Role::Attendant => ATTENDANT_PERMISSIONS,
        Role::Manager => MANAGER_PERMISSIONS,
    };
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        let student = permissions_for(Role::Student);
        assert_eq!(student, vec!["menu:view", "orders:place"]);

        let attendant = permissions_for(Role::Attendant);
        assert!(attendant.contains(&"orders:update_status".to_string()));
        assert!(!attendant.contains(&"reports:view".to_string()));

        assert_eq!(permissions_for(Role::Manager), vec!["all"]);
    }
}
