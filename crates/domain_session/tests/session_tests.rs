//! Tests for domain_session

use rust_decimal_macros::dec;

use domain_claims::{ClaimForm, ClaimStatus, ClaimStore, SubmissionRules};
use domain_session::{
    Dashboard, Role, Session, SessionError, SessionShell, User, UserDirectory, View, DEMO_PASSWORD,
};

fn car_form() -> ClaimForm {
    ClaimForm {
        mode: "Car".to_string(),
        to_from_home: "Yes".to_string(),
        travel_date: "2024-03-14".to_string(),
        departure_time: "21:30".to_string(),
        arrival_time: "22:15".to_string(),
        home_distance: "10".to_string(),
        from_location: "Changi Business Park".to_string(),
        to_location: "Tampines".to_string(),
        reason: "Overtime".to_string(),
        parking_fee: "2".to_string(),
        ..Default::default()
    }
}

fn logged_in(email: &str) -> SessionShell {
    let mut shell = SessionShell::default();
    shell.login(email, DEMO_PASSWORD).expect("demo login");
    shell
}

// ============================================================================
// Login Tests
// ============================================================================

mod login_tests {
    use super::*;

    #[test]
    fn test_login_starts_in_first_role() {
        let mut shell = SessionShell::default();
        let session = shell.login("employee@dasi.com", "password123").unwrap();

        assert_eq!(session.user().name, "John Employee");
        assert_eq!(session.active_role(), Role::Employee);
        assert!(!session.can_switch_roles());
    }

    #[test]
    fn test_login_trims_email() {
        let mut shell = SessionShell::default();
        let session = shell.login("  recruiter@dasi.com ", DEMO_PASSWORD).unwrap();
        assert_eq!(session.active_role(), Role::Reviewer);
    }

    #[test]
    fn test_empty_fields_rejected() {
        let mut shell = SessionShell::default();

        let err = shell.login("", DEMO_PASSWORD).unwrap_err();
        assert_eq!(err, SessionError::MissingCredentials);
        assert_eq!(err.to_string(), "Please fill in all fields");

        let err = shell.login("employee@dasi.com", "").unwrap_err();
        assert_eq!(err, SessionError::MissingCredentials);
        assert!(shell.session().is_none());
    }

    #[test]
    fn test_bad_credentials_share_one_message() {
        let mut shell = SessionShell::default();

        let wrong_password = shell.login("employee@dasi.com", "nope").unwrap_err();
        let unknown_user = shell.login("ghost@dasi.com", DEMO_PASSWORD).unwrap_err();

        assert_eq!(wrong_password, SessionError::InvalidCredentials);
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert_eq!(wrong_password.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let mut shell = SessionShell::default();
        let err = shell.login("Employee@dasi.com", DEMO_PASSWORD).unwrap_err();
        assert_eq!(err, SessionError::InvalidCredentials);
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let mut shell = logged_in("employee@dasi.com");
        assert!(shell.login("employee@dasi.com", "wrong").is_err());
        assert_eq!(shell.session().unwrap().user().email, "employee@dasi.com");
    }

    #[test]
    fn test_custom_shared_password() {
        let directory = UserDirectory::demo().with_shared_password("s3cret");
        let mut shell = SessionShell::new(directory);

        assert_eq!(
            shell.login("hr@dasi.com", DEMO_PASSWORD).unwrap_err(),
            SessionError::InvalidCredentials
        );
        assert!(shell.login("hr@dasi.com", "s3cret").is_ok());
    }

    #[test]
    fn test_user_without_roles_cannot_log_in() {
        let directory = UserDirectory::new("pw").with_user(User::new("nobody@dasi.com", "Nobody", &[]));
        let mut shell = SessionShell::new(directory);

        let err = shell.login("nobody@dasi.com", "pw").unwrap_err();
        assert_eq!(err, SessionError::NoRoles("nobody@dasi.com".to_string()));
    }

    #[test]
    fn test_logout_returns_to_login_view() {
        let store = ClaimStore::new();
        let mut shell = logged_in("admin@dasi.com");

        let ended = shell.logout().unwrap();
        assert_eq!(ended.user().email, "admin@dasi.com");
        assert!(matches!(shell.view(&store), View::Login));
        assert!(shell.logout().is_none());
    }
}

// ============================================================================
// Role Tests
// ============================================================================

mod role_tests {
    use super::*;

    #[test]
    fn test_multi_role_user_switches() {
        let mut shell = logged_in("manager@dasi.com");
        assert!(shell.session().unwrap().can_switch_roles());

        shell.switch_role(Role::Reviewer).unwrap();
        assert_eq!(shell.session().unwrap().active_role(), Role::Reviewer);

        shell.switch_role(Role::Employee).unwrap();
        assert_eq!(shell.session().unwrap().active_role(), Role::Employee);
    }

    #[test]
    fn test_single_role_user_cannot_switch() {
        let mut shell = logged_in("employee@dasi.com");

        let err = shell.switch_role(Role::Reviewer).unwrap_err();
        assert_eq!(err, SessionError::RoleNotAvailable(Role::Reviewer));
        assert_eq!(shell.session().unwrap().active_role(), Role::Employee);
    }

    #[test]
    fn test_switch_without_session() {
        let mut shell = SessionShell::default();
        assert_eq!(shell.switch_role(Role::Employee).unwrap_err(), SessionError::NotLoggedIn);
    }

    #[test]
    fn test_resume_checks_role() {
        let user = User::new("hr@dasi.com", "HR Manager", &[Role::Reviewer]);
        assert!(Session::resume(user.clone(), Role::Reviewer).is_ok());
        assert_eq!(
            Session::resume(user, Role::Employee).unwrap_err(),
            SessionError::RoleNotAvailable(Role::Employee)
        );
    }

    #[test]
    fn test_review_desk_needs_reviewer_role() {
        let mut shell = logged_in("admin@dasi.com");
        assert!(shell.session().unwrap().review_desk().is_err());

        shell.switch_role(Role::Reviewer).unwrap();
        let desk = shell.session().unwrap().review_desk().unwrap();
        assert_eq!(desk.reviewer(), "Admin User");
    }

    #[test]
    fn test_legacy_role_name_parses() {
        assert_eq!("recruiter".parse::<Role>().unwrap(), Role::Reviewer);
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
        assert!(matches!("auditor".parse::<Role>(), Err(SessionError::UnknownRole(_))));
    }
}

// ============================================================================
// Dashboard Tests
// ============================================================================

mod dashboard_tests {
    use super::*;

    fn seeded_store() -> ClaimStore {
        let mut store = ClaimStore::new();
        let rules = SubmissionRules::default();
        let directory = UserDirectory::demo();

        for email in ["employee@dasi.com", "employee2@dasi.com", "employee@dasi.com"] {
            let employee = directory.find(email).unwrap().as_employee();
            car_form().submit(&employee, &rules, &mut store).unwrap();
        }
        store
    }

    #[test]
    fn test_employee_sees_only_own_claims() {
        let store = seeded_store();
        let shell = logged_in("employee@dasi.com");

        let View::Dashboard(Dashboard::Employee(dashboard)) = shell.view(&store) else {
            panic!("expected employee dashboard");
        };
        assert_eq!(dashboard.claims.len(), 2);
        assert!(dashboard.claims.iter().all(|c| c.employee().email == "employee@dasi.com"));
        assert_eq!(dashboard.summary.total, 2);
        assert_eq!(dashboard.summary.pending, 2);
        assert_eq!(dashboard.claims[0].final_amount().amount(), dec!(6.70));
    }

    #[test]
    fn test_reviewer_sees_queue_and_history() {
        let mut store = seeded_store();
        let mut shell = logged_in("recruiter@dasi.com");

        let desk = shell.session().unwrap().review_desk().unwrap();
        let first = store.all_claims()[0].id();
        desk.approve(&mut store, first).unwrap();

        let View::Dashboard(Dashboard::Reviewer(dashboard)) = shell.view(&store) else {
            panic!("expected reviewer dashboard");
        };
        assert_eq!(dashboard.reviewer, "Sarah Recruiter");
        assert_eq!(dashboard.pending.len(), 2);
        assert_eq!(dashboard.all.len(), 3);
        assert_eq!(dashboard.summary.approved, 1);
        assert_eq!(dashboard.all[0].status(), ClaimStatus::Approved);
        assert_eq!(dashboard.all[0].reviewed_by(), Some("Sarah Recruiter"));

        shell.logout();
        assert!(matches!(shell.view(&store), View::Login));
    }

    #[test]
    fn test_dashboard_follows_role_switch() {
        let store = seeded_store();
        let mut shell = logged_in("admin@dasi.com");

        let dashboard = shell.session().unwrap().dashboard(&store);
        assert_eq!(dashboard.role(), Role::Employee);
        assert_eq!(dashboard.summary().total, 0);

        shell.switch_role(Role::Reviewer).unwrap();
        let dashboard = shell.session().unwrap().dashboard(&store);
        assert_eq!(dashboard.role(), Role::Reviewer);
        assert_eq!(dashboard.summary().total, 3);
    }

    #[test]
    fn test_dashboard_serializes_with_view_tag() {
        let store = seeded_store();
        let shell = logged_in("employee2@dasi.com");

        let dashboard = shell.session().unwrap().dashboard(&store);
        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["view"], "employee");
        assert_eq!(json["summary"]["total"], 1);
        assert_eq!(json["employee"]["name"], "Jane Employee");
    }
}
