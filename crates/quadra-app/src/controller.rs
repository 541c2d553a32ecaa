//! The application controller.
//!
//! `AppController` is the single owner of process-wide client state:
//! the session service, the router, and the stale-response guard. Every
//! flow that crosses more than one of those (signing in and out,
//! forced logout on a rejected token, destructive admin actions) is
//! sequenced here, so screens never coordinate with each other
//! directly.

use crate::gate::initial_screen_for;
use crate::gateway::ApiGateway;
use crate::guard::ResponseGuard;
use crate::router::ViewRouter;
use crate::screens::UserEditScreen;
use crate::session_service::SessionService;
use quadra_core::credential::{CredentialStore, StoredCredentials};
use quadra_core::error::{QuadraError, Result};
use quadra_core::host_application::{HostApplicationForm, HostApplicationReceipt};
use quadra_core::interaction::SubmitGuard;
use quadra_core::screen::{ContactSection, EventId, LegalSection, Screen, UserId};
use quadra_core::session::Session;
use quadra_core::user::ManagedUser;
use std::sync::Arc;

pub struct AppController<G: ApiGateway> {
    gateway: G,
    sessions: SessionService,
    router: ViewRouter,
    responses: ResponseGuard,
    auth_submit: SubmitGuard,
    host_request_submit: SubmitGuard,
}

impl<G: ApiGateway> AppController<G> {
    pub fn new(gateway: G, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            gateway,
            sessions: SessionService::new(store),
            router: ViewRouter::new(),
            responses: ResponseGuard::new(),
            auth_submit: SubmitGuard::new(),
            host_request_submit: SubmitGuard::new(),
        }
    }

    /// Application start: restore any persisted session, then land on
    /// the screen the role gate picks for it.
    pub fn start(&mut self) -> Result<Screen> {
        self.sessions.restore()?;
        let landing = initial_screen_for(self.sessions.current());
        if landing != Screen::Login {
            self.router.show(landing, self.sessions.current())?;
        }
        Ok(self.router.active().clone())
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.current()
    }

    pub fn screen(&self) -> &Screen {
        self.router.active()
    }

    pub fn can_go_back(&self) -> bool {
        self.router.can_go_back()
    }

    /// Tokens for in-flight requests on the current screen; navigation
    /// invalidates them so late responses are dropped.
    pub fn response_guard(&self) -> &ResponseGuard {
        &self.responses
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Screen> {
        if !self.auth_submit.begin() {
            return Err(QuadraError::validation("a sign-in is already in progress"));
        }
        let result = self.gateway.login(email, password).await;
        self.auth_submit.finish();
        self.finish_auth(result?)
    }

    pub async fn sign_up(&mut self, name: &str, email: &str, password: &str) -> Result<Screen> {
        if !self.auth_submit.begin() {
            return Err(QuadraError::validation("a sign-up is already in progress"));
        }
        let result = self.gateway.register(name, email, password).await;
        self.auth_submit.finish();
        self.finish_auth(result?)
    }

    /// Signs out and returns to Login. The screen transition happens
    /// regardless of whether clearing durable storage succeeded.
    pub fn sign_out(&mut self) -> Result<Screen> {
        let cleared = self.sessions.logout();
        self.router.reset_to_login();
        self.responses.invalidate();
        cleared.map(|_| Screen::Login)
    }

    fn finish_auth(&mut self, credentials: StoredCredentials) -> Result<Screen> {
        self.sessions.login(credentials)?;
        self.responses.invalidate();
        let landing = initial_screen_for(self.sessions.current());
        self.router.show(landing, self.sessions.current())?;
        Ok(self.router.active().clone())
    }

    /// Applies the uniform rule for rejected tokens: any Unauthorized
    /// outcome of an authenticated call invalidates the session and
    /// returns the client to Login.
    fn absorb<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_unauthorized() {
                tracing::warn!("authenticated call rejected, forcing sign-out");
                self.force_logout();
            }
        }
        result
    }

    fn force_logout(&mut self) {
        if let Err(err) = self.sessions.logout() {
            tracing::error!(error = %err, "failed to clear credentials during forced sign-out");
        }
        self.router.reset_to_login();
        self.responses.invalidate();
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn open_event_listing(&mut self) -> Result<Screen> {
        self.navigate(Screen::EventListing)
    }

    pub fn open_event(&mut self, event_id: EventId) -> Result<Screen> {
        self.navigate(Screen::EventDetails { event_id })
    }

    pub fn open_profile(&mut self) -> Result<Screen> {
        self.navigate(Screen::Profile)
    }

    pub fn open_host_event(&mut self, event_id: EventId) -> Result<Screen> {
        self.navigate(Screen::HostEventDetail { event_id })
    }

    pub fn open_create_event(&mut self) -> Result<Screen> {
        self.navigate(Screen::HostCreateEvent)
    }

    pub fn open_admin_user(&mut self, user_id: UserId) -> Result<Screen> {
        self.navigate(Screen::AdminUserEdit { user_id })
    }

    pub fn open_host_request(&mut self) -> Result<Screen> {
        self.navigate(Screen::HostRequest)
    }

    pub fn open_legal(&mut self, section: LegalSection) -> Result<Screen> {
        self.navigate(Screen::Legal { section })
    }

    pub fn open_contact(&mut self, section: ContactSection) -> Result<Screen> {
        self.navigate(Screen::Contact { section })
    }

    pub fn back(&mut self) -> Result<Screen> {
        let screen = self.router.go_back()?.clone();
        // Landing back on Login means leaving the authenticated area:
        // the session goes with it.
        if screen == Screen::Login && self.sessions.is_authenticated() {
            self.sessions.logout()?;
        }
        self.responses.invalidate();
        Ok(screen)
    }

    fn navigate(&mut self, screen: Screen) -> Result<Screen> {
        self.router.show(screen, self.sessions.current())?;
        self.responses.invalidate();
        Ok(self.router.active().clone())
    }

    // ========================================================================
    // Host applications
    // ========================================================================

    /// Submits a host application for the signed-in student.
    ///
    /// Without a token this fails locally; the request never reaches
    /// the wire.
    pub async fn submit_host_application(
        &mut self,
        form: &HostApplicationForm,
    ) -> Result<HostApplicationReceipt> {
        let Some(token) = self.sessions.token().cloned() else {
            return Err(QuadraError::validation("session expired, sign in again"));
        };
        if !self.host_request_submit.begin() {
            return Err(QuadraError::validation("submission already in progress"));
        }
        let result = self.gateway.submit_host_application(&token, form).await;
        self.host_request_submit.finish();
        self.absorb(result)
    }

    // ========================================================================
    // Admin user editing
    // ========================================================================

    /// Saves the draft of an admin user edit. On success the draft is
    /// promoted to the saved copy and edit mode ends; on failure the
    /// draft (and the admin's input) is retained.
    pub async fn save_user_edit(&mut self, screen: &mut UserEditScreen) -> Result<ManagedUser> {
        let Some(token) = self.sessions.token().cloned() else {
            return Err(QuadraError::validation("session expired, sign in again"));
        };
        let Some(draft) = screen.edit.draft().cloned() else {
            return Err(QuadraError::validation("no edit in progress"));
        };
        if !screen.submit.begin() {
            return Err(QuadraError::validation("save already in progress"));
        }
        let result = self.gateway.update_user(&token, screen.user_id, &draft).await;
        screen.submit.finish();
        let user = self.absorb(result)?;
        screen.edit.commit();
        Ok(user)
    }

    /// Performs the armed delete on an admin user-edit screen, then
    /// returns to the admin dashboard. Fails if the confirm gate was
    /// never armed.
    pub async fn confirm_delete_user(&mut self, screen: &mut UserEditScreen) -> Result<Screen> {
        if !screen.delete_confirm.confirm() {
            return Err(QuadraError::validation("delete was not armed"));
        }
        let Some(token) = self.sessions.token().cloned() else {
            return Err(QuadraError::validation("session expired, sign in again"));
        };
        let result = self.gateway.delete_user(&token, screen.user_id).await;
        self.absorb(result)?;
        self.navigate(Screen::admin_home())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quadra_core::session::{AccountRecord, AuthToken, Role};
    use quadra_core::user::UserUpdate;
    use quadra_infrastructure::MemoryCredentialStore;
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    fn credentials(roles: &[Role]) -> StoredCredentials {
        StoredCredentials {
            token: AuthToken::new("t1").unwrap(),
            account: AccountRecord {
                id: 1,
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                roles: roles.iter().copied().collect(),
                expires_at: None,
            },
        }
    }

    fn managed_user() -> ManagedUser {
        ManagedUser {
            id: 2,
            name: "B".to_string(),
            email: "b@campus.edu".to_string(),
            roles: BTreeSet::from([Role::Student]),
            active: true,
        }
    }

    /// Canned-response gateway recording every call it receives.
    struct FakeGateway {
        login: Result<StoredCredentials>,
        update_user: Result<ManagedUser>,
        delete_user: Result<()>,
        host_application: Result<HostApplicationReceipt>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FakeGateway {
        fn with_login(result: Result<StoredCredentials>) -> Self {
            Self {
                login: result,
                update_user: Ok(managed_user()),
                delete_user: Ok(()),
                host_application: Err(QuadraError::validation("unset")),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ApiGateway for &FakeGateway {
        async fn login(&self, _email: &str, _password: &str) -> Result<StoredCredentials> {
            self.record("login");
            self.login.clone()
        }

        async fn register(
            &self,
            _name: &str,
            _email: &str,
            _password: &str,
        ) -> Result<StoredCredentials> {
            self.record("register");
            self.login.clone()
        }

        async fn submit_host_application(
            &self,
            _token: &AuthToken,
            _form: &HostApplicationForm,
        ) -> Result<HostApplicationReceipt> {
            self.record("submit_host_application");
            self.host_application.clone()
        }

        async fn update_user(
            &self,
            _token: &AuthToken,
            _user_id: UserId,
            _update: &UserUpdate,
        ) -> Result<ManagedUser> {
            self.record("update_user");
            self.update_user.clone()
        }

        async fn delete_user(&self, _token: &AuthToken, _user_id: UserId) -> Result<()> {
            self.record("delete_user");
            self.delete_user.clone()
        }
    }

    fn controller<'a>(
        gateway: &'a FakeGateway,
        store: Arc<MemoryCredentialStore>,
    ) -> AppController<&'a FakeGateway> {
        AppController::new(gateway, store)
    }

    #[tokio::test]
    async fn test_student_login_lands_on_listing() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Student])));
        let store = Arc::new(MemoryCredentialStore::new());
        let mut app = controller(&gateway, store.clone());

        let screen = app.sign_in("a@b.com", "secret").await.unwrap();
        assert_eq!(screen, Screen::EventListing);

        let session = app.session().unwrap();
        assert_eq!(session.user_id, 1);
        assert_eq!(session.token.as_str(), "t1");
        assert_eq!(session.roles, BTreeSet::from([Role::Student]));

        // Storage matches the in-memory session.
        assert_eq!(store.load().unwrap(), Some(credentials(&[Role::Student])));
    }

    #[tokio::test]
    async fn test_admin_login_precedes_host() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Host, Role::Admin])));
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));
        let screen = app.sign_in("a@b.com", "secret").await.unwrap();
        assert_eq!(screen, Screen::admin_home());
    }

    #[tokio::test]
    async fn test_failed_login_mutates_nothing() {
        let gateway =
            FakeGateway::with_login(Err(QuadraError::validation("wrong password")));
        let store = Arc::new(MemoryCredentialStore::new());
        let mut app = controller(&gateway, store.clone());

        let err = app.sign_in("a@b.com", "nope").await.unwrap_err();
        assert!(err.is_validation());
        assert!(app.session().is_none());
        assert_eq!(app.screen(), &Screen::Login);
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_round_trip() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Host])));
        let store = Arc::new(MemoryCredentialStore::new());
        let mut first = controller(&gateway, store.clone());
        first.sign_in("a@b.com", "secret").await.unwrap();
        let session = first.session().unwrap().clone();

        let mut second = controller(&gateway, store);
        let screen = second.start().unwrap();
        assert_eq!(screen, Screen::host_home());
        assert_eq!(second.session(), Some(&session));
    }

    #[tokio::test]
    async fn test_sign_out_from_any_screen_lands_on_login() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Student])));
        let store = Arc::new(MemoryCredentialStore::new());
        let mut app = controller(&gateway, store.clone());
        app.sign_in("a@b.com", "secret").await.unwrap();
        app.open_event(7).unwrap();

        let screen = app.sign_out().unwrap();
        assert_eq!(screen, Screen::Login);
        assert_eq!(app.screen(), &Screen::Login);
        assert!(app.session().is_none());
        assert_eq!(store.load().unwrap(), None);
        assert!(!app.can_go_back());
    }

    #[tokio::test]
    async fn test_back_navigation_through_controller() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Student])));
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));
        app.sign_in("a@b.com", "secret").await.unwrap();

        app.open_event(1).unwrap();
        app.open_event(2).unwrap();
        assert_eq!(app.back().unwrap(), Screen::EventDetails { event_id: 1 });
        assert_eq!(app.back(), Err(QuadraError::NoPreviousScreen));
    }

    #[tokio::test]
    async fn test_navigation_invalidates_response_tokens() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Student])));
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));
        app.sign_in("a@b.com", "secret").await.unwrap();

        let token = app.response_guard().issue();
        assert!(token.is_current());
        app.open_event(3).unwrap();
        assert!(!token.is_current());
    }

    #[tokio::test]
    async fn test_tokenless_host_application_fails_locally() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Student])));
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));

        let form = HostApplicationForm {
            org_name: "Chess Club".to_string(),
            category: "games".to_string(),
            motivation: "weekly blitz nights".to_string(),
        };
        let err = app.submit_host_application(&form).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("session expired"));
        // The request never reached the gateway.
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_host_application_submits_with_session() {
        use quadra_core::host_application::{ApplicationStatus, HostApplicationReceipt};

        let mut gateway = FakeGateway::with_login(Ok(credentials(&[Role::Student])));
        gateway.host_application = Ok(HostApplicationReceipt {
            application_id: 31,
            status: ApplicationStatus::Pending,
        });
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));
        app.sign_in("a@b.com", "secret").await.unwrap();

        let form = HostApplicationForm {
            org_name: "Chess Club".to_string(),
            category: "games".to_string(),
            motivation: "weekly blitz nights".to_string(),
        };
        let receipt = app.submit_host_application(&form).await.unwrap();
        assert_eq!(receipt.application_id, 31);
        assert_eq!(receipt.status, ApplicationStatus::Pending);
        assert!(gateway.calls().contains(&"submit_host_application"));
    }

    #[tokio::test]
    async fn test_save_user_edit_commits_on_success() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Admin])));
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));
        app.sign_in("a@b.com", "secret").await.unwrap();

        let mut screen = UserEditScreen::new(&managed_user());
        screen.edit.begin_edit();
        screen.edit.draft_mut().unwrap().active = false;

        app.save_user_edit(&mut screen).await.unwrap();
        assert!(!screen.edit.is_editing());
        assert!(!screen.edit.saved().active);
    }

    #[tokio::test]
    async fn test_save_user_edit_retains_draft_on_failure() {
        let mut gateway = FakeGateway::with_login(Ok(credentials(&[Role::Admin])));
        gateway.update_user = Err(QuadraError::validation("email already registered"));
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));
        app.sign_in("a@b.com", "secret").await.unwrap();

        let mut screen = UserEditScreen::new(&managed_user());
        screen.edit.begin_edit();
        screen.edit.draft_mut().unwrap().name = "C".to_string();

        assert!(app.save_user_edit(&mut screen).await.is_err());
        assert!(screen.edit.is_editing());
        assert_eq!(screen.edit.draft().unwrap().name, "C");
        assert_eq!(screen.edit.saved().name, "B");
    }

    #[tokio::test]
    async fn test_unauthorized_save_forces_logout() {
        let mut gateway = FakeGateway::with_login(Ok(credentials(&[Role::Admin])));
        gateway.update_user = Err(QuadraError::unauthorized("token expired"));
        let store = Arc::new(MemoryCredentialStore::new());
        let mut app = controller(&gateway, store.clone());
        app.sign_in("a@b.com", "secret").await.unwrap();

        let mut screen = UserEditScreen::new(&managed_user());
        screen.edit.begin_edit();
        let err = app.save_user_edit(&mut screen).await.unwrap_err();
        assert!(err.is_unauthorized());

        assert_eq!(app.screen(), &Screen::Login);
        assert!(app.session().is_none());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_requires_armed_confirm() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Admin])));
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));
        app.sign_in("a@b.com", "secret").await.unwrap();
        app.open_admin_user(2).unwrap();

        let mut screen = UserEditScreen::new(&managed_user());
        let err = app.confirm_delete_user(&mut screen).await.unwrap_err();
        assert!(err.is_validation());
        assert!(!gateway.calls().contains(&"delete_user"));

        screen.delete_confirm.arm();
        let landing = app.confirm_delete_user(&mut screen).await.unwrap();
        assert_eq!(landing, Screen::admin_home());
        assert!(gateway.calls().contains(&"delete_user"));
    }

    #[tokio::test]
    async fn test_anonymous_cannot_navigate_to_gated_screens() {
        let gateway = FakeGateway::with_login(Ok(credentials(&[Role::Student])));
        let mut app = controller(&gateway, Arc::new(MemoryCredentialStore::new()));
        let err = app.open_profile().unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(app.screen(), &Screen::Login);
    }
}
