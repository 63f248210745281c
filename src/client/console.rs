use crate::{
    client::{
        editor::{RecordEditor, SettingsForm},
        error::ClientError,
        gateway::GatewayClient,
        request::Mutation,
        session::{LoginOutcome, SessionManager, TokenStore},
        sync::{ContentState, sync_all},
    },
    models::{Record, RecordKind},
};

/// Toast-style message for the UI to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}

/// Prompt shown before a delete is sent.
pub const DELETE_PROMPT: &str = "Are you sure?";

/// Headless admin console: session, collections, the open editor and the
/// pending notices. Every successful write is followed by a full reload.
pub struct AdminConsole<G, S> {
    gateway: G,
    session: SessionManager<S>,
    content: ContentState,
    editor: Option<RecordEditor>,
    notices: Vec<Notice>,
}

impl<G: GatewayClient, S: TokenStore> AdminConsole<G, S> {
    pub fn new(gateway: G, token_store: S) -> Self {
        Self {
            gateway,
            session: SessionManager::new(token_store),
            content: ContentState::default(),
            editor: None,
            notices: Vec::new(),
        }
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn editor(&self) -> Option<&RecordEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut RecordEditor> {
        self.editor.as_mut()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Initial load: a stored token that still verifies skips the login
    /// prompt and loads the collections.
    pub async fn mount(&mut self) -> bool {
        match self.session.restore(&self.gateway).await {
            Ok(true) => {
                self.reload().await;
                true
            }
            Ok(false) => false,
            // Already logged by the session manager; the login form stays up.
            Err(_) => false,
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        match self.session.login(&self.gateway, username, password).await {
            Ok(LoginOutcome::Authenticated { username }) => {
                self.notify(Notice::Success(format!("Welcome, {}!", username)));
                self.reload().await;
                true
            }
            Ok(LoginOutcome::Rejected { .. }) => {
                self.notify(Notice::Failure("Invalid username or password".into()));
                false
            }
            Err(e) => {
                tracing::error!("Login request failed: {}", e);
                self.notify(Notice::Failure("Login failed".into()));
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.editor = None;
        self.session.logout();
    }

    /// Re-reads all five collections. At most one failure notice per call.
    pub async fn reload(&mut self) -> bool {
        let report = sync_all(&self.gateway, &mut self.content).await;
        if !report.is_complete() {
            self.notify(Notice::Failure("Failed to load data".into()));
        }
        report.is_complete()
    }

    /// Opens the editor: pre-filled for `record`, empty otherwise.
    pub fn open_editor(&mut self, kind: RecordKind, record: Option<&Record>) {
        self.editor = Some(RecordEditor::open(kind, record));
    }

    /// Opens the editor on a loaded record. `false` if it is not loaded.
    pub fn edit_record(&mut self, kind: RecordKind, id: i32) -> bool {
        match self.content.find(kind, id) {
            Some(record) => {
                self.editor = Some(RecordEditor::edit(&record));
                true
            }
            None => false,
        }
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    pub fn settings_form(&self) -> SettingsForm {
        SettingsForm::from_current(&self.content.settings)
    }

    /// Submits the open editor. A blank required field blocks the request
    /// and leaves the editor open. On success the editor closes and every
    /// collection is reloaded.
    pub async fn save(&mut self) -> Result<(), ClientError> {
        let Some(editor) = &self.editor else {
            return Ok(());
        };

        let mutation = editor.submit()?;
        self.execute(&mutation).await?;
        self.editor = None;
        self.reload().await;
        Ok(())
    }

    pub async fn save_settings(&mut self, form: &SettingsForm) -> Result<(), ClientError> {
        let mutation = form.submit();
        self.execute(&mutation).await?;
        self.reload().await;
        Ok(())
    }

    /// Deletes a record once `confirm` agrees. Returns whether a delete was
    /// sent; a declined prompt sends nothing.
    pub async fn delete(
        &mut self,
        kind: RecordKind,
        id: i32,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, ClientError> {
        if !confirm(DELETE_PROMPT) {
            return Ok(false);
        }

        self.execute(&Mutation::Delete { kind, id }).await?;
        self.reload().await;
        Ok(true)
    }

    async fn execute(&mut self, mutation: &Mutation) -> Result<(), ClientError> {
        match self.gateway.send(mutation, self.session.token()).await {
            Ok(()) => {
                self.notify(Notice::Success(mutation.success_message().into()));
                Ok(())
            }
            Err(e) => {
                tracing::error!("{} {:?} failed: {}", mutation.method(), mutation.query(), e);
                self.notify(Notice::Failure(mutation.failure_message().into()));
                Err(e)
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
