//! Headless presentation layer: the state the public site and the admin
//! console hold, and the calls they make against the gateway.

pub mod console;
pub mod editor;
pub mod error;
pub mod form;
pub mod gateway;
pub mod request;
pub mod session;
pub mod site;
pub mod sync;

pub use console::{AdminConsole, Notice};
pub use editor::{RecordEditor, SettingsForm};
pub use error::ClientError;
pub use gateway::{GatewayClient, GatewayConfig, HttpGateway, LoginReply, VerifyReply};
pub use request::{FormFields, Mutation, ValidatedForm};
pub use session::{
    FileTokenStore, LoginOutcome, MemoryTokenStore, SessionManager, SessionState, TokenStore,
};
pub use site::{Contacts, Fixture, Heading, Hero, HistoryBlock, PublicSite, Section};
pub use sync::{ContentState, SyncReport, sync_all};
