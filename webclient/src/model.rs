use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

pub mod atom;
pub mod contest;
pub mod contest_id;
pub mod standings;

pub use atom::*;
pub use contest::*;
pub use contest_id::ContestId;
pub use standings::*;

/// Credential field name.
/// e.g. "username", "password"
pub type CredName = &'static str;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CredFieldKind {
    Text,
    Password,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CredFieldMeta {
    pub name: CredName,
    pub kind: CredFieldKind,
}

/// Credential table.
/// e.g. `[ "username" => "Bob", "password" => "***" ]`
pub type CredMap = HashMap<CredName, String>;

#[async_trait]
pub trait Client: Send + Sync {
    fn platform(&self) -> Platform;

    fn credential_fields(&self) -> &'static [CredFieldMeta];

    fn is_logged_in(&self) -> bool;

    async fn login(&mut self, cred: CredMap) -> Result<()>;

    async fn logout(&mut self) -> Result<()>;

    fn export_authtoken_as_json(&self) -> String;

    fn load_authtoken_json(&mut self, serialized_auth: &str) -> Result<()>;

    /// Returns the raw standings JSON payload of the contest, verbatim.
    async fn fetch_standings_json(&self, contest: &ContestId) -> Result<String>;

    /// Returns one page of the contest archive listing.
    async fn fetch_contest_archive(&self, page: u32) -> Result<Vec<ContestEntry>>;
}
