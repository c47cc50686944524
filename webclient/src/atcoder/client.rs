use ::async_trait::async_trait;
use ::cookie::Cookie;
use ::reqwest::cookie::CookieStore as _;
use ::std::{collections::HashMap, time::Duration};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{helper, urls::*};
use crate::{
    error::*,
    model::*,
    util::{self, DocExt as _, ElementExt as _},
};

macro_rules! bail {
    ($e:expr) => {
        return Err($e.into())
    };
}

/// Session cookie exported to / restored from the authtoken file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthCookie {
    pub session_id: Option<String>,
}

impl AuthCookie {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

pub struct AtCoderClient {
    http: crate::http::Client,
}

const COOKIE_KEY_SESSION_ID: &str = "REVEL_SESSION";

impl AtCoderClient {
    pub fn new() -> Self {
        use ::glob::Pattern;
        Self {
            http: crate::http::Client::new(
                crate::http::redirect::Policy::none(),
                [(
                    Pattern::new("https://atcoder.jp*").unwrap(),
                    Duration::from_millis(600),
                )],
            ),
        }
    }

    pub fn with_auth(mut self, a: AuthCookie) -> Self {
        match a.session_id {
            Some(sid) => self.set_auth(&sid),
            None => self.revoke_auth(),
        }
        self
    }

    pub fn get_auth(&self) -> AuthCookie {
        let raw_cookies = match self.http.cookie_jar.cookies(&TOP_URL) {
            Some(s) => s,
            None => return AuthCookie { session_id: None },
        };
        let raw_cookies = raw_cookies.to_str().unwrap();
        let cookie = Cookie::split_parse(raw_cookies).find_map(|c| match c {
            Ok(c) if c.name() == COOKIE_KEY_SESSION_ID && !c.value().is_empty() => Some(c),
            _ => None,
        });
        AuthCookie {
            session_id: cookie.map(|c| c.value().to_owned()),
        }
    }

    pub fn set_auth(&mut self, session_id: &str) {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; Secure; Domain={}",
            COOKIE_KEY_SESSION_ID, session_id, DOMAIN,
        );
        self.http.cookie_jar.add_cookie_str(&cookie, &TOP_URL);
    }

    pub fn revoke_auth(&mut self) {
        let cookie = format!("{}=", COOKIE_KEY_SESSION_ID);
        self.http.cookie_jar.add_cookie_str(&cookie, &TOP_URL);
    }

    async fn scrape_csrf_token(&self, page_url: &str, form_selector: &'static str) -> Result<String> {
        let doc = util::fetch_html(&self.http, Url::parse(page_url).unwrap()).await?;
        let sel = util::selector_must_parsed(form_selector);
        let el = doc.select_first(&sel)?.value();
        Ok(el.get_attr("value", &sel)?.to_owned())
    }
}

impl Default for AtCoderClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Client for AtCoderClient {
    fn platform(&self) -> Platform {
        Platform::AtCoder
    }

    fn credential_fields(&self) -> &'static [CredFieldMeta] {
        use CredFieldKind::*;
        &[
            CredFieldMeta {
                name: "username",
                kind: Text,
            },
            CredFieldMeta {
                name: "password",
                kind: Password,
            },
        ]
    }

    fn is_logged_in(&self) -> bool {
        self.get_auth().session_id.is_some()
    }

    async fn login(&mut self, cred: CredMap) -> Result<()> {
        let csrf_token = self
            .scrape_csrf_token(LOGIN_URL, "#main-container form > input[name='csrf_token']")
            .await?;
        let resp = {
            let mut params = cred;
            params.insert("csrf_token", csrf_token);
            self.http.post(LOGIN_URL).form(&params).send().await?
        };
        let location = util::extract_302_location_header(&resp, LOGIN_URL)?;
        match location.as_str() {
            "/home" => Ok(()),
            path if path.starts_with("/login") => bail!(Error::WrongCredential {
                fields: "username or password",
            }),
            _ => bail!(Error::UnexpectedRedirectPath {
                got: location,
                expected: "/home".to_owned(),
                requested_url: LOGIN_URL.to_owned(),
            }),
        }
    }

    async fn logout(&mut self) -> Result<()> {
        let csrf_token = self
            .scrape_csrf_token(HOME_URL, "#main-div form > input[name='csrf_token']")
            .await?;
        let resp = {
            let mut params = HashMap::new();
            params.insert("csrf_token", csrf_token);
            self.http.post(LOGOUT_URL).form(&params).send().await?
        };
        self.revoke_auth();
        let location = util::extract_302_location_header(&resp, LOGOUT_URL)?;
        match location.as_str() {
            "/home" => Ok(()),
            _ => Err(Error::UnexpectedRedirectPath {
                got: location,
                expected: "/home".to_owned(),
                requested_url: LOGOUT_URL.to_owned(),
            }),
        }
    }

    fn export_authtoken_as_json(&self) -> String {
        self.get_auth().to_json()
    }

    fn load_authtoken_json(&mut self, serialized_auth: &str) -> Result<()> {
        AuthCookie::from_json(serialized_auth)?
            .session_id
            .map(|sid| self.set_auth(&sid));
        Ok(())
    }

    async fn fetch_standings_json(&self, contest: &ContestId) -> Result<String> {
        let url = standings_json_url(contest);
        let url_str = url.to_string();
        let resp = self.http.get(url).send().await?;
        match resp.status() {
            StatusCode::OK => Ok(resp.text().await?),
            // Standings of a members-only contest redirect to the login page.
            StatusCode::FOUND => Err(Error::NeedLogin {
                requested_url: url_str,
            }),
            got => Err(Error::UnexpectedResponseCode {
                got,
                expected: StatusCode::OK,
                requested_url: url_str,
            }),
        }
    }

    async fn fetch_contest_archive(&self, page: u32) -> Result<Vec<ContestEntry>> {
        let doc = util::fetch_html(&self.http, contest_archive_url(page)).await?;
        helper::scrape_contest_archive(&doc)
    }
}
