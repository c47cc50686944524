use ::lazy_regex::{lazy_regex, Lazy, Regex};

use crate::model::{ContestId, Url};

pub(super) static RE_CONTEST_HREF: Lazy<Regex> = lazy_regex!(r"^/contests/([0-9A-Za-z_-]+)/?$");
pub(super) static RE_DURATION: Lazy<Regex> = lazy_regex!(r"(\d+):(\d{2})");

pub const DOMAIN: &str = "atcoder.jp";
pub const HOME_URL: &str = "https://atcoder.jp/home";
pub const LOGIN_URL: &str = "https://atcoder.jp/login";
pub const LOGOUT_URL: &str = "https://atcoder.jp/logout";
pub static TOP_URL: Lazy<Url> = Lazy::new(|| Url::parse("https://atcoder.jp").unwrap());

pub fn standings_json_url(contest: &ContestId) -> Url {
    Url::parse(&format!(
        "https://{}/contests/{}/standings/json",
        DOMAIN, contest
    ))
    .unwrap()
}

pub fn contest_archive_url(page: u32) -> Url {
    Url::parse(&format!(
        "https://{}/contests/archive?page={}&lang=ja",
        DOMAIN, page
    ))
    .unwrap()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_urls() {
        let id = ContestId::new("arc121").unwrap();
        assert_eq!(
            standings_json_url(&id).as_str(),
            "https://atcoder.jp/contests/arc121/standings/json"
        );
        assert_eq!(
            contest_archive_url(3).as_str(),
            "https://atcoder.jp/contests/archive?page=3&lang=ja"
        );
    }
}
