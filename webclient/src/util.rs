use reqwest::{Response, StatusCode, Url};
use scraper::{node::Element, ElementRef, Html, Selector};

use crate::error::*;
use crate::http::Client;

pub fn extract_302_location_header(
    resp: &Response,
    requested_url: impl Into<String>,
) -> Result<String> {
    let got = resp.status();
    let expected = StatusCode::FOUND;
    if got != expected {
        return Err(Error::UnexpectedResponseCode {
            got,
            expected,
            requested_url: requested_url.into(),
        });
    };
    let bytes = resp.headers().get("Location").unwrap();
    Ok(bytes.to_str().unwrap().to_owned())
}

pub fn selector_must_parsed(sel: &'static str) -> Selector {
    Selector::parse(sel).expect("Failed to parse  `&'static str`  selector")
}

pub async fn fetch_html(c: &Client, url: Url) -> Result<Html> {
    let url_str = url.to_string();
    let resp = c.get(url).send().await?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(Error::UnexpectedResponseCode {
            got: status,
            expected: StatusCode::OK,
            requested_url: url_str,
        });
    }

    let html = resp.text().await?;
    Ok(Html::parse_document(&html))
}

pub trait DocExt {
    fn select_first(&self, sel: &Selector) -> Result<ElementRef>;
}

impl DocExt for Html {
    fn select_first(&self, sel: &Selector) -> Result<ElementRef> {
        match self.select(sel).next() {
            Some(el) => Ok(el),
            None => Err(Error::NoSuchElementMatchesToSelector(sel.to_owned())),
        }
    }
}

impl<'a> DocExt for ElementRef<'a> {
    fn select_first(&self, sel: &Selector) -> Result<ElementRef> {
        match self.select(sel).next() {
            Some(el) => Ok(el),
            None => Err(Error::NoSuchElementMatchesToSelector(sel.to_owned())),
        }
    }
}

pub trait ElementExt {
    fn get_attr(&self, name: &'static str, ctx_selector: &Selector) -> Result<&str>;
}

impl ElementExt for Element {
    fn get_attr(&self, name: &'static str, ctx_selector: &Selector) -> Result<&str> {
        match self.attr(name) {
            Some(value) => Ok(value),
            None => Err(Error::NoSuchAttr(name, ctx_selector.to_owned())),
        }
    }
}
