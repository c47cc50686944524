use ::chrono::DateTime;
use scraper::{ElementRef, Html};

use super::urls::{RE_CONTEST_HREF, RE_DURATION};
use crate::{
    error::*,
    model::{ContestEntry, ContestId},
    util::{self, DocExt as _, ElementExt as _},
};

/// Start time cell format on the japanese archive page.
/// (e.g.) "2021-06-06 21:00:00+0900"
const START_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%z";

/// Extracts every contest row of an archive listing page.
/// Row layout: `| start time | contest link | duration "H:MM" | rated range |`
pub(super) fn scrape_contest_archive(doc: &Html) -> Result<Vec<ContestEntry>> {
    let sel_row = util::selector_must_parsed("div.table-responsive table.table tbody tr");
    doc.select(&sel_row).map(parse_archive_row).collect()
}

fn parse_archive_row(row: ElementRef) -> Result<ContestEntry> {
    let sel_td = util::selector_must_parsed("td");
    let sel_link = util::selector_must_parsed("a");

    let mut tds = row.select(&sel_td);
    let (Some(td_time), Some(td_name), Some(td_duration)) = (tds.next(), tds.next(), tds.next()) else {
        return Err(Error::InvalidArchiveRow(
            "expected at least 3 <td> cells".to_owned(),
        ));
    };

    let start_at = {
        let text: String = td_time.text().collect();
        let text = text.trim();
        DateTime::parse_from_str(text, START_TIME_FMT)
            .map_err(|_| Error::InvalidArchiveRow(format!("bad start time '{}'", text)))?
            .with_timezone(&chrono::Local)
    };

    let link = td_name.select_first(&sel_link)?;
    let href = link.value().get_attr("href", &sel_link)?;
    let Some(caps) = RE_CONTEST_HREF.captures(href) else {
        return Err(Error::InvalidArchiveRow(format!("bad contest href '{}'", href)));
    };
    // The capture group charset equals the ContestId charset.
    let id = ContestId::new(&caps[1]).unwrap();
    let name = link.text().collect::<String>().trim().to_owned();

    let duration_min = {
        let text: String = td_duration.text().collect();
        let Some(caps) = RE_DURATION.captures(&text) else {
            return Err(Error::InvalidArchiveRow(format!(
                "bad duration '{}'",
                text.trim()
            )));
        };
        let hours: u32 = caps[1].parse().unwrap();
        let minutes: u32 = caps[2].parse().unwrap();
        hours * 60 + minutes
    };

    Ok(ContestEntry {
        id,
        name,
        start_at,
        duration_min,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const ARCHIVE_HTML: &str = r#"
    <html><body>
    <div class="table-responsive">
      <table class="table">
        <tbody>
          <tr>
            <td class="text-center"><a href="http://www.timeanddate.com/"><time class="fixtime">2021-06-06 21:00:00+0900</time></a></td>
            <td><span>Ⓐ</span> <a href="/contests/arc121">AtCoder Regular Contest 121</a></td>
            <td class="text-center">02:00</td>
            <td class="text-center"> - 2799</td>
          </tr>
          <tr>
            <td class="text-center"><a href="http://www.timeanddate.com/"><time class="fixtime">2021-06-05 21:00:00+0900</time></a></td>
            <td><span>Ⓐ</span> <a href="/contests/abc204">AtCoder Beginner Contest 204</a></td>
            <td class="text-center">01:40</td>
            <td class="text-center"> - 1999</td>
          </tr>
        </tbody>
      </table>
    </div>
    </body></html>"#;

    #[test]
    fn scrape_archive_rows() {
        let doc = Html::parse_document(ARCHIVE_HTML);
        let entries = scrape_contest_archive(&doc).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].id, ContestId::new("arc121").unwrap());
        assert_eq!(entries[0].name, "AtCoder Regular Contest 121");
        assert_eq!(entries[0].duration_min, 120);
        let expected = DateTime::parse_from_str("2021-06-06 21:00:00+0900", START_TIME_FMT).unwrap();
        assert_eq!(entries[0].start_at, expected);

        assert_eq!(entries[1].id, ContestId::new("abc204").unwrap());
        assert_eq!(entries[1].duration_min, 100);
    }

    #[test]
    fn scrape_archive_rejects_bad_duration() {
        let html = ARCHIVE_HTML.replace("02:00", "unknown");
        let doc = Html::parse_document(&html);
        let err = scrape_contest_archive(&doc).unwrap_err();
        assert!(matches!(err, Error::InvalidArchiveRow(_)));
    }

    #[test]
    fn empty_page_yields_no_entries() {
        let doc = Html::parse_document("<html><body><p>No contests</p></body></html>");
        assert_eq!(scrape_contest_archive(&doc).unwrap(), vec![]);
    }
}
