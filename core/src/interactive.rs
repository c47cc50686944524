use std::io;

use acstats_webclient::{CredFieldKind, CredFieldMeta, CredMap};
use dialoguer::{theme::ColorfulTheme, Input, Password};

fn ask_text(prompt: &str) -> io::Result<String> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
}

fn ask_password(prompt: &str) -> io::Result<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()
}

pub fn ask_credential(fields: &[CredFieldMeta]) -> CredMap {
    let mut map = CredMap::new();

    for &CredFieldMeta { name, kind } in fields {
        use CredFieldKind::*;

        let value = match kind {
            Text => ask_text(name),
            Password => ask_password(name),
        }
        .unwrap_or_else(|e| panic!("{:?}", e));

        map.insert(name, value);
    }
    map
}
