//! Preference command handlers.

use std::collections::BTreeMap;

use serde::Serialize;

use uidb_core::ViewMode;

use crate::cli::{PrefsArgs, PrefsCommand, ViewArg};
use crate::config::CliPreferences;
use crate::error::CliError;
use crate::output::{self, OutputOpts};

#[derive(Serialize)]
struct PrefsView {
    view_mode: ViewMode,
    keyboard_tip_dismissed: bool,
    /// `None` with `--no-persist`.
    file: Option<String>,
    /// Raw entries as stored, namespaced keys included.
    stored: BTreeMap<String, String>,
}

fn format_prefs(p: &PrefsView) -> String {
    let mut lines = vec![
        format!("view_mode              = {}", p.view_mode),
        format!("keyboard_tip_dismissed = {}", p.keyboard_tip_dismissed),
        format!(
            "file                   = {}",
            p.file.as_deref().unwrap_or("(not persisted)")
        ),
    ];
    if !p.stored.is_empty() {
        lines.push(String::new());
        lines.extend(p.stored.iter().map(|(k, v)| format!("{k} = {v:?}")));
    }
    lines.join("\n")
}

pub fn handle(
    args: PrefsArgs,
    prefs: &mut CliPreferences,
    out: &OutputOpts,
) -> Result<(), CliError> {
    match args.command {
        PrefsCommand::Show => {
            let store = prefs.backend();
            let view = PrefsView {
                view_mode: prefs.view_mode(),
                keyboard_tip_dismissed: prefs.keyboard_tip_dismissed(),
                file: store.location().map(|p| p.display().to_string()),
                stored: store.entries().into_iter().collect(),
            };
            let rendered =
                output::render_single(out.format, &view, format_prefs, |v| v.view_mode.to_string())?;
            output::print_output(&rendered, out.quiet);
            Ok(())
        }

        PrefsCommand::Get { key } => {
            if let Some(value) = prefs.get(&key) {
                output::print_output(&value, out.quiet);
            }
            Ok(())
        }

        PrefsCommand::Set { key, value } => {
            prefs.set(&key, &value);
            Ok(())
        }

        PrefsCommand::View { mode } => {
            let mode = match mode {
                ViewArg::Table => ViewMode::Table,
                ViewArg::Card => ViewMode::Card,
            };
            prefs.set_view_mode(mode);
            output::notice(&format!("Device list view set to {mode}"), out.quiet);
            Ok(())
        }

        PrefsCommand::DismissTip => {
            prefs.dismiss_keyboard_tip();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_view_lists_raw_entries() {
        let view = PrefsView {
            view_mode: ViewMode::Card,
            keyboard_tip_dismissed: false,
            file: None,
            stored: BTreeMap::from([("app_setting_viewMode".to_owned(), "card".to_owned())]),
        };
        let text = format_prefs(&view);
        assert!(text.contains("view_mode              = card"));
        assert!(text.contains("(not persisted)"));
        assert!(text.ends_with("app_setting_viewMode = \"card\""));
    }
}
