use feedback_cell::render::{escape, inline_loader, skeleton_class};
use feedback_cell::Feedback;

use crate::models::{label, MIN_PERIOD, SETTING_NAMES};
use crate::panel::{SettingsPanel, SAVE_BUTTON, SETTINGS_FORM};

pub const PAGE_PATH: &str = "/settings";

pub fn render_panel(panel: &SettingsPanel, feedback: &Feedback) -> String {
    let (Some(inputs), Some(labels)) = (panel.inputs(), panel.labels()) else {
        let class = if panel.is_open() { "d-block" } else { "d-none" };
        return format!(
            r#"<div id="settingsModal" class="settings-modal {class}"><div id="{SETTINGS_FORM}"><p class="{skeleton}"></p><p class="{skeleton}"></p></div></div>"#,
            skeleton = skeleton_class(feedback, SETTINGS_FORM),
        );
    };

    let fields: String = SETTING_NAMES
        .iter()
        .map(|name| {
            let value = inputs.get(*name).map(String::as_str).unwrap_or_default();
            let shown = labels.get(*name).map(String::as_str).unwrap_or_default();
            format!(
                r#"<div class="form-group">
                <label for="{name}">{label}: <span id="{name}_text">{shown}</span> minutes</label>
                <input type="number" id="{name}" name="{name}" min="{MIN_PERIOD}" value="{value}" />
            </div>"#,
                label = label(name),
                shown = escape(shown),
                value = escape(value),
            )
        })
        .collect();

    format!(
        r#"<div id="settingsModal" class="settings-modal d-block">
        <form id="{SETTINGS_FORM}" method="post" action="{PAGE_PATH}">
            {fields}
            <button id="{SAVE_BUTTON}" type="submit" class="button-primary"{disabled}>Save{loader}</button>
        </form>
        <form method="post" action="{PAGE_PATH}/close"><button id="closeSettingsModal" type="submit" class="button-secondary">Close</button></form>
    </div>"#,
        disabled = if panel.save_enabled() { "" } else { r#" disabled="disabled""# },
        loader = inline_loader(feedback, SAVE_BUTTON),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Setting;

    fn loaded(prior: &str) -> (SettingsPanel, Feedback) {
        let mut feedback = Feedback::new();
        let mut panel = SettingsPanel::new();
        if let Some(ticket) = panel.open(&mut feedback) {
            let settings = vec![Setting::new("prior_period", prior), Setting::new("subsequent_period", "30")];
            panel.finish_load(ticket, Ok(settings), &mut feedback).unwrap();
        }
        (panel, feedback)
    }

    #[test]
    fn test_closed_panel_is_hidden() {
        let html = render_panel(&SettingsPanel::new(), &Feedback::new());
        assert!(html.contains("settings-modal d-none"));
    }

    #[test]
    fn test_loading_panel_shows_skeleton() {
        let mut feedback = Feedback::new();
        let mut panel = SettingsPanel::new();
        panel.open(&mut feedback);

        let html = render_panel(&panel, &feedback);
        assert!(html.contains("d-block"));
        assert!(html.contains("skeleton-text skeleton"));
    }

    #[test]
    fn test_labels_and_save_button() {
        let (panel, feedback) = loaded("20");
        let html = render_panel(&panel, &feedback);
        assert!(html.contains(r#"<span id="prior_period_text">20</span>"#));
        assert!(!html.contains("disabled"));

        let (panel, feedback) = loaded("14");
        let html = render_panel(&panel, &feedback);
        assert!(html.contains(r#"disabled="disabled""#));
    }
}
