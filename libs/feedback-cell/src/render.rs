use crate::banner::Banner;
use crate::surface::{Feedback, PAGE_SPINNER};

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn banner(banner: &Banner) -> String {
    format!(
        r##"<div id="customAlert" class="custom-alert {class}" data-dismiss-after="{ms}"><div class="flex-1">{message}</div></div>"##,
        class = banner.kind.css_class(),
        ms = banner.lifetime.as_millis(),
        message = escape(&banner.message),
    )
}

pub fn banners(feedback: &Feedback) -> String {
    feedback.banners().iter().map(banner).collect()
}

/// Class list for a `skeleton-text` element inside `container`.
pub fn skeleton_class(feedback: &Feedback, container: &str) -> &'static str {
    if feedback.is_skeleton(container) {
        "skeleton-text skeleton"
    } else {
        "skeleton-text"
    }
}

pub fn inline_loader(feedback: &Feedback, element: &str) -> &'static str {
    if feedback.is_spinning(element) {
        r#"<div class="loader-small"></div>"#
    } else {
        r#"<div class="loader-small d-none"></div>"#
    }
}

pub fn page_spinner(feedback: &Feedback) -> &'static str {
    if feedback.is_rendering() || feedback.is_spinning(PAGE_SPINNER) {
        r#"<div id="spinner" class="loader"></div>"#
    } else {
        r#"<div id="spinner" class="loader d-none"></div>"#
    }
}

pub fn load_error_state() -> &'static str {
    r#"<div class="emptyState">
        <img src="/assets/ERROR.svg" alt="" />
        <h3 class="no-data">ERROR </h3>
        <p>An error occurred while retrieving data</p>
    </div>"#
}

/// Removes banners once their lifetime runs out, driven by the
/// `data-dismiss-after` attribute.
pub const BANNER_SCRIPT: &str = r#"<script>
document.querySelectorAll('[data-dismiss-after]').forEach(function (el) {
    setTimeout(function () { el.remove(); }, parseInt(el.dataset.dismissAfter, 10));
});
</script>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::BannerKind;
    use crate::surface::Toggle;

    #[test]
    fn test_banner_markup_carries_lifetime_and_escapes() {
        let mut feedback = Feedback::new();
        feedback.action_result("Saved <b>", BannerKind::Success);

        let html = banners(&feedback);
        assert!(html.contains("custom-alert-success"));
        assert!(html.contains(r#"data-dismiss-after="1000""#));
        assert!(html.contains("Saved &lt;b&gt;"));
    }

    #[test]
    fn test_skeleton_and_loader_classes() {
        let mut feedback = Feedback::new();
        assert_eq!(skeleton_class(&feedback, "appointmentModal"), "skeleton-text");
        assert!(inline_loader(&feedback, "button-primary").contains("d-none"));

        feedback.toggle_skeleton("appointmentModal", Toggle::On);
        feedback.toggle_spinner("button-primary", Toggle::On);
        assert_eq!(skeleton_class(&feedback, "appointmentModal"), "skeleton-text skeleton");
        assert!(!inline_loader(&feedback, "button-primary").contains("d-none"));
    }
}
