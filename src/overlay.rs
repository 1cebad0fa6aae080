use web_sys as web;

#[inline]
pub fn exists(document: &web::Document, hint_id: &str) -> bool {
    document.get_element_by_id(hint_id).is_some()
}

#[inline]
pub fn hide(document: &web::Document, hint_id: &str) {
    if let Some(el) = document.get_element_by_id(hint_id) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("hidden", "");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, hint_id: &str) -> bool {
    document
        .get_element_by_id(hint_id)
        .map(|el| el.class_list().contains("hidden") || el.has_attribute("hidden"))
        .unwrap_or(true)
}

/// Swap the hint text after a refused attempt so the user knows a press on
/// the hint itself will try again.
pub fn mark_retry(document: &web::Document, hint_id: &str) {
    if let Some(el) = document.get_element_by_id(hint_id) {
        _ = el.class_list().add_1("retry");
        if let Some(text) = el.get_attribute("data-retry-text") {
            el.set_text_content(Some(&text));
        }
    }
}
