//! Local patches to the cached form list
//!
//! Both helpers are only applied once the server has acknowledged the change.

use super::{FormId, FormSummary};

/// Flip the publish flag of every cached entry with `form_id`.
/// Returns false when no entry matched.
pub fn apply_toggle(forms: &mut [FormSummary], form_id: &FormId) -> bool {
    let mut found = false;
    for form in forms.iter_mut().filter(|f| &f.form_id == form_id) {
        form.is_published = !form.is_published;
        found = true;
    }
    found
}

/// Drop cached entries with `form_id`, keeping the others in order.
/// Returns the number of entries removed.
pub fn apply_delete(forms: &mut Vec<FormSummary>, form_id: &FormId) -> usize {
    let before = forms.len();
    forms.retain(|f| &f.form_id != form_id);
    before - forms.len()
}

/// Cached entry with `form_id`
pub fn find_form<'a>(forms: &'a [FormSummary], form_id: &FormId) -> Option<&'a FormSummary> {
    forms.iter().find(|f| &f.form_id == form_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(id: &str, is_published: bool) -> FormSummary {
        FormSummary {
            form_id: FormId::new(id),
            title: format!("Form {id}"),
            response_count: 0,
            is_published,
            created_at: None,
        }
    }

    #[test]
    fn test_toggle_flips_only_matching_entry() {
        let mut forms = vec![summary("1", false), summary("2", true), summary("3", false)];
        assert!(apply_toggle(&mut forms, &FormId::new("2")));
        let flags: Vec<bool> = forms.iter().map(|f| f.is_published).collect();
        assert_eq!(flags, vec![false, false, false]);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut forms = vec![summary("1", false)];
        assert!(!apply_toggle(&mut forms, &FormId::new("9")));
        assert!(!forms[0].is_published);
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let mut forms = vec![
            summary("1", false),
            summary("2", false),
            summary("3", true),
            summary("4", false),
        ];
        assert_eq!(apply_delete(&mut forms, &FormId::new("2")), 1);
        let ids: Vec<&str> = forms.iter().map(|f| f.form_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut forms = vec![summary("1", false)];
        assert_eq!(apply_delete(&mut forms, &FormId::new("2")), 0);
        assert_eq!(forms.len(), 1);
    }

    #[test]
    fn test_find_form() {
        let forms = vec![summary("1", false), summary("2", true)];
        assert!(find_form(&forms, &FormId::new("2")).unwrap().is_published);
        assert!(find_form(&forms, &FormId::new("3")).is_none());
    }
}
