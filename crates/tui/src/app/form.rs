//! Editing rules of the add-item mini-form.
//!
//! The form edits the plan's [`Draft`] in place. Category and label are
//! picked from the taxonomy with `←/→`; only the amount is typed.

use engine::{Draft, taxonomy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Kind,
    Category,
    Label,
    Amount,
}

impl FormField {
    pub const ALL: [FormField; 4] = [Self::Kind, Self::Category, Self::Label, Self::Amount];

    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "Tür",
            Self::Category => "Kategori",
            Self::Label => "Kalem",
            Self::Amount => "Tutar",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Kind => Self::Category,
            Self::Category => Self::Label,
            Self::Label => Self::Amount,
            Self::Amount => Self::Kind,
        }
    }
}

/// Moves the selection of `field` one option forward or back.
pub fn cycle(draft: &mut Draft, field: FormField, forward: bool) {
    match field {
        FormField::Kind => {
            draft.kind = draft.kind.other();
            draft.category.clear();
            draft.label.clear();
        }
        FormField::Category => {
            let names: Vec<&str> = taxonomy::categories(draft.kind)
                .iter()
                .map(|category| category.name)
                .collect();
            if let Some(name) = step(&names, &draft.category, forward) {
                draft.category = name.to_string();
                draft.label.clear();
            }
        }
        FormField::Label => {
            let labels = taxonomy::labels(draft.kind, &draft.category);
            if let Some(label) = step(labels, &draft.label, forward) {
                draft.label = label.to_string();
            }
        }
        FormField::Amount => {}
    }
}

fn step<'a>(options: &[&'a str], current: &str, forward: bool) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let last = options.len() - 1;
    let index = match options.iter().position(|option| *option == current) {
        Some(index) if forward => (index + 1) % options.len(),
        Some(0) => last,
        Some(index) => index - 1,
        None if forward => 0,
        None => last,
    };
    Some(options[index])
}

/// Types `ch` into the amount. Other fields and characters are ignored.
pub fn push_char(draft: &mut Draft, field: FormField, ch: char) -> bool {
    if field != FormField::Amount || !(ch.is_ascii_digit() || ch == '.' || ch == ',') {
        return false;
    }
    draft.amount.push(ch);
    true
}

pub fn backspace(draft: &mut Draft, field: FormField) {
    match field {
        FormField::Kind => {}
        FormField::Category => {
            draft.category.clear();
            draft.label.clear();
        }
        FormField::Label => draft.label.clear(),
        FormField::Amount => {
            draft.amount.pop();
        }
    }
}

pub fn value(draft: &Draft, field: FormField) -> &str {
    match field {
        FormField::Kind => draft.kind.label(),
        FormField::Category => &draft.category,
        FormField::Label => &draft.label,
        FormField::Amount => &draft.amount,
    }
}

#[cfg(test)]
mod tests {
    use engine::LineKind;

    use super::*;

    #[test]
    fn fields_cycle_in_order() {
        let mut field = FormField::default();
        for expected in [
            FormField::Category,
            FormField::Label,
            FormField::Amount,
            FormField::Kind,
        ] {
            field = field.next();
            assert_eq!(field, expected);
        }
    }

    #[test]
    fn category_cycles_and_resets_label() {
        let mut draft = Draft::default();
        cycle(&mut draft, FormField::Category, true);
        let first = taxonomy::categories(LineKind::Income)[0];
        assert_eq!(draft.category, first.name);

        cycle(&mut draft, FormField::Label, true);
        assert_eq!(draft.label, first.labels[0]);

        cycle(&mut draft, FormField::Category, true);
        assert_eq!(draft.category, taxonomy::categories(LineKind::Income)[1].name);
        assert!(draft.label.is_empty());
    }

    #[test]
    fn cycling_back_from_empty_wraps_to_last() {
        let mut draft = Draft::default();
        cycle(&mut draft, FormField::Category, false);
        let categories = taxonomy::categories(LineKind::Income);
        assert_eq!(draft.category, categories[categories.len() - 1].name);

        cycle(&mut draft, FormField::Category, true);
        assert_eq!(draft.category, categories[0].name);
    }

    #[test]
    fn label_needs_a_category() {
        let mut draft = Draft::default();
        cycle(&mut draft, FormField::Label, true);
        assert!(draft.label.is_empty());
    }

    #[test]
    fn switching_kind_clears_selection() {
        let mut draft = Draft::default();
        cycle(&mut draft, FormField::Category, true);
        cycle(&mut draft, FormField::Label, true);
        cycle(&mut draft, FormField::Kind, true);
        assert_eq!(draft.kind, LineKind::Expense);
        assert!(draft.category.is_empty());
        assert!(draft.label.is_empty());
        assert_eq!(value(&draft, FormField::Kind), "Gider");
    }

    #[test]
    fn amount_accepts_only_number_characters() {
        let mut draft = Draft::default();
        for ch in "12a,5".chars() {
            push_char(&mut draft, FormField::Amount, ch);
        }
        assert_eq!(draft.amount, "12,5");
        assert!(!push_char(&mut draft, FormField::Category, '1'));

        backspace(&mut draft, FormField::Amount);
        assert_eq!(draft.amount, "12,");
    }
}
