//! Fixed budget taxonomy.
//!
//! Every line item belongs to a category of its [`LineKind`] and carries a
//! label taken from that category. The lists below are the only values the
//! add-item form offers; lines hydrated from the server are accepted as they
//! come.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, LineKind};

/// A category and the labels ("kalemler") it offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub labels: &'static [&'static str],
}

pub const INCOME_CATEGORIES: &[Category] = &[
    Category {
        name: "A. Temel ve Düzenli Gelirler",
        labels: &[
            "Üyelik Aidatları (Yıllık)",
            "Üye Giriş Aidatları",
            "Düzenli Bağışlar",
        ],
    },
    Category {
        name: "B. Bağış ve Yardımlar",
        labels: &[
            "Bireysel Bağışlar",
            "Kurumsal Bağışlar",
            "Ayni Bağışlar",
            "Kampanya Gelirleri",
        ],
    },
    Category {
        name: "C. Proje ve Hibe Gelirleri",
        labels: &[
            "Ulusal Hibeler",
            "Uluslararası Hibeler",
            "Kamu Kurumu Destekleri",
        ],
    },
    Category {
        name: "D. Etkinlik ve Faaliyet Gelirleri",
        labels: &[
            "Etkinlik Bilet Gelirleri",
            "Kermes ve Satış Gelirleri",
            "Eğitim ve Seminer Gelirleri",
        ],
    },
    Category {
        name: "E. Diğer Gelirler",
        labels: &[
            "Faiz ve Finansman Gelirleri",
            "Kira Gelirleri",
            "Çeşitli Gelirler",
        ],
    },
];

pub const EXPENSE_CATEGORIES: &[Category] = &[
    Category {
        name: "1. Personel Giderleri",
        labels: &[
            "Maaş ve Ücretler",
            "SGK Primleri",
            "Huzur Hakkı ve Ödenekler",
        ],
    },
    Category {
        name: "2. Yönetim ve Ofis Giderleri",
        labels: &[
            "Kira",
            "Elektrik, Su ve Doğalgaz",
            "İletişim ve İnternet",
            "Kırtasiye ve Sarf Malzemeleri",
        ],
    },
    Category {
        name: "3. Faaliyet ve Proje Giderleri",
        labels: &[
            "Etkinlik Organizasyonu",
            "Proje Uygulama Giderleri",
            "Burs ve Sosyal Yardımlar",
        ],
    },
    Category {
        name: "4. Tanıtım ve İletişim Giderleri",
        labels: &[
            "Reklam ve Tanıtım",
            "Basılı Materyal",
            "Web Sitesi ve Yazılım",
        ],
    },
    Category {
        name: "5. Vergi, Harç ve Mali Giderler",
        labels: &["Vergi ve Harçlar", "Banka Masrafları", "Mali Müşavirlik"],
    },
    Category {
        name: "6. Demirbaş ve Bakım Giderleri",
        labels: &["Demirbaş Alımı", "Bakım ve Onarım"],
    },
    Category {
        name: "7. Diğer Giderler",
        labels: &[
            "Ulaşım ve Konaklama",
            "Temsil ve Ağırlama",
            "Çeşitli Giderler",
        ],
    },
];

/// Categories offered for `kind`, in display order.
#[must_use]
pub fn categories(kind: LineKind) -> &'static [Category] {
    match kind {
        LineKind::Income => INCOME_CATEGORIES,
        LineKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// Looks a category up by name, ignoring case, accents and spacing.
#[must_use]
pub fn find_category(kind: LineKind, name: &str) -> Option<&'static Category> {
    let key = normalize_key(name)?;
    categories(kind)
        .iter()
        .find(|category| normalize_key(category.name).as_deref() == Some(key.as_str()))
}

/// Labels offered for `category` within `kind`; empty when the category is
/// not part of that kind.
#[must_use]
pub fn labels(kind: LineKind, category: &str) -> &'static [&'static str] {
    find_category(kind, category)
        .map(|category| category.labels)
        .unwrap_or(&[])
}

/// Validates a `(category, label)` pair against the taxonomy of `kind` and
/// returns the canonical spellings.
pub fn resolve(
    kind: LineKind,
    category: &str,
    label: &str,
) -> Result<(&'static str, &'static str), EngineError> {
    if category.trim().is_empty() {
        return Err(EngineError::MissingField("category"));
    }
    if label.trim().is_empty() {
        return Err(EngineError::MissingField("label"));
    }

    let found = find_category(kind, category)
        .ok_or_else(|| EngineError::UnknownCategory(category.trim().to_string()))?;

    let key = normalize_key(label);
    let canonical = found
        .labels
        .iter()
        .find(|candidate| normalize_key(candidate) == key)
        .ok_or_else(|| EngineError::UnknownLabel {
            category: found.name.to_string(),
            label: label.trim().to_string(),
        })?;

    Ok((found.name, *canonical))
}

/// Lowercased, accent-free form used for comparisons only.
fn normalize_key(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut prev_space = false;
    for ch in trimmed.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            // Dotless ı has no decomposition; fold it like its dotted twin.
            let ch = if ch == 'ı' { 'i' } else { ch };
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim_end();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}
