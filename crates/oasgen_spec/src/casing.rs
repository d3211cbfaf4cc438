//! Naming transforms used by the compiler.
//!
//! Two different capitalisations are in play and must not be mixed up:
//! [`title_case_first`] only touches the first character and is used for
//! display labels (tags, summaries), while [`upper_camel_case`] title-cases
//! every word and is used for identifiers (operation ids, schema keys).

use heck::{ToKebabCase, ToUpperCamelCase};

/// Upper-case the first character, leave the rest as written.
pub fn title_case_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case words joined by `-`, split on case, space and underscore boundaries.
pub fn kebab_case(s: &str) -> String {
    s.to_kebab_case()
}

/// Every word title-cased and concatenated.
pub fn upper_camel_case(s: &str) -> String {
    s.to_upper_camel_case()
}
