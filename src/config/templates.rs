//! Built-in language templates.

use once_cell::sync::Lazy;

use super::language::{Language, LineDirective};

/// Built-in language configurations, lazily initialized.
static BUILTIN_LANGUAGES: Lazy<Vec<Language>> = Lazy::new(|| {
    vec![
        // C family understands `#line N "file"`
        Language::new("c", LineDirective::C).with_identifiers(&["C", "h"]),
        Language::new("cpp", LineDirective::C).with_identifiers(&["c++", "cxx", "cc", "hpp"]),
        Language::new("objc", LineDirective::C),

        // Go has its own `//line file:N` form
        Language::new("go", LineDirective::Go).with_identifiers(&["golang"]),

        // `#line` is a comment to the shell
        Language::new("sh", LineDirective::C).with_identifiers(&["bash", "shell", "zsh"]),
    ]
});

/// Returns the list of built-in language configurations.
pub fn builtin_languages() -> &'static [Language] {
    &BUILTIN_LANGUAGES
}

/// Find a language by name or fence tag.
pub fn find_language(tag: &str) -> Option<&'static Language> {
    builtin_languages().iter().find(|lang| lang.matches(tag))
}
