use algoarena_core::domain::Language;

/// Judge0 CE language ids.
pub fn judge0_language_id(language: Language) -> u32 {
    match language {
        Language::Cpp => 54,
        Language::Go => 60,
        Language::Java => 62,
        Language::JavaScript => 63,
        Language::Python => 71,
        Language::Rust => 73,
        Language::TypeScript => 74,
    }
}
