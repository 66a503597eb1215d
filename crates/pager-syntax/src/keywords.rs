//! Flat, first-match-wins keyword table. Intentionally permissive across
//! source languages rather than scoped to one grammar: a pager highlights
//! whatever text it is pointed at, and getting the language right from
//! content alone is out of scope.

use crate::ColorClass;

pub const KEYWORDS: &[(&str, ColorClass)] = &[
    // Preprocessor / module directives.
    ("#include", ColorClass::Preprocessor),
    ("#define", ColorClass::Preprocessor),
    ("#ifdef", ColorClass::Preprocessor),
    ("#ifndef", ColorClass::Preprocessor),
    ("#endif", ColorClass::Preprocessor),
    ("#pragma", ColorClass::Preprocessor),
    // Control flow and declaration keywords, pooled across C, Python,
    // JavaScript, and common OOP vocabulary.
    ("return", ColorClass::KeywordA),
    ("if", ColorClass::KeywordA),
    ("else", ColorClass::KeywordA),
    ("elif", ColorClass::KeywordA),
    ("for", ColorClass::KeywordA),
    ("while", ColorClass::KeywordA),
    ("break", ColorClass::KeywordA),
    ("continue", ColorClass::KeywordA),
    ("switch", ColorClass::KeywordA),
    ("case", ColorClass::KeywordA),
    ("default", ColorClass::KeywordA),
    ("struct", ColorClass::KeywordA),
    ("enum", ColorClass::KeywordA),
    ("typedef", ColorClass::KeywordA),
    ("static", ColorClass::KeywordA),
    ("const", ColorClass::KeywordA),
    ("void", ColorClass::KeywordA),
    ("def", ColorClass::KeywordA),
    ("class", ColorClass::KeywordA),
    ("import", ColorClass::KeywordA),
    ("from", ColorClass::KeywordA),
    ("try", ColorClass::KeywordA),
    ("except", ColorClass::KeywordA),
    ("finally", ColorClass::KeywordA),
    ("with", ColorClass::KeywordA),
    ("lambda", ColorClass::KeywordA),
    ("function", ColorClass::KeywordA),
    ("var", ColorClass::KeywordA),
    ("let", ColorClass::KeywordA),
    ("async", ColorClass::KeywordA),
    ("await", ColorClass::KeywordA),
    ("public", ColorClass::KeywordA),
    ("private", ColorClass::KeywordA),
    ("protected", ColorClass::KeywordA),
    ("interface", ColorClass::KeywordA),
    ("extends", ColorClass::KeywordA),
    ("implements", ColorClass::KeywordA),
    ("new", ColorClass::KeywordA),
    ("super", ColorClass::KeywordA),
    ("fn", ColorClass::KeywordA),
    ("pub", ColorClass::KeywordA),
    ("impl", ColorClass::KeywordA),
    ("match", ColorClass::KeywordA),
    ("mod", ColorClass::KeywordA),
    ("use", ColorClass::KeywordA),
    // Type names and type-ish literals.
    ("int", ColorClass::KeywordB),
    ("char", ColorClass::KeywordB),
    ("long", ColorClass::KeywordB),
    ("short", ColorClass::KeywordB),
    ("unsigned", ColorClass::KeywordB),
    ("size_t", ColorClass::KeywordB),
    ("uint32_t", ColorClass::KeywordB),
    ("uint64_t", ColorClass::KeywordB),
    ("int32_t", ColorClass::KeywordB),
    ("int64_t", ColorClass::KeywordB),
    ("bool", ColorClass::KeywordB),
    ("float", ColorClass::KeywordB),
    ("double", ColorClass::KeywordB),
    ("True", ColorClass::KeywordB),
    ("False", ColorClass::KeywordB),
    ("None", ColorClass::KeywordB),
    ("null", ColorClass::KeywordB),
    ("nullptr", ColorClass::KeywordB),
    ("true", ColorClass::KeywordB),
    ("false", ColorClass::KeywordB),
    ("self", ColorClass::KeywordB),
    ("this", ColorClass::KeywordB),
    ("String", ColorClass::KeywordB),
    ("Vec", ColorClass::KeywordB),
    ("Option", ColorClass::KeywordB),
    ("Result", ColorClass::KeywordB),
];
