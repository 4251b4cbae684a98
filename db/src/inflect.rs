//! English inflection helpers used to derive type and field names.
//!
//! Collection keys are usually plural snake_case (`posts`, `blog_posts`,
//! `categories`) while type names are singular PascalCase (`Post`,
//! `BlogPost`, `Category`). These helpers convert between the two forms with
//! an ordered rule table: the first matching rule wins.

use std::sync::LazyLock;

use regex::Regex;

/// Words whose singular and plural forms are identical.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

/// Irregular (singular, plural) pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const PLURAL_RULES: &[(&str, &str)] = &[
    (r"(?i)(quiz)$", "${1}zes"),
    (r"(?i)^(oxen)$", "${1}"),
    (r"(?i)^(ox)$", "${1}en"),
    (r"(?i)^(m|l)ice$", "${1}ice"),
    (r"(?i)^(m|l)ouse$", "${1}ice"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)sis$", "ses"),
    (r"(?i)([ti])a$", "${1}a"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)(buffal|tomat|potat)o$", "${1}oes"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(octop|vir)i$", "${1}i"),
    (r"(?i)(octop|vir)us$", "${1}i"),
    (r"(?i)^(ax|test)is$", "${1}es"),
    (r"(?i)s$", "s"),
    (r"$", "s"),
];

const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(?i)(database)s$", "${1}"),
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)^(ox)en", "${1}"),
    (r"(?i)(alias|status)(es)?$", "${1}"),
    (r"(?i)(octop|vir)(us|i)$", "${1}us"),
    (r"(?i)^(a)x[ie]s$", "${1}xis"),
    (r"(?i)(cris|test)(is|es)$", "${1}is"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(bus)(es)?$", "${1}"),
    (r"(?i)^(m|l)ice$", "${1}ouse"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)(s)eries$", "${1}eries"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
    (
        r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"(?i)([ti])a$", "${1}um"),
    (r"(?i)(n)ews$", "${1}ews"),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)s$", ""),
];

static PLURALS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(PLURAL_RULES));
static SINGULARS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(SINGULAR_RULES));

fn compile(rules: &'static [(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, *replacement)))
        .collect()
}

/// Returns the length of the trailing segment of `word` that equals `target`
/// (case-insensitive) on a word boundary, if any.
fn trailing_word(word: &str, target: &str) -> Option<usize> {
    let lower = word.to_lowercase();
    if lower == target {
        return Some(word.len());
    }
    let boundary = lower.len().checked_sub(target.len() + 1)?;
    let separated = lower
        .get(boundary..)
        .is_some_and(|tail| tail.ends_with(target) && (tail.starts_with('_') || tail.starts_with(' ')));
    if separated {
        return Some(target.len());
    }
    // CamelCase boundary: `BlogPerson` -> `Person`
    let start = word.len().checked_sub(target.len())?;
    let camel = word
        .get(start..)
        .is_some_and(|tail| tail.to_lowercase() == target && tail.starts_with(|c: char| c.is_ascii_uppercase()));
    camel.then_some(target.len())
}

/// Replaces the trailing `len` bytes of `word` with `replacement`, keeping the
/// case of the replaced segment's first letter.
fn replace_tail(word: &str, len: usize, replacement: &str) -> String {
    let (head, replaced) = word.split_at(word.len() - len);
    let capitalized = replaced.starts_with(|c: char| c.is_uppercase());
    let tail = if capitalized {
        capitalize(replacement)
    } else {
        replacement.to_string()
    };
    format!("{head}{tail}")
}

fn apply_rules(word: &str, rules: &[(Regex, &'static str)]) -> String {
    for (re, replacement) in rules {
        if re.is_match(word) {
            return re.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}

fn is_uncountable(word: &str) -> bool {
    UNCOUNTABLE.iter().any(|u| trailing_word(word, u).is_some())
}

/// Plural form of an English word or snake_case/PascalCase identifier.
///
/// Only the last word is inflected: `blog_post` -> `blog_posts`,
/// `Category` -> `Categories`, `Foot` -> `Feet`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULAR {
        if trailing_word(word, plural).is_some() {
            return word.to_string();
        }
        if let Some(len) = trailing_word(word, singular) {
            return replace_tail(word, len, plural);
        }
    }
    apply_rules(word, &PLURALS)
}

/// Singular form of an English word or snake_case/PascalCase identifier.
pub fn singularize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULAR {
        if let Some(len) = trailing_word(word, plural) {
            return replace_tail(word, len, singular);
        }
        if trailing_word(word, singular).is_some() {
            return word.to_string();
        }
    }
    apply_rules(word, &SINGULARS)
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `blog_post` -> `BlogPost`; `blog-post` -> `BlogPost`; `userProfile` -> `UserProfile`.
pub fn camelize(word: &str) -> String {
    word.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// Type name for a collection key: `posts` -> `Post`, `blog_posts` -> `BlogPost`.
pub fn type_name_from_key(key: &str) -> String {
    camelize(&singularize(key))
}

/// Plural type name: `Post` -> `Posts`, `Foot` -> `Feet`.
pub fn plural_type_name(type_name: &str) -> String {
    camelize(&pluralize(type_name))
}
