//! Word inflection helpers used to derive resource names from controller paths
//! and class names.
//!
//! The rules follow the English inflections web frameworks ship with:
//! whole-word irregulars and uncountables first, then suffix rules where the
//! first matching suffix wins, then a plain `-s`.

/// Whole words whose singular and plural do not follow the suffix rules
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("ox", "oxen"),
    ("move", "moves"),
    ("movie", "movies"),
    ("cookie", "cookies"),
    ("zombie", "zombies"),
    ("rookie", "rookies"),
    ("tie", "ties"),
    ("pie", "pies"),
    ("shoe", "shoes"),
    ("canoe", "canoes"),
    ("toe", "toes"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("echo", "echoes"),
    ("veto", "vetoes"),
    ("torpedo", "torpedoes"),
    ("bus", "buses"),
    ("alias", "aliases"),
    ("status", "statuses"),
    ("quiz", "quizzes"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("index", "indices"),
    ("analysis", "analyses"),
    ("diagnosis", "diagnoses"),
    ("synopsis", "synopses"),
    ("parenthesis", "parentheses"),
    ("crisis", "crises"),
    ("thief", "thieves"),
    ("drive", "drives"),
    ("olive", "olives"),
    ("valve", "valves"),
];

const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
    "metadata",
];

/// Plural suffix -> singular replacement, most specific first
const SINGULAR_RULES: &[(&str, &str)] = &[
    ("hives", "hive"),
    ("tives", "tive"),
    ("zzes", "zz"),
    ("sses", "ss"),
    ("xes", "x"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("ieves", "ief"),
    ("eaves", "eaf"),
    ("oaves", "oaf"),
    ("alves", "alf"),
    ("elves", "elf"),
    ("olves", "olf"),
    ("arves", "arf"),
    ("ives", "ife"),
    ("oes", "o"),
    ("ies", "y"),
];

/// Singular suffix -> plural replacement, most specific first
const PLURAL_RULES: &[(&str, &str)] = &[
    ("eaf", "eaves"),
    ("oaf", "oaves"),
    ("alf", "alves"),
    ("elf", "elves"),
    ("olf", "olves"),
    ("arf", "arves"),
    ("ife", "ives"),
    ("ss", "sses"),
    ("sh", "shes"),
    ("ch", "ches"),
    ("s", "ses"),
    ("x", "xes"),
    ("z", "zes"),
];

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercases the first character and lowercases the rest.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Converts a snake_case path into a CamelCase constant name.
///
/// Path separators become `::`, so `admin/line_items` turns into
/// `Admin::LineItems`.
pub fn camelize(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            segment
                .split('_')
                .filter(|part| !part.is_empty())
                .map(capitalize)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("::")
}

/// Converts a CamelCase constant name into a snake_case path.
pub fn underscore(name: &str) -> String {
    let name = name.replace("::", "/");
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.map_or(false, |n| n.is_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    out
}

/// Turns an underscored name into a human-readable phrase.
///
/// A trailing `_id` is dropped and only the first letter is capitalized:
/// `line_item` becomes `Line item`.
pub fn humanize(name: &str) -> String {
    let trimmed = name.strip_suffix("_id").unwrap_or(name);
    capitalize(&trimmed.replace('_', " ").trim().to_string())
}

/// Singularizes the last word of `word`, preserving the leading part.
pub fn singularize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    let lower = last.to_ascii_lowercase();

    if last.is_empty() || UNCOUNTABLES.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((singular, _)) = IRREGULARS.iter().find(|(_, plural)| *plural == lower) {
        return format!("{}{}", head, match_case(last, singular));
    }

    if let Some(singular) = apply_suffix_rule(last, &lower, SINGULAR_RULES) {
        return format!("{}{}", head, singular);
    }

    let singular = if lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") {
        &last[..last.len() - 1]
    } else {
        last
    };

    format!("{}{}", head, singular)
}

/// Pluralizes the last word of `word`, preserving the leading part.
pub fn pluralize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    let lower = last.to_ascii_lowercase();

    if last.is_empty() || UNCOUNTABLES.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULARS.iter().find(|(singular, _)| *singular == lower) {
        return format!("{}{}", head, match_case(last, plural));
    }

    let plural = if lower.ends_with('y')
        && !lower.ends_with("ay")
        && !lower.ends_with("ey")
        && !lower.ends_with("oy")
        && !lower.ends_with("uy")
    {
        format!("{}ies", &last[..last.len() - 1])
    } else if let Some(plural) = apply_suffix_rule(last, &lower, PLURAL_RULES) {
        plural
    } else {
        format!("{}s", last)
    };

    format!("{}{}", head, plural)
}

/// Replaces the first matching suffix. The stem in front of it must be
/// non-empty; `lower` is the ASCII-lowercased `word`, so byte offsets agree.
fn apply_suffix_rule(word: &str, lower: &str, rules: &[(&str, &str)]) -> Option<String> {
    rules
        .iter()
        .find(|(suffix, _)| lower.len() > suffix.len() && lower.ends_with(suffix))
        .map(|(suffix, replacement)| {
            format!("{}{}", &word[..word.len() - suffix.len()], replacement)
        })
}

/// Splits off the last word: the part after the last `::`, `_`, space, or
/// CamelCase boundary.
fn split_last_word(word: &str) -> (&str, &str) {
    let start = word
        .char_indices()
        .rev()
        .find(|(i, c)| {
            *i > 0
                && (c.is_uppercase()
                    || word[..*i].ends_with('_')
                    || word[..*i].ends_with(' ')
                    || word[..*i].ends_with(':'))
        })
        .map(|(i, _)| i)
        .unwrap_or(0);
    word.split_at(start)
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().map_or(false, |c| c.is_uppercase()) {
        capitalize(replacement)
    } else {
        replacement.to_string()
    }
}
