//! Heading text to anchor id conversion.

/// Id used for headings whose text has no usable characters.
pub const FALLBACK_SLUG: &str = "section";

/// Transliterations applied before filtering.
fn transliterate(c: char) -> Option<&'static str> {
    let mapped = match c {
        '$' => "dollar",
        '%' => "percent",
        '&' => "and",
        '<' => "less",
        '>' => "greater",
        '|' => "or",
        '¢' => "cent",
        '£' => "pound",
        '¤' => "currency",
        '¥' => "yen",
        '€' => "euro",
        '©' => "(c)",
        '®' => "(r)",
        'ª' => "a",
        'º' => "o",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
        'Æ' => "AE",
        'Ç' => "C",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'Ð' => "D",
        'Ñ' => "N",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'Ý' => "Y",
        'Þ' => "TH",
        'ß' => "ss",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ð' => "d",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'þ' => "th",
        'Œ' => "OE",
        'œ' => "oe",
        'Š' => "S",
        'š' => "s",
        'Ž' => "Z",
        'ž' => "z",
        'Α' | 'Ά' => "A",
        'Β' => "B",
        'Γ' => "G",
        'Δ' => "D",
        'Ε' | 'Έ' => "E",
        'Ζ' => "Z",
        'Η' | 'Ή' => "H",
        'Θ' | 'θ' => "8",
        'Ι' | 'Ί' | 'Ϊ' => "I",
        'Κ' => "K",
        'Λ' => "L",
        'Μ' => "M",
        'Ν' => "N",
        'Ξ' | 'ξ' => "3",
        'Ο' | 'Ό' => "O",
        'Π' => "P",
        'Ρ' => "R",
        'Σ' => "S",
        'Τ' => "T",
        'Υ' | 'Ύ' | 'Ϋ' => "Y",
        'Φ' => "F",
        'Χ' => "X",
        'Ψ' => "PS",
        'Ω' | 'Ώ' => "W",
        'α' | 'ά' => "a",
        'β' => "b",
        'γ' => "g",
        'δ' => "d",
        'ε' | 'έ' => "e",
        'ζ' => "z",
        'η' | 'ή' => "h",
        'ι' | 'ί' | 'ϊ' | 'ΐ' => "i",
        'κ' => "k",
        'λ' => "l",
        'μ' => "m",
        'ν' => "n",
        'ο' | 'ό' => "o",
        'π' => "p",
        'ρ' => "r",
        'σ' | 'ς' => "s",
        'τ' => "t",
        'υ' | 'ύ' | 'ϋ' | 'ΰ' => "y",
        'φ' => "f",
        'χ' => "x",
        'ψ' => "ps",
        'ω' | 'ώ' => "w",
        'А' | 'а' => "a",
        'Б' | 'б' => "b",
        'В' | 'в' => "v",
        'Г' | 'г' => "g",
        'Д' | 'д' => "d",
        'Е' | 'е' | 'Э' | 'э' => "e",
        'Ё' | 'ё' => "yo",
        'Ж' | 'ж' => "zh",
        'З' | 'з' => "z",
        'И' | 'и' => "i",
        'Й' | 'й' => "j",
        'К' | 'к' => "k",
        'Л' | 'л' => "l",
        'М' | 'м' => "m",
        'Н' | 'н' => "n",
        'О' | 'о' => "o",
        'П' | 'п' => "p",
        'Р' | 'р' => "r",
        'С' | 'с' => "s",
        'Т' | 'т' => "t",
        'У' | 'у' | 'Ъ' | 'ъ' => "u",
        'Ф' | 'ф' => "f",
        'Х' | 'х' => "h",
        'Ц' | 'ц' => "c",
        'Ч' | 'ч' => "ch",
        'Ш' | 'ш' | 'Щ' | 'щ' => "sh",
        'Ы' | 'ы' => "y",
        'Ь' | 'ь' => "",
        'Ю' | 'ю' => "yu",
        'Я' | 'я' => "ya",
        _ => return None,
    };
    Some(mapped)
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || "$*_+~.()'\"!-:@".contains(c)
}

/// Lower-case, hyphen separated id for a heading.
///
/// Characters outside a small URL-safe set are dropped, a literal `-` acts
/// as a separator, and runs of separators collapse into a single hyphen.
/// Text that leaves nothing behind becomes [`FALLBACK_SLUG`].
pub fn slugify(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());

    for c in text.chars() {
        if c == '-' {
            kept.push(' ');
            continue;
        }
        match transliterate(c) {
            Some(mapped) => kept.extend(mapped.chars().filter(|m| is_kept(*m))),
            None if is_kept(c) => kept.push(c),
            None => {}
        }
    }

    let slug = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
