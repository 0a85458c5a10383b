use std::sync::OnceLock;

use regex::Regex;

/// Ordered source-label -> canonical English label table.
///
/// Replacement walks `entries` front to back, so declaration order is the
/// replacement order.
#[derive(Debug, Clone, Copy)]
pub struct CategoryMapping {
    entries: &'static [(&'static str, &'static str)],
}

impl CategoryMapping {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

pub static GENRE_MAP: CategoryMapping = CategoryMapping::new(&[
    ("剧情", "Drama"),
    ("喜剧", "Comedy"),
    ("动作", "Action"),
    ("爱情", "Romance"),
    ("科幻", "Sci-Fi"),
    ("动画", "Animation"),
    ("惊悚", "Thriller"),
    ("恐怖", "Horror"),
    ("犯罪", "Crime"),
    ("冒险", "Adventure"),
    ("奇幻", "Fantasy"),
    ("战争", "War"),
    ("历史", "History"),
    ("悬疑", "Mystery"),
    ("音乐", "Music"),
    ("歌舞", "Musical"),
    ("纪录片", "Documentary"),
    ("西部", "Western"),
    ("家庭", "Family"),
    ("传记", "Biography"),
    ("武侠", "Martial Arts"),
    ("短片", "Short Film"),
    ("运动", "Sports"),
]);

pub static REGION_MAP: CategoryMapping = CategoryMapping::new(&[
    ("中国大陆", "Mainland China"),
    ("香港", "Hong Kong"),
    ("台湾", "Taiwan"),
    ("美国", "USA"),
    ("日本", "Japan"),
    ("韩国", "Korea"),
    ("法国", "France"),
    ("英国", "UK"),
    ("德国", "Germany"),
    ("意大利", "Italy"),
    ("西班牙", "Spain"),
    ("加拿大", "Canada"),
    ("澳大利亚", "Australia"),
    ("西德", "West Germany"),
]);

fn cjk_pattern() -> &'static Regex {
    static CJK: OnceLock<Regex> = OnceLock::new();
    CJK.get_or_init(|| Regex::new(r"[\x{4E00}-\x{9FFF}]").expect("static CJK pattern"))
}

fn delimiter_pattern() -> &'static Regex {
    static DELIMS: OnceLock<Regex> = OnceLock::new();
    DELIMS.get_or_init(|| Regex::new(r"[/,、]").expect("static delimiter pattern"))
}

/// Replace every mapped label in `text`, then drop any leftover CJK ideographs.
///
/// Missing and empty input both yield an empty string; unmapped labels
/// disappear instead of leaking through untranslated.
pub fn translate(text: Option<&str>, mapping: &CategoryMapping) -> String {
    let Some(raw) = text.filter(|t| !t.is_empty()) else {
        return String::new();
    };

    let mut out = raw.to_string();
    for (source, target) in mapping.entries() {
        if out.contains(source) {
            out = out.replace(source, target);
        }
    }

    cjk_pattern().replace_all(&out, "").trim().to_string()
}

/// Split a category field on `/`, `,` and `、`, keeping non-empty trimmed tokens
/// in source order. Duplicates are kept.
pub fn split(text: Option<&str>) -> Vec<String> {
    let Some(raw) = text.filter(|t| !t.is_empty()) else {
        return Vec::new();
    };

    delimiter_pattern()
        .split(raw)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// `split(translate(text))`: the canonical tokens of one raw category field.
pub fn canonical_tokens(text: Option<&str>, mapping: &CategoryMapping) -> Vec<String> {
    let translated = translate(text, mapping);
    split(Some(&translated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_missing_or_empty_is_empty() {
        assert_eq!(translate(None, &GENRE_MAP), "");
        assert_eq!(translate(Some(""), &GENRE_MAP), "");
        assert_eq!(translate(None, &REGION_MAP), "");
    }

    #[test]
    fn translate_passes_plain_text_through_trimmed() {
        assert_eq!(translate(Some("  Drama / Film Noir "), &GENRE_MAP), "Drama / Film Noir");
        assert_eq!(translate(Some("abc"), &REGION_MAP), "abc");
    }

    #[test]
    fn translate_replaces_multi_valued_genres() {
        assert_eq!(translate(Some("剧情/喜剧"), &GENRE_MAP), "Drama/Comedy");
        assert_eq!(
            translate(Some("剧情 / 武侠 / 纪录片"), &GENRE_MAP),
            "Drama / Martial Arts / Documentary"
        );
    }

    #[test]
    fn translate_drops_unmapped_ideographs() {
        assert_eq!(translate(Some("同性"), &GENRE_MAP), "");
        assert_eq!(translate(Some("剧情/同性"), &GENRE_MAP), "Drama/");
        assert_eq!(translate(Some("美国 / 墨西哥"), &REGION_MAP), "USA /");
    }

    #[test]
    fn translate_regions() {
        assert_eq!(translate(Some("中国大陆"), &REGION_MAP), "Mainland China");
        assert_eq!(translate(Some("美国 / 英国"), &REGION_MAP), "USA / UK");
        assert_eq!(translate(Some("西德"), &REGION_MAP), "West Germany");
    }

    #[test]
    fn split_handles_all_delimiters() {
        assert_eq!(
            split(Some("Drama/Comedy、Action,")),
            vec!["Drama", "Comedy", "Action"]
        );
        assert_eq!(split(Some(" a , b /c ")), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_keeps_duplicates_and_order() {
        assert_eq!(split(Some("War/Drama/War")), vec!["War", "Drama", "War"]);
    }

    #[test]
    fn split_empty_inputs() {
        assert!(split(None).is_empty());
        assert!(split(Some("")).is_empty());
        assert!(split(Some(" / , 、 ")).is_empty());
    }

    #[test]
    fn canonical_tokens_combines_both_steps() {
        assert_eq!(
            canonical_tokens(Some("剧情/同性/爱情"), &GENRE_MAP),
            vec!["Drama", "Romance"]
        );
        assert!(canonical_tokens(Some("同性"), &GENRE_MAP).is_empty());
    }

    #[test]
    fn replacement_follows_declaration_order() {
        let short_first = CategoryMapping::new(&[("西", "W"), ("西德", "West Germany")]);
        assert_eq!(translate(Some("西德"), &short_first), "W");

        let long_first = CategoryMapping::new(&[("西德", "West Germany"), ("西", "W")]);
        assert_eq!(translate(Some("西德"), &long_first), "West Germany");
    }

    #[test]
    fn table_sizes() {
        assert_eq!(GENRE_MAP.entries().len(), 23);
        assert_eq!(REGION_MAP.entries().len(), 14);
    }
}
