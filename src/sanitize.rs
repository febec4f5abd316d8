use regex::Regex;
use std::sync::LazyLock;

/// Characters that may not appear in a folder name on common filesystems
/// (Windows being the strictest). Control characters 0-31 are rejected
/// separately.
pub const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

// Two or more periods in a row. A lone "." is fine inside a name, but ".."
// could be read as a parent-directory segment.
static DOT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());

/// Turns arbitrary tag text into a single path segment.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    reserved: Vec<char>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            reserved: RESERVED_CHARS.to_vec(),
        }
    }
}

impl Sanitizer {
    /// Build a sanitizer that also strips `extra`. [`RESERVED_CHARS`] and
    /// control characters are always stripped.
    pub fn with_reserved(extra: &[char]) -> Self {
        let mut reserved = RESERVED_CHARS.to_vec();
        for &c in extra {
            if !reserved.contains(&c) {
                reserved.push(c);
            }
        }
        Self { reserved }
    }

    pub fn reserved(&self) -> &[char] {
        &self.reserved
    }

    /// Strip reserved and control characters, then drop every run of two or
    /// more periods. The result may be empty.
    pub fn sanitize(&self, raw: &str) -> String {
        let filtered: String = raw.chars().filter(|c| !self.is_illegal(*c)).collect();

        DOT_RUN_RE.replace_all(&filtered, "").into_owned()
    }

    fn is_illegal(&self, c: char) -> bool {
        (c as u32) < 32 || self.reserved.contains(&c)
    }
}

/// Sanitize with the default reserved set.
pub fn sanitize(raw: &str) -> String {
    static DEFAULT: LazyLock<Sanitizer> = LazyLock::new(Sanitizer::default);
    DEFAULT.sanitize(raw)
}

/// Whether a sanitized name can stand on its own as a directory name.
/// Empty names and "." would resolve to the parent folder itself.
pub fn is_usable_segment(name: &str) -> bool {
    !name.is_empty() && name != "."
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Adversarial inputs for the property checks below.
    fn corpus() -> Vec<String> {
        let mut inputs: Vec<String> = [
            "",
            ".",
            "..",
            "...",
            "AC/DC",
            "Back...In..Black",
            "a..b",
            "a.b.c",
            "..hidden",
            "trailing..",
            "a.\u{1}.b",
            ".:.",
            "..\\..",
            "Sigur Rós",
            "<>:\"/\\|?*",
            "tab\there\nnewline\r",
            "\u{7f}delete",
            "What?! Are You *Serious*",
            "Godspeed You! Black Emperor",
            "...And Justice for All",
            "Vol. 2..",
            ". . .",
            "a.?.b",
            "..../....",
            "日本語/アルバム",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        // every control character, alone and sandwiched between periods
        for cp in 0u32..32 {
            let c = char::from_u32(cp).unwrap();
            inputs.push(c.to_string());
            inputs.push(format!("x.{c}.y"));
        }
        inputs
    }

    #[test]
    fn strips_reserved_characters() {
        assert_eq!(sanitize("AC/DC"), "ACDC");
        assert_eq!(sanitize("What?! Are You *Serious*"), "What! Are You Serious");
        assert_eq!(sanitize("<>:\"/\\|?*"), "");
    }

    #[test]
    fn strips_control_characters() {
        assert_eq!(sanitize("tab\there\nnewline\r"), "tabherenewline");
        assert_eq!(sanitize("\u{0}null"), "null");
        // DEL (127) is outside 0-31 and survives
        assert_eq!(sanitize("\u{7f}x"), "\u{7f}x");
    }

    #[test]
    fn collapses_period_runs() {
        assert_eq!(sanitize("a..b"), "ab");
        assert_eq!(sanitize("a...b"), "ab");
        assert_eq!(sanitize("Back...In..Black"), "BackInBlack");
        assert_eq!(sanitize("..."), "");
        assert_eq!(sanitize("...And Justice for All"), "And Justice for All");
    }

    #[test]
    fn keeps_single_periods() {
        assert_eq!(sanitize("a.b.c"), "a.b.c");
        assert_eq!(sanitize("moe."), "moe.");
        assert_eq!(sanitize("."), ".");
    }

    #[test]
    fn runs_formed_by_removed_characters_are_collapsed() {
        // removing the control char leaves "a..b"
        assert_eq!(sanitize("a.\u{1}.b"), "ab");
        assert_eq!(sanitize("a.?.b"), "ab");
    }

    #[test]
    fn keeps_non_ascii() {
        assert_eq!(sanitize("Sigur Rós"), "Sigur Rós");
        assert_eq!(sanitize("日本語/アルバム"), "日本語アルバム");
    }

    #[test]
    fn output_never_contains_illegal_characters() {
        for input in corpus() {
            let out = sanitize(&input);
            assert!(
                !out.chars().any(|c| (c as u32) < 32 || RESERVED_CHARS.contains(&c)),
                "{input:?} -> {out:?}"
            );
        }
    }

    #[test]
    fn output_never_contains_period_runs() {
        for input in corpus() {
            let out = sanitize(&input);
            assert!(!out.contains(".."), "{input:?} -> {out:?}");
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in corpus() {
            let once = sanitize(&input);
            assert_eq!(sanitize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn custom_reserved_set_extends_default() {
        let s = Sanitizer::with_reserved(&['#', '/']);
        assert!(s.reserved().contains(&'#'));
        assert!(RESERVED_CHARS.iter().all(|c| s.reserved().contains(c)));
        assert_eq!(s.reserved().len(), RESERVED_CHARS.len() + 1);
        assert_eq!(s.sanitize("AC/DC #1"), "ACDC 1");
        assert_eq!(s.sanitize("x\u{2}y"), "xy");
    }

    #[test]
    fn custom_reserved_set_keeps_separators_out() {
        let s = Sanitizer::with_reserved(&['#']);
        for input in corpus() {
            let out = s.sanitize(&input);
            assert!(!out.contains('/') && !out.contains('\\'), "{input:?} -> {out:?}");
        }
        assert_eq!(s.sanitize("/tmp/escape"), "tmpescape");
    }

    #[test]
    fn usable_segments() {
        assert!(is_usable_segment("ACDC"));
        assert!(is_usable_segment("moe."));
        assert!(!is_usable_segment(""));
        assert!(!is_usable_segment("."));
    }
}
