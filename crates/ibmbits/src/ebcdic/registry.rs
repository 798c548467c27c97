//! Code page lookup by CCSID or name.

use super::tables::{CodePage, CP037, CP1047, CP1140, CP500};
use crate::error::EncodingError;

static ALL: [&CodePage; 4] = [&CP037, &CP500, &CP1047, &CP1140];

/// Runtime lookup over the built-in code pages.
pub struct CodePageRegistry;

impl CodePageRegistry {
    /// All supported code pages, CP037 first.
    pub fn all() -> &'static [&'static CodePage] {
        &ALL
    }

    /// Look up a code page by CCSID number.
    pub fn from_ccsid(ccsid: u16) -> Result<&'static CodePage, EncodingError> {
        ALL.iter()
            .copied()
            .find(|cp| cp.ccsid == ccsid)
            .ok_or_else(|| EncodingError::InvalidCodePage(format!("CCSID {}", ccsid)))
    }

    /// Look up a code page by name.
    ///
    /// Accepts "CP037", "IBM037", "IBM-037", "EBCDIC-037", "037" and "37"
    /// (case-insensitive).
    pub fn by_name(name: &str) -> Result<&'static CodePage, EncodingError> {
        let upper = name.trim().to_ascii_uppercase();
        let digits = ["CP", "IBM-", "IBM", "EBCDIC-"]
            .iter()
            .find_map(|prefix| upper.strip_prefix(prefix))
            .unwrap_or(&upper);

        digits
            .parse::<u16>()
            .ok()
            .and_then(|ccsid| Self::from_ccsid(ccsid).ok())
            .ok_or_else(|| EncodingError::InvalidCodePage(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_variants() {
        for name in ["CP037", "IBM037", "IBM-037", "EBCDIC-037", "cp037", "37"] {
            assert_eq!(CodePageRegistry::by_name(name).unwrap().ccsid, 37, "{}", name);
        }
        assert_eq!(CodePageRegistry::by_name("IBM-1047").unwrap().ccsid, 1047);
        assert_eq!(CodePageRegistry::by_name("cp1140").unwrap().ccsid, 1140);
    }

    #[test]
    fn test_unknown_name() {
        let err = CodePageRegistry::by_name("UTF-8").unwrap_err();
        assert_eq!(err, EncodingError::InvalidCodePage("UTF-8".to_string()));
    }

    #[test]
    fn test_unknown_ccsid() {
        assert!(matches!(
            CodePageRegistry::from_ccsid(65535),
            Err(EncodingError::InvalidCodePage(_))
        ));
    }

    #[test]
    fn test_all_unique_ccsids() {
        let all = CodePageRegistry::all();
        assert_eq!(all.len(), 4);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.ccsid, b.ccsid);
            }
        }
    }
}
