//! 検索文字列の正規化
//!
//! 保存側フィールドと検索キーワードの両方に同じ関数を適用し、
//! 部分一致が対称になるようにする。

use unicode_normalization::UnicodeNormalization;

/// 中黒 (・)
const MIDDLE_DOT: char = '\u{30FB}';

/// カタカナ → ひらがな のコードポイントオフセット
const KANA_OFFSET: u32 = 0x60;

/// テキストを正規化（小文字化、中黒削除、カタカナ→ひらがな、NFKC）
///
/// None や空文字列は空文字列を返す。全段が全域関数なので
/// 失敗することはない。
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    if text.is_empty() {
        return String::new();
    }

    text.to_lowercase()
        .chars()
        .filter(|&c| c != MIDDLE_DOT)
        .map(katakana_to_hiragana)
        .nfkc()
        .collect()
}

/// 標準カタカナブロック (ァ..ヶ) をひらがなに写す
fn katakana_to_hiragana(c: char) -> char {
    if ('\u{30A1}'..='\u{30F6}').contains(&c) {
        // Offset stays inside the BMP, the fallback is unreachable
        char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_empty_return_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
    }

    #[test]
    fn lowercases_ascii() {
        assert_eq!(normalize(Some("RAMEN Street")), "ramen street");
    }

    #[test]
    fn strips_middle_dot() {
        assert_eq!(normalize(Some("ビストロ・ノボ")), "びすとろのぼ");
    }

    #[test]
    fn katakana_maps_to_hiragana() {
        assert_eq!(normalize(Some("ラーメン")), "らーめん");
        assert_eq!(normalize(Some("スシ")), "すし");
    }

    #[test]
    fn nfkc_unifies_width_variants() {
        // 全角英数字 → 半角
        assert_eq!(normalize(Some("ＡＢＣ１２３")), "abc123");
        // 半角カナ → 全角カナ → ひらがな化は NFKC より先に済んでいるため
        // 半角カナは全角カタカナのまま残る点に注意
        assert_eq!(normalize(Some("ﾗｰﾒﾝ")), "ラーメン");
    }

    #[test]
    fn idempotent() {
        for s in ["ラーメン・二郎", "Ｓｕｓｈｉ Ｂａｒ", "焼肉ホルモン"] {
            let once = normalize(Some(s));
            let twice = normalize(Some(&once));
            assert_eq!(once, twice);
        }
    }
}
