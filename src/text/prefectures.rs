use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Japanese prefecture names and their romanized equivalents
pub const PREFECTURES: [(&str, &str); 47] = [
    ("北海道", "Hokkaido"),
    ("青森県", "Aomori"),
    ("岩手県", "Iwate"),
    ("宮城県", "Miyagi"),
    ("秋田県", "Akita"),
    ("山形県", "Yamagata"),
    ("福島県", "Fukushima"),
    ("茨城県", "Ibaraki"),
    ("栃木県", "Tochigi"),
    ("群馬県", "Gunma"),
    ("埼玉県", "Saitama"),
    ("千葉県", "Chiba"),
    ("東京都", "Tokyo"),
    ("神奈川県", "Kanagawa"),
    ("新潟県", "Niigata"),
    ("富山県", "Toyama"),
    ("石川県", "Ishikawa"),
    ("福井県", "Fukui"),
    ("山梨県", "Yamanashi"),
    ("長野県", "Nagano"),
    ("岐阜県", "Gifu"),
    ("静岡県", "Shizuoka"),
    ("愛知県", "Aichi"),
    ("三重県", "Mie"),
    ("滋賀県", "Shiga"),
    ("京都府", "Kyoto"),
    ("大阪府", "Osaka"),
    ("兵庫県", "Hyogo"),
    ("奈良県", "Nara"),
    ("和歌山県", "Wakayama"),
    ("鳥取県", "Tottori"),
    ("島根県", "Shimane"),
    ("岡山県", "Okayama"),
    ("広島県", "Hiroshima"),
    ("山口県", "Yamaguchi"),
    ("徳島県", "Tokushima"),
    ("香川県", "Kagawa"),
    ("愛媛県", "Ehime"),
    ("高知県", "Kochi"),
    ("福岡県", "Fukuoka"),
    ("佐賀県", "Saga"),
    ("長崎県", "Nagasaki"),
    ("熊本県", "Kumamoto"),
    ("大分県", "Oita"),
    ("宮崎県", "Miyazaki"),
    ("鹿児島県", "Kagoshima"),
    ("沖縄県", "Okinawa"),
];

const ADMIN_SUFFIXES: [char; 3] = ['都', '府', '県'];

/// Every accepted spelling (lowercased) mapped to the lowercase romanized name.
/// Covers the full Japanese name, the name without its 都/府/県 suffix, and the
/// romanized name itself.
static PREFECTURE_KEYS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    let mut keys = HashMap::new();
    for (ja, en) in PREFECTURES {
        let canonical = en.to_lowercase();
        keys.insert(ja.to_string(), canonical.clone());
        if let Some(short) = ja.strip_suffix(ADMIN_SUFFIXES) {
            keys.insert(short.to_string(), canonical.clone());
        }
        keys.insert(canonical.clone(), canonical);
    }
    keys
});

/// Canonical (lowercase romanized) prefecture for either spelling
pub fn prefecture_key(text: &str) -> Option<&'static str> {
    let lowered = text.trim().to_lowercase();
    PREFECTURE_KEYS.get(&lowered).map(String::as_str)
}

/// True when the text names a Japanese prefecture, either as a full Japanese
/// name anywhere in the text or as a comma-separated token in either spelling.
pub fn mentions_prefecture(text: &str) -> bool {
    if PREFECTURES.iter().any(|(ja, _)| text.contains(ja)) {
        return true;
    }
    text.split([',', '、'])
        .any(|token| prefecture_key(token).is_some())
}
