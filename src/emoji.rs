//! Keyword to emoji lookup tables.
//!
//! Both tables are ordered association lists. Lookup scans a table in
//! declaration order and returns the emoji of the first keyword contained
//! in the text, so a title mentioning two keywords always gets the one that
//! is declared first, regardless of where each appears in the text.

/// An ordered list of `(keyword, emoji)` pairs.
pub type EmojiTable = &'static [(&'static str, &'static str)];

/// Emoji for header titles.
pub const HEADER_EMOJIS: EmojiTable = &[
    ("개요", "📱"),
    ("아키텍처", "🏗️"),
    ("화면별", "📋"),
    ("스플래시", "✨"),
    ("온보딩", "👋"),
    ("로그인", "🔐"),
    ("회원가입", "📝"),
    ("메인", "🏠"),
    ("홈", "🏠"),
    ("검색", "🔍"),
    ("샵", "🏪"),
    ("예약", "📅"),
    ("결제", "💳"),
    ("마이페이지", "👤"),
    ("포인트", "🎯"),
    ("추천인", "👥"),
    ("설정", "⚙️"),
    ("피드", "📱"),
    ("기술적", "🔧"),
    ("보안", "🔐"),
    ("배포", "🚀"),
];

/// Emoji for bolded feature terms in list items.
pub const FEATURE_EMOJIS: EmojiTable = &[
    ("로고", "🎯"),
    ("슬로건", "💬"),
    ("로딩", "⏳"),
    ("배경", "🌈"),
    ("전환", "🔄"),
    ("슬라이드", "📱"),
    ("인디케이터", "📍"),
    ("버튼", "🔘"),
    ("이미지", "🖼️"),
    ("텍스트", "📝"),
    ("제스처", "👆"),
    ("소셜", "🔗"),
    ("카카오", "💛"),
    ("애플", "🍎"),
    ("구글", "🔵"),
    ("검색", "🔍"),
    ("필터", "🔽"),
    ("결과", "📊"),
    ("지도", "🗺️"),
    ("카드", "🃏"),
    ("리스트", "📋"),
    ("새로고침", "🔄"),
    ("무한", "♾️"),
    ("헤더", "🎯"),
    ("섹션", "📦"),
    ("캐러셀", "🎠"),
    ("그리드", "⚏"),
    ("즐겨찾기", "⭐"),
    ("배너", "🏷️"),
];

/// Returns the emoji of the first keyword in `table` that occurs in `text`.
///
/// Matching is case-sensitive substring containment.
#[must_use]
pub fn lookup(table: EmojiTable, text: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|&(_, emoji)| emoji)
}
