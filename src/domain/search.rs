use super::model::book::BookRecord;

/// クエリの正規化（前後空白除去＋小文字化）。
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// 1件がクエリに一致するか。英語は大小文字を無視、アラビア語はそのまま部分一致。
pub fn matches(book: &BookRecord, normalized: &str) -> bool {
    book.title_en.to_lowercase().contains(normalized)
        || book.author_en.to_lowercase().contains(normalized)
        || book.title_ar.contains(normalized)
        || book.author_ar.contains(normalized)
}

/// カタログ全体から一致するレコードを元の順序で返す。
/// 毎回フルカタログに対して適用するため、絞り込みは累積しない。
pub fn filter<'a>(catalog: &'a [BookRecord], query: &str) -> Vec<&'a BookRecord> {
    let normalized = normalize_query(query);
    catalog
        .iter()
        .filter(|book| matches(book, &normalized))
        .collect()
}
