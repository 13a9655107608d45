//! Localization table — static UI strings per language.

use super::model::locale::Language;

/// 1言語分のUI文字列。
#[derive(Debug, PartialEq, Eq)]
pub struct UiStrings {
    pub intro_title: &'static str,
    pub intro_text: &'static str,
    pub explore_btn: &'static str,
    pub search_placeholder: &'static str,
    pub dev_text: &'static str,
    pub contact_text: &'static str,
    pub buy_btn: &'static str,
    pub modal_title: &'static str,
    pub modal_desc: &'static str,
    /// 言語切替ボタンの表示（切替先の言語名）
    pub lang_btn: &'static str,
    pub price_label: &'static str,
    pub currency: &'static str,
    pub no_results: &'static str,
}

/// 購入メッセージ。表示言語に関わらず英文で、`{title}` だけを表示言語の書名で置換する。
const PURCHASE_MESSAGE: &str = "I am interested in \"{title}\" book and want to buy it";

const EN: UiStrings = UiStrings {
    intro_title: "Your Gateway to Knowledge",
    intro_text: "Welcome to Booka, a curated collection of world-class literature. \
                 Whether you're looking for timeless classics or modern masterpieces, \
                 we connect you directly with the books you love.",
    explore_btn: "Explore Collection",
    search_placeholder: "Search books or authors...",
    dev_text: "Developed by:",
    contact_text: "Direct Purchase via WhatsApp",
    buy_btn: "Buy Now",
    modal_title: "Complete Your Purchase",
    modal_desc: "Choose a developer to finalize your order via WhatsApp:",
    lang_btn: "العربية",
    price_label: "Price:",
    currency: "SAR",
    no_results: "No books found.",
};

const AR: UiStrings = UiStrings {
    intro_title: "بوابتك إلى المعرفة",
    intro_text: "مرحباً بكم في بوكا، مجموعة مختارة من الأدب العالمي. \
                 سواء كنت تبحث عن الكلاسيكيات الخالدة أو الروائع الحديثة، \
                 فنحن نصلك مباشرة بالكتب التي تحبها.",
    explore_btn: "استكشف المجموعة",
    search_placeholder: "ابحث عن الكتب أو المؤلفين...",
    dev_text: "تم التطوير بواسطة:",
    contact_text: "الشراء المباشر عبر واتساب",
    buy_btn: "اشتري الآن",
    modal_title: "أكمل عملية الشراء",
    modal_desc: "اختر مطوراً لإتمام طلبك عبر واتساب:",
    lang_btn: "English",
    price_label: "السعر:",
    currency: "ر.س",
    no_results: "لم يتم العثور على كتب.",
};

pub fn strings(lang: Language) -> &'static UiStrings {
    match lang {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}

/// 購入メッセージを組み立てる。`title`は表示言語の書名。
pub fn purchase_message(title: &str) -> String {
    PURCHASE_MESSAGE.replace("{title}", title)
}

/// 価格の数値部分。整数値は小数点なしで表示する。
pub fn format_amount(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{price:.0}")
    } else {
        format!("{price}")
    }
}

/// `<label> <amount> <currency>` 形式の価格行。
pub fn price_line(lang: Language, price: f64) -> String {
    let t = strings(lang);
    format!("{} {} {}", t.price_label, format_amount(price), t.currency)
}
