/// Currency codes and their display symbols, sorted by code.
pub const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("AED", "AED "),
    ("ARS", "$"),
    ("AUD", "A$"),
    ("BDT", "৳"),
    ("BGN", "лв"),
    ("BRL", "R$"),
    ("CAD", "C$"),
    ("CHF", "CHF "),
    ("CLP", "$"),
    ("CNY", "¥"),
    ("COP", "$"),
    ("CZK", "Kč"),
    ("DKK", "kr"),
    ("EGP", "E£"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("HKD", "HK$"),
    ("HUF", "Ft"),
    ("IDR", "Rp"),
    ("ILS", "₪"),
    ("INR", "₹"),
    ("ISK", "kr"),
    ("JPY", "¥"),
    ("KES", "KSh"),
    ("KRW", "₩"),
    ("MXN", "$"),
    ("MYR", "RM"),
    ("NGN", "₦"),
    ("NOK", "kr"),
    ("NZD", "NZ$"),
    ("PHP", "₱"),
    ("PKR", "Rs"),
    ("PLN", "zł"),
    ("RON", "lei"),
    ("RUB", "₽"),
    ("SAR", "SAR "),
    ("SEK", "kr"),
    ("SGD", "S$"),
    ("THB", "฿"),
    ("TRY", "₺"),
    ("TWD", "NT$"),
    ("UAH", "₴"),
    ("USD", "$"),
    ("VND", "₫"),
    ("ZAR", "R"),
];

/// Look up the display symbol for a currency code (case-insensitive).
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_uppercase();
    CURRENCY_SYMBOLS
        .binary_search_by(|(c, _)| (*c).cmp(code.as_str()))
        .ok()
        .map(|idx| CURRENCY_SYMBOLS[idx].1)
}
