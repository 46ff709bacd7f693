/// Query state and request parameter construction
///
/// `QueryState` is the single source of truth for the next `/photos`
/// request. Pagination values are kept as `f64` because the limit/offset
/// inputs coerce free text the way JavaScript's `Number()` does, which can
/// yield NaN or fractional values. They are echoed to the server unchanged.

/// Page size used on startup
pub const DEFAULT_LIMIT: f64 = 25.0;
/// Page offset used on startup
pub const DEFAULT_OFFSET: f64 = 0.0;

pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_OFFSET: &str = "offset";
pub const PARAM_TITLE: &str = "title";
pub const PARAM_ALBUM_TITLE: &str = "album.title";
pub const PARAM_USER_EMAIL: &str = "album.user.email";

/// The committed filter triple. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub title: String,
    pub album_title: String,
    pub user_email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub filters: Filters,
    pub limit: f64,
    pub offset: f64,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl QueryState {
    /// Build the request parameters for this state.
    /// Empty filters are left out entirely instead of being sent as `""`.
    pub fn to_query(&self) -> PhotoQuery {
        PhotoQuery {
            limit: self.limit,
            offset: self.offset,
            album_title: non_empty(&self.filters.album_title),
            user_email: non_empty(&self.filters.user_email),
            title: non_empty(&self.filters.title),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parameters of one `GET /photos` request
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoQuery {
    pub limit: f64,
    pub offset: f64,
    pub album_title: Option<String>,
    pub user_email: Option<String>,
    pub title: Option<String>,
}

impl PhotoQuery {
    /// Query-string pairs in the order they are sent
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (PARAM_LIMIT, format_number(self.limit)),
            (PARAM_OFFSET, format_number(self.offset)),
        ];
        if let Some(album_title) = &self.album_title {
            pairs.push((PARAM_ALBUM_TITLE, album_title.clone()));
        }
        if let Some(user_email) = &self.user_email {
            pairs.push((PARAM_USER_EMAIL, user_email.clone()));
        }
        if let Some(title) = &self.title {
            pairs.push((PARAM_TITLE, title.clone()));
        }
        pairs
    }
}

/// Coerce free text to a number with JavaScript `Number()` rules.
///
/// Whitespace is trimmed and the empty string is 0. Decimal literals with an
/// optional sign, `Infinity`, and unsigned `0x`/`0o`/`0b` integers parse.
/// Everything else is NaN.
pub fn coerce_number(input: &str) -> f64 {
    // Number() also strips the byte order mark
    let trimmed = input.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if trimmed.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    let (sign, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
        (-1.0, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (1.0, rest)
    } else {
        (1.0, trimmed)
    };

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    // f64::from_str also takes "inf"/"nan" spellings that Number() rejects
    let starts_numeric = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    let all_numeric = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !starts_numeric || !all_numeric {
        return f64::NAN;
    }

    unsigned.parse::<f64>().map(|v| sign * v).unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
        .unwrap_or(f64::NAN)
}

/// Render a number the way it appears in the query string
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        // covers -0
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        // Exponent form past these bounds, with an explicit sign on the exponent
        let sci = format!("{:e}", value);
        match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => sci,
        }
    } else {
        value.to_string()
    }
}

/// Same-value comparison used to decide whether a pagination edit is a change
pub fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}
