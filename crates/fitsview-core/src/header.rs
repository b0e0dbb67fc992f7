use std::fmt;

use tracing::warn;

/// Scalar value of a header keyword.
#[derive(Clone, Debug, PartialEq)]
pub enum HeaderValue {
    Logical(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl HeaderValue {
    /// Type a value field as cfitsio splits it off a card.
    ///
    /// Returns `None` for an empty (undefined) field.
    pub fn from_value_field(keyword: &str, field: &str) -> Option<Self> {
        let token = field.trim();
        if token.is_empty() {
            return None;
        }

        if let Some(quoted) = token.strip_prefix('\'') {
            let inner = quoted.strip_suffix('\'').unwrap_or(quoted);
            return Some(Self::Text(inner.replace("''", "'").trim_end().to_string()));
        }

        let value = match token {
            "T" => Self::Logical(true),
            "F" => Self::Logical(false),
            _ => {
                if let Ok(i) = token.parse::<i64>() {
                    Self::Integer(i)
                } else if let Ok(r) = token.replace(['D', 'd'], "E").parse::<f64>() {
                    Self::Real(r)
                } else {
                    warn!("Keyword {keyword}: unrecognised value {token:?}, kept as text");
                    Self::Text(token.to_string())
                }
            }
        };
        Some(value)
    }

    /// Numeric view; integers widen to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Integer view; reals are accepted only when they hold an exact integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Real(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Logical(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical(b) => write!(f, "{}", if *b { "T" } else { "F" }),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v:?}"),
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

impl From<bool> for HeaderValue {
    fn from(v: bool) -> Self {
        Self::Logical(v)
    }
}

impl From<i64> for HeaderValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<usize> for HeaderValue {
    fn from(v: usize) -> Self {
        Self::Integer(v as i64)
    }
}

impl From<f64> for HeaderValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for HeaderValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// One header keyword.
///
/// Commentary cards (`COMMENT`, `HISTORY`, blank keyword) carry their text in
/// `comment` and have no value. Cards read from a file keep the record text
/// cfitsio returned until their value is changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub keyword: String,
    pub value: Option<HeaderValue>,
    pub comment: Option<String>,
    record: Option<String>,
}

impl Card {
    pub fn new(keyword: &str, value: impl Into<HeaderValue>) -> Self {
        Self {
            keyword: keyword.to_uppercase(),
            value: Some(value.into()),
            comment: None,
            record: None,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn commentary(keyword: &str, text: &str) -> Self {
        Self {
            keyword: keyword.to_uppercase(),
            value: None,
            comment: Some(text.to_string()),
            record: None,
        }
    }

    /// A card as read from a file, with its original record text.
    pub fn from_record(
        keyword: String,
        value: Option<HeaderValue>,
        comment: Option<String>,
        record: String,
    ) -> Self {
        Self {
            keyword,
            value,
            comment,
            record: Some(record),
        }
    }

    pub fn is_commentary(&self) -> bool {
        matches!(self.keyword.as_str(), "COMMENT" | "HISTORY" | "")
    }

    /// Record text from the file, if the card has not been modified.
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    /// One display line: the file record when available, otherwise
    /// `KEYWORD = value / comment`.
    pub fn display_line(&self) -> String {
        if let Some(ref record) = self.record {
            return record.trim_end().to_string();
        }
        let comment = self.comment.as_deref().unwrap_or("");
        match self.value {
            _ if self.is_commentary() => format!("{:<8}{comment}", self.keyword),
            Some(ref v) if comment.is_empty() => format!("{:<8}= {v}", self.keyword),
            Some(ref v) => format!("{:<8}= {v} / {comment}", self.keyword),
            None => format!("{:<8}= / {comment}", self.keyword),
        }
    }
}

/// Ordered FITS header.
///
/// Keys are case-insensitive on lookup and stored uppercase. Card order is
/// preserved on write, and `set` replaces a value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = key.to_uppercase();
        self.cards
            .iter()
            .position(|c| !c.is_commentary() && c.keyword == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.position(key).and_then(|i| self.cards[i].value.as_ref())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(HeaderValue::as_f64)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(HeaderValue::as_i64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(HeaderValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(HeaderValue::as_bool)
    }

    /// Set a keyword, replacing the value in place (comment kept) or
    /// appending a new card.
    pub fn set(&mut self, key: &str, value: impl Into<HeaderValue>) {
        let value = value.into();
        match self.position(key) {
            Some(i) => {
                let card = &mut self.cards[i];
                card.value = Some(value);
                card.record = None;
            }
            None => self.cards.push(Card::new(key, value)),
        }
    }

    /// Remove the first card with this keyword. Returns the removed value.
    pub fn remove(&mut self, key: &str) -> Option<HeaderValue> {
        let i = self.position(key)?;
        self.cards.remove(i).value
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn add_history(&mut self, text: &str) {
        self.cards.push(Card::commentary("HISTORY", text));
    }

    /// `NAXIS` followed by each `NAXISn`, in FITS axis order.
    pub fn axes(&self) -> Option<Vec<usize>> {
        let naxis = self.get_i64("NAXIS")?;
        (1..=naxis)
            .map(|n| {
                self.get_i64(&format!("NAXIS{n}"))
                    .and_then(|v| usize::try_from(v).ok())
            })
            .collect()
    }

    /// Human-readable card listing, one card per line.
    pub fn to_card_text(&self) -> String {
        let mut lines: Vec<String> = self.cards.iter().map(Card::display_line).collect();
        lines.push("END".to_string());
        lines.join("\n")
    }
}
